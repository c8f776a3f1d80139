use argot::{Kind, OptionSpec, Parser, Schema, ValueSpec, Verb, Verbs};

enum Cargo {
    New(String),
    Build { target: Option<String>, release: bool },
    Clippy { pedantic: bool },
}

fn verbs() -> Result<Verbs<Cargo>, argot::ConfigError> {
    let new = Schema::immutable("New", &["name"], |args| args.take::<String>("name"))
        .value(ValueSpec::new("name", 0, Kind::String).meta_name("NAME").required())
        .build()?;
    let build = Schema::immutable("Build", &["target", "release"], |args| {
        Ok(Cargo::Build {
            target: args.take("target")?,
            release: args.take("release")?,
        })
    })
    .option(
        OptionSpec::new("target", Kind::optional(Kind::String))
            .long("target")
            .help("the target platform"),
    )
    .option(
        OptionSpec::new("release", Kind::Bool)
            .short('r')
            .long("release")
            .help("build for release mode"),
    )
    .build()?;
    let clippy = Schema::immutable("Clippy", &["pedantic"], |args| {
        Ok(Cargo::Clippy {
            pedantic: args.take("pedantic")?,
        })
    })
    .option(OptionSpec::new("pedantic", Kind::Bool).long("pedantic"))
    .build()?;

    Ok(Verbs::new()
        .verb(Verb::new("new", new, Cargo::New))
        .verb(Verb::new("build", build, |b| b).alias("b").help("Build the current crate.").default())
        .verb(Verb::new("clippy", clippy, |c| c).help("Lint your code")))
}

fn main() -> Result<(), argot::ConfigError> {
    let verbs = verbs()?;
    let res = Parser::default().parse_verbs(&verbs, std::env::args().skip(1))?;
    if res.is_help_request() {
        for verb in verbs.iter().filter(|v| !v.is_hidden()) {
            eprintln!("  {:<8} {}", verb.name(), verb.help_text());
        }
        return Ok(());
    }
    match res.into_result() {
        Ok(Cargo::New(name)) => eprintln!("Creating new crate `{}`", name),
        Ok(Cargo::Build { target, release }) => {
            let target = target.as_deref().unwrap_or("windows");
            if release {
                eprintln!("Building for {} in release", target);
            } else {
                eprintln!("Building for {}", target);
            }
        }
        Ok(Cargo::Clippy { pedantic: true }) => eprintln!("Annoyingly checking your code."),
        Ok(Cargo::Clippy { pedantic: false }) => eprintln!("Checking your code."),
        Err(errors) => {
            for err in errors {
                eprintln!("error: {}", err);
            }
            std::process::exit(1);
        }
    }
    Ok(())
}
