use argot::{Custom, Kind, OptionSpec, ParseResult, Parser, Schema, ValueSpec};
use regex::Regex;

#[derive(Default)]
struct Grep {
    pattern: Option<Regex>,
    files: Vec<String>,
    invert: bool,
    context: u32,
}

fn schema() -> Result<Schema<Grep>, argot::ConfigError> {
    Schema::mutable("Grep", Grep::default)
        .value(
            ValueSpec::new("pattern", 0, Kind::parsed::<Regex>()).meta_name("PATTERN").required(),
            |g: &mut Grep, v: Custom<Regex>| g.pattern = Some(v.0),
        )
        .value(
            ValueSpec::new("files", 1, Kind::sequence(Kind::String)).meta_name("FILE"),
            |g: &mut Grep, v: Vec<String>| g.files = v,
        )
        .option(
            OptionSpec::new("invert", Kind::Bool).short('v').long("invert-match"),
            |g: &mut Grep, v: bool| g.invert = v,
        )
        .option(
            OptionSpec::new("context", Kind::U32).short('C').long("context").default_value(0u32),
            |g: &mut Grep, v: u32| g.context = v,
        )
        .build()
}

fn main() -> Result<(), argot::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter("argot=debug,grep=info")
        .with_writer(std::io::stderr)
        .init();

    let grep = match Parser::default().parse(&schema()?, std::env::args().skip(1))? {
        ParseResult::Parsed { value, .. } => value,
        res if res.is_help_request() => {
            eprintln!("usage: grep [-v] [-C N] PATTERN [FILE...]");
            return Ok(());
        }
        res => {
            for err in res.errors() {
                eprintln!("error: {}", err);
            }
            std::process::exit(2);
        }
    };

    let Grep { pattern, files, invert, context } = grep;
    let Some(pattern) = pattern else { return Ok(()) };
    tracing::info!(files = files.len(), context, "searching");
    if invert {
        eprintln!("Searching for anything that doesn't match `{}` in {:?}", pattern, files);
    } else {
        eprintln!("Searching for `{}` in {:?}", pattern, files);
    }
    Ok(())
}
