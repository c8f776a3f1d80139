//! Fake targets shared by the scenario tests.

use std::str::FromStr;

use argot::{Custom, Kind, OptionSpec, Schema, ValueSpec, Verb, Verbs};

#[cfg(test)]
macro_rules! args {
    ($($st: literal)*) => {{
        let args: Vec<String> = vec![$($st.to_string()),*];
        args
    }}
}

#[cfg(test)]
macro_rules! parse {
    ($schema: expr, $($st: literal)*) => {
        argot::Parser::default().parse(&$schema, args!($($st)*)).unwrap()
    };
    ($parser: expr; $schema: expr, $($st: literal)*) => {
        $parser.parse(&$schema, args!($($st)*)).unwrap()
    };
}

/// `Ok(value)` or the fatal errors, so `.unwrap()` panics with their messages.
#[cfg(test)]
macro_rules! process {
    ($($tt: tt)*) => {
        parse!($($tt)*).into_result()
    };
}

#[cfg(test)]
mod dialects;
#[cfg(test)]
mod immutable;
#[cfg(test)]
mod mutable;
#[cfg(test)]
mod verbs;

#[derive(PartialEq, Debug, Default, Clone)]
pub struct SimpleOptions {
    pub string_value: String,
    pub short_and_long: String,
    pub int_sequence: Vec<i32>,
    pub bool_value: bool,
    pub long_value: i64,
}

pub fn simple_options() -> Schema<SimpleOptions> {
    Schema::mutable("SimpleOptions", SimpleOptions::default)
        .option(
            OptionSpec::new("StringValue", Kind::String)
                .long("stringvalue")
                .help("Define a string value here."),
            |o: &mut SimpleOptions, v: String| o.string_value = v,
        )
        .option(
            OptionSpec::new("ShortAndLong", Kind::String).short('s').long("shortandlong"),
            |o: &mut SimpleOptions, v: String| o.short_and_long = v,
        )
        .option(
            OptionSpec::new("IntSequence", Kind::sequence(Kind::I32))
                .short('i')
                .min(3)
                .max(4)
                .separator(','),
            |o: &mut SimpleOptions, v: Vec<i32>| o.int_sequence = v,
        )
        .option(
            OptionSpec::new("BoolValue", Kind::Bool).short('x'),
            |o: &mut SimpleOptions, v: bool| o.bool_value = v,
        )
        .value(
            ValueSpec::new("LongValue", 0, Kind::I64),
            |o: &mut SimpleOptions, v: i64| o.long_value = v,
        )
        .build()
        .expect("valid schema")
}

#[derive(PartialEq, Debug)]
pub struct ImmutableOptions {
    pub string_value: String,
    pub int_sequence: Vec<i32>,
    pub bool_value: bool,
    pub long_value: i64,
}

/// Constructor parameters listed in a different order than the options.
pub fn immutable_options() -> Schema<ImmutableOptions> {
    Schema::immutable(
        "ImmutableOptions",
        &["intSequence", "boolValue", "stringValue", "longValue"],
        |args| {
            Ok(ImmutableOptions {
                string_value: args.take("stringValue")?,
                int_sequence: args.take("intSequence")?,
                bool_value: args.take("boolValue")?,
                long_value: args.take("longValue")?,
            })
        },
    )
    .option(OptionSpec::new("StringValue", Kind::String).help("Define a string value here."))
    .option(OptionSpec::new("IntSequence", Kind::sequence(Kind::I32)).short('i').min(3).max(4))
    .option(OptionSpec::new("BoolValue", Kind::Bool).short('x'))
    .value(ValueSpec::new("LongValue", 0, Kind::I64))
    .build()
    .expect("valid schema")
}

#[derive(PartialEq, Debug, Default)]
pub struct Picky {
    pub value: String,
}

/// A setter that only accepts `good`.
pub fn picky_options() -> Schema<Picky> {
    Schema::mutable("Picky", Picky::default)
        .try_option(
            OptionSpec::new("OptValue", Kind::String).short('e'),
            |o: &mut Picky, v: String| {
                if v != "good" {
                    return Err("Invalid value, only accept 'good' value");
                }
                o.value = v;
                Ok(())
            },
        )
        .build()
        .expect("valid schema")
}

/// A type with nothing but a string constructor.
#[derive(PartialEq, Debug, Clone)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

#[derive(Debug)]
pub struct EndpointError;

impl std::fmt::Display for EndpointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("expected host:port")
    }
}
impl std::error::Error for EndpointError {}

impl FromStr for Endpoint {
    type Err = EndpointError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s.rsplit_once(':').ok_or(EndpointError)?;
        Ok(Endpoint {
            host: host.to_string(),
            port: port.parse().map_err(|_| EndpointError)?,
        })
    }
}

#[derive(PartialEq, Debug, Default)]
pub struct Network {
    pub endpoint: Option<Endpoint>,
    pub retries: Option<u8>,
    pub color: String,
}

pub fn network_options() -> Schema<Network> {
    Schema::mutable("Network", Network::default)
        .option(
            OptionSpec::new("endpoint", Kind::parsed::<Endpoint>()).short('e'),
            |o: &mut Network, v: Option<Custom<Endpoint>>| o.endpoint = v.map(|c| c.0),
        )
        .option(
            OptionSpec::new("retries", Kind::optional(Kind::U8)).short('r'),
            |o: &mut Network, v: Option<u8>| o.retries = v,
        )
        .option(
            OptionSpec::new("color", Kind::enumeration(["Red", "Green", "Blue"]))
                .short('c')
                .default_value("Green"),
            |o: &mut Network, v: String| o.color = v,
        )
        .build()
        .expect("valid schema")
}

#[derive(PartialEq, Debug)]
pub enum Git {
    Add { patch: bool, force: bool, file_name: String },
    Commit { patch: bool, amend: bool },
    Clone { no_hard_links: bool, quiet: bool, urls: Vec<String> },
}

pub fn git_verbs() -> Verbs<Git> {
    let add = Schema::immutable("Add", &["patch", "force", "fileName"], |args| {
        Ok(Git::Add {
            patch: args.take("patch")?,
            force: args.take("force")?,
            file_name: args.take("fileName")?,
        })
    })
    .option(OptionSpec::new("patch", Kind::Bool).short('p').long("patch").set("mode"))
    .option(OptionSpec::new("force", Kind::Bool).short('f').long("force").set("mode"))
    .value(ValueSpec::new("fileName", 0, Kind::String))
    .build()
    .expect("valid schema");

    let commit = Schema::immutable("Commit", &["patch", "amend"], |args| {
        Ok(Git::Commit {
            patch: args.take("patch")?,
            amend: args.take("amend")?,
        })
    })
    .option(OptionSpec::new("patch", Kind::Bool).short('p').long("patch"))
    .option(OptionSpec::new("amend", Kind::Bool).long("amend"))
    .build()
    .expect("valid schema");

    let clone = Schema::immutable("Clone", &["noHardLinks", "quiet", "urls"], |args| {
        Ok(Git::Clone {
            no_hard_links: args.take("noHardLinks")?,
            quiet: args.take("quiet")?,
            urls: args.take("urls")?,
        })
    })
    .option(OptionSpec::new("noHardLinks", Kind::Bool).long("no-hardlinks"))
    .option(OptionSpec::new("quiet", Kind::Bool).short('q').long("quiet"))
    .value(ValueSpec::new("urls", 0, Kind::sequence(Kind::String)))
    .build()
    .expect("valid schema");

    Verbs::new()
        .verb(Verb::new("add", add, |g| g).help("Add file contents to the index."))
        .verb(Verb::new("commit", commit, |g| g).alias("ci"))
        .verb(Verb::new("clone", clone, |g| g))
}
