//! Dispatch between several target types by a leading sub-command name.

use super::builder;
use super::schema::Schema;
use super::settings::ParserSettings;
use super::spec::names_equal;
use super::{ConfigError, Error, ParseResult};

trait VerbTarget<R> {
    fn build(&self, args: &[String], settings: &ParserSettings) -> Result<ParseResult<R>, ConfigError>;
}

struct Mapped<V, F> {
    schema: Schema<V>,
    into: F,
}

impl<V, R, F: Fn(V) -> R> VerbTarget<R> for Mapped<V, F> {
    fn build(&self, args: &[String], settings: &ParserSettings) -> Result<ParseResult<R>, ConfigError> {
        Ok(builder::build(&self.schema, args, settings)?.map(&self.into))
    }
}

/// A sub-command and the target type it parses into.
pub struct Verb<R> {
    name: String,
    aliases: Vec<String>,
    is_default: bool,
    help: String,
    hidden: bool,
    target: Box<dyn VerbTarget<R>>,
}

impl<R: 'static> Verb<R> {
    /// `into` lifts the verb's own type into the common result type, usually an enum variant.
    pub fn new<V: 'static>(
        name: impl Into<String>,
        schema: Schema<V>,
        into: impl Fn(V) -> R + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            is_default: false,
            help: String::new(),
            hidden: false,
            target: Box::new(Mapped { schema, into }),
        }
    }
}

impl<R> Verb<R> {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
    /// Used when the first argument names no verb.
    pub fn default(mut self) -> Self {
        self.is_default = true;
        self
    }
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
    pub fn is_default(&self) -> bool {
        self.is_default
    }
    pub fn help_text(&self) -> &str {
        &self.help
    }
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn matches(&self, arg: &str, case_sensitive: bool) -> bool {
        std::iter::once(&self.name)
            .chain(&self.aliases)
            .any(|n| names_equal(n, arg, case_sensitive))
    }
}

pub struct Verbs<R> {
    verbs: Vec<Verb<R>>,
}

impl<R> Default for Verbs<R> {
    fn default() -> Self {
        Self { verbs: Vec::new() }
    }
}

impl<R> Verbs<R> {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn verb(mut self, verb: Verb<R>) -> Self {
        self.verbs.push(verb);
        self
    }
    pub fn iter(&self) -> impl Iterator<Item = &Verb<R>> {
        self.verbs.iter()
    }
    pub fn find(&self, name: &str, case_sensitive: bool) -> Option<&Verb<R>> {
        self.verbs.iter().find(|v| v.matches(name, case_sensitive))
    }

    fn check_names(&self, case_sensitive: bool) -> Result<(), ConfigError> {
        let mut seen: Vec<&str> = Vec::new();
        for name in self.verbs.iter().flat_map(|v| std::iter::once(&v.name).chain(&v.aliases)) {
            if seen.iter().any(|s| names_equal(s, name, case_sensitive)) {
                return Err(ConfigError::DuplicateVerb(name.clone()));
            }
            seen.push(name);
        }
        Ok(())
    }
}

fn not_parsed<R>(error: Error) -> Result<ParseResult<R>, ConfigError> {
    Ok(ParseResult::NotParsed {
        instance: None,
        errors: vec![error],
        warnings: Vec::new(),
    })
}

/// Picks a verb by the first argument and builds it from the rest.
///
/// `help [verb]` and `version` (or `--help`/`--version`) are answered before any verb
/// is matched. An unknown first argument falls back to the default verb, which then
/// sees the whole list.
pub fn choose<R>(
    verbs: &Verbs<R>,
    args: &[String],
    settings: &ParserSettings,
) -> Result<ParseResult<R>, ConfigError> {
    let cs = settings.case_sensitive;
    verbs.check_names(cs)?;
    let mut defaults = verbs.iter().filter(|v| v.is_default);
    let default = defaults.next();
    if defaults.next().is_some() {
        return not_parsed(Error::MultipleDefaultVerbs);
    }

    let first = match args.first() {
        Some(first) => first.as_str(),
        None => {
            return match default {
                Some(verb) => verb.target.build(args, settings),
                None => not_parsed(Error::NoVerbSelected),
            }
        }
    };
    let is = |command: &str| {
        names_equal(first, command, cs) || names_equal(first, &format!("--{}", command), cs)
    };

    if settings.auto_help && is("help") {
        return not_parsed(match args.get(1).filter(|name| !name.is_empty()) {
            None => Error::HelpVerbRequested { verb: None },
            Some(name) => match verbs.find(name, cs) {
                Some(verb) => Error::HelpVerbRequested {
                    verb: Some(verb.name.clone()),
                },
                None => Error::HelpVerbNotFound(name.clone()),
            },
        });
    }
    if settings.auto_version && is("version") {
        return not_parsed(Error::VersionRequested);
    }

    match (verbs.find(first, cs), default) {
        (Some(verb), _) => {
            tracing::debug!(verb = verb.name.as_str(), "verb selected");
            verb.target.build(&args[1..], settings)
        }
        (None, Some(verb)) => {
            tracing::debug!(verb = verb.name.as_str(), "falling back to default verb");
            verb.target.build(args, settings)
        }
        (None, None) => not_parsed(Error::BadVerbSelected(first.to_string())),
    }
}
