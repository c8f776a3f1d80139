use super::schema::Schema;
use super::settings::ParserSettings;
use super::verb::{self, Verbs};
use super::{builder, ConfigError, ParseResult};

/// Parses argument lists with one set of [`ParserSettings`].
///
/// Arguments are taken as given; strip the program name first.
#[derive(Clone, Debug, Default)]
pub struct Parser {
    settings: ParserSettings,
}

fn collect<I>(args: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    args.into_iter().map(Into::into).collect()
}

impl Parser {
    pub fn new(settings: ParserSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    pub fn parse<T, I>(&self, schema: &Schema<T>, args: I) -> Result<ParseResult<T>, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        builder::build(schema, &collect(args), &self.settings)
    }

    pub fn parse_verbs<R, I>(&self, verbs: &Verbs<R>, args: I) -> Result<ParseResult<R>, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        verb::choose(verbs, &collect(args), &self.settings)
    }
}
