use super::{Culture, ErrorKind};

/// Which tokenizer rules to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// GNU getopt style: value-taking options swallow the next argument,
    /// `-sFOO` is an inline value, unknown cluster characters are skipped.
    Getopt,
    /// Names are emitted as written and paired with values later;
    /// `--name=value` must match `name=non-space...`.
    Strict,
}

#[derive(Clone, Debug)]
pub struct ParserSettings {
    /// Compare option and verb names case-sensitively.
    pub case_sensitive: bool,
    pub case_insensitive_enum_values: bool,
    pub culture: Culture,
    pub ignore_unknown_arguments: bool,
    /// Treat everything after a literal `--` as values.
    pub enable_dash_dash: bool,
    /// Stop option parsing at the first positional argument.
    pub posixly_correct: bool,
    /// Allow a scalar option to be supplied more than once; the last one wins.
    pub allow_multi_instance: bool,
    /// Error kinds reported as warnings instead of failing the parse.
    pub non_fatal: Vec<ErrorKind>,
    pub auto_help: bool,
    pub auto_version: bool,
    pub dialect: Dialect,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            case_insensitive_enum_values: false,
            culture: Culture::invariant(),
            ignore_unknown_arguments: false,
            enable_dash_dash: true,
            posixly_correct: false,
            allow_multi_instance: true,
            non_fatal: Vec::new(),
            auto_help: true,
            auto_version: true,
            dialect: Dialect::Getopt,
        }
    }
}

impl ParserSettings {
    /// The strict dialect, with `--` and repeated scalars treated as input errors.
    pub fn strict() -> Self {
        Self {
            enable_dash_dash: false,
            allow_multi_instance: false,
            dialect: Dialect::Strict,
            ..Self::default()
        }
    }
}
