mod args;
pub use args::{Custom, FromArg};

mod value;
pub use value::ArgValue;

pub mod builder;
pub mod convert;
pub mod lookup;
pub mod mapper;
pub mod overrides;
pub mod partition;
pub mod preprocess;
pub mod rules;
pub mod schema;
pub mod settings;
pub mod spec;
pub mod token;
pub mod tokenizer;
pub mod verb;

mod parser;
pub use parser::Parser;

pub use convert::{Culture, Failure};
pub use schema::{Arguments, Schema};
pub use settings::{Dialect, ParserSettings};
pub use spec::{Kind, OptionSpec, Specification, TargetShape, ValueSpec};
pub use verb::{Verb, Verbs};

/// Names a specification in diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgRef {
    Named {
        short: Option<char>,
        long: Option<String>,
    },
    Positional {
        index: usize,
        meta: String,
    },
}

impl std::fmt::Display for ArgRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgRef::Named { long: Some(long), .. } => write!(f, "--{}", long),
            ArgRef::Named { short: Some(short), .. } => write!(f, "-{}", short),
            ArgRef::Named { .. } => f.write_str("<unnamed>"),
            ArgRef::Positional { meta, .. } if !meta.is_empty() => f.write_str(meta),
            ArgRef::Positional { index, .. } => write!(f, "value #{}", index),
        }
    }
}

/// A recoverable problem with the supplied arguments.
#[derive(Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Badly formed token `{0}`")]
    BadFormatToken(String),
    #[error("Unknown option `{0}`")]
    UnknownOption(String),
    #[error("Expected a value after option `{0}`")]
    MissingValueOption(ArgRef),
    #[error("Error parsing value of `{0}`: {1}")]
    BadFormatConversion(ArgRef, Failure),
    #[error("Error setting value of `{0}`: {1}")]
    SetValueException(ArgRef, String),
    #[error("Expected an argument named `{0}`")]
    MissingRequiredOption(ArgRef),
    #[error("Wrong number of values for `{0}`")]
    SequenceOutOfRange(ArgRef),
    #[error("Option `{0}` can't be combined with other options of set `{1}`")]
    MutuallyExclusiveSetViolation(ArgRef, String),
    #[error("At least one option of group `{group}` is required")]
    GroupValidationFailed { group: String, names: Vec<ArgRef> },
    #[error("Option `{0}` was supplied more than once")]
    RepeatedOption(ArgRef),
    #[error("Help requested")]
    HelpRequested,
    #[error("Version requested")]
    VersionRequested,
    #[error("More than one verb is marked as the default")]
    MultipleDefaultVerbs,
    #[error("No verb selected")]
    NoVerbSelected,
    #[error("Unknown verb `{0}`")]
    BadVerbSelected(String),
    #[error("Help requested{}", .verb.as_ref().map(|v| format!(" for verb `{}`", v)).unwrap_or_default())]
    HelpVerbRequested { verb: Option<String> },
    #[error("Help requested for unknown verb `{0}`")]
    HelpVerbNotFound(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Tag of an [`Error`], used to configure which errors are only warnings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadFormatToken,
    UnknownOption,
    MissingValueOption,
    BadFormatConversion,
    SetValueException,
    MissingRequiredOption,
    SequenceOutOfRange,
    MutuallyExclusiveSetViolation,
    GroupValidationFailed,
    RepeatedOption,
    HelpRequested,
    VersionRequested,
    MultipleDefaultVerbs,
    NoVerbSelected,
    BadVerbSelected,
    HelpVerbRequested,
    HelpVerbNotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BadFormatToken(_) => ErrorKind::BadFormatToken,
            Error::UnknownOption(_) => ErrorKind::UnknownOption,
            Error::MissingValueOption(_) => ErrorKind::MissingValueOption,
            Error::BadFormatConversion(..) => ErrorKind::BadFormatConversion,
            Error::SetValueException(..) => ErrorKind::SetValueException,
            Error::MissingRequiredOption(_) => ErrorKind::MissingRequiredOption,
            Error::SequenceOutOfRange(_) => ErrorKind::SequenceOutOfRange,
            Error::MutuallyExclusiveSetViolation(..) => ErrorKind::MutuallyExclusiveSetViolation,
            Error::GroupValidationFailed { .. } => ErrorKind::GroupValidationFailed,
            Error::RepeatedOption(_) => ErrorKind::RepeatedOption,
            Error::HelpRequested => ErrorKind::HelpRequested,
            Error::VersionRequested => ErrorKind::VersionRequested,
            Error::MultipleDefaultVerbs => ErrorKind::MultipleDefaultVerbs,
            Error::NoVerbSelected => ErrorKind::NoVerbSelected,
            Error::BadVerbSelected(_) => ErrorKind::BadVerbSelected,
            Error::HelpVerbRequested { .. } => ErrorKind::HelpVerbRequested,
            Error::HelpVerbNotFound(_) => ErrorKind::HelpVerbNotFound,
        }
    }

    /// Errors that replace normal output rather than describe bad input.
    pub fn stops_processing(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::HelpRequested
                | ErrorKind::VersionRequested
                | ErrorKind::HelpVerbRequested
                | ErrorKind::HelpVerbNotFound
                | ErrorKind::NoVerbSelected
                | ErrorKind::BadVerbSelected
        )
    }
}

/// A mistake in the declared specifications, not in the input.
#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("Option name `{0}` is not valid")]
    InvalidName(String),
    #[error("Long name `{0}` must be longer than one character")]
    OneCharLongName(String),
    #[error("Option name `{0}` is declared more than once")]
    DuplicateName(String),
    #[error("Target `{0}` declares `{1}` more than once")]
    DuplicateKey(String, String),
    #[error("Positional index {0} is declared more than once")]
    DuplicateIndex(usize),
    #[error("Positional index {0} is missing")]
    IndexGap(usize),
    #[error("`{0}` uses a nested optional or sequence kind")]
    UnsupportedKind(String),
    #[error("Flag counter `{0}` must have an integer kind")]
    FlagCounterNotInteger(String),
    #[error("`{0}` declares a range but isn't a sequence")]
    ScalarWithRange(String),
    #[error("`{0}` declares a minimum greater than its maximum")]
    InvalidRange(String),
    #[error("`{0}` declares a maximum of zero values")]
    ZeroRange(String),
    #[error("`{0}` declares a separator but isn't a sequence")]
    SeparatorOnNonSequence(String),
    #[error("Default value {value:?} doesn't fit `{key}`")]
    InvalidDefault { key: String, value: ArgValue },
    #[error("Constructor of `{schema}` must take exactly these parameters (in any order): {expected}")]
    ConstructorMismatch { schema: String, expected: String },
    #[error("Constructor parameter `{name}` can't be read as {expected} (got {found})")]
    ArgumentType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Constructor has no parameter named `{0}`")]
    UnknownArgument(String),
    #[error("Verb name `{0}` is declared more than once")]
    DuplicateVerb(String),
    #[error("Override for `{schema}` names unknown key `{key}`")]
    UnknownOverride { schema: String, key: String },
}

impl std::fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// The outcome of a parse attempt.
#[derive(Debug)]
pub enum ParseResult<T> {
    Parsed {
        value: T,
        /// Errors configured as non-fatal.
        warnings: Vec<Error>,
    },
    NotParsed {
        /// A default instance of the target, if one can be made.
        instance: Option<T>,
        errors: Vec<Error>,
        warnings: Vec<Error>,
    },
}

impl<T> ParseResult<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            ParseResult::Parsed { value, warnings } => ParseResult::Parsed {
                value: f(value),
                warnings,
            },
            ParseResult::NotParsed {
                instance,
                errors,
                warnings,
            } => ParseResult::NotParsed {
                instance: instance.map(f),
                errors,
                warnings,
            },
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseResult::Parsed { .. })
    }
    pub fn value(&self) -> Option<&T> {
        match self {
            ParseResult::Parsed { value, .. } => Some(value),
            ParseResult::NotParsed { .. } => None,
        }
    }
    pub fn errors(&self) -> &[Error] {
        match self {
            ParseResult::Parsed { .. } => &[],
            ParseResult::NotParsed { errors, .. } => errors,
        }
    }
    pub fn warnings(&self) -> &[Error] {
        match self {
            ParseResult::Parsed { warnings, .. } | ParseResult::NotParsed { warnings, .. } => {
                warnings
            }
        }
    }
    pub fn into_result(self) -> Result<T, Vec<Error>> {
        match self {
            ParseResult::Parsed { value, .. } => Ok(value),
            ParseResult::NotParsed { errors, .. } => Err(errors),
        }
    }

    pub fn is_help_request(&self) -> bool {
        self.errors().iter().any(|e| {
            matches!(
                e,
                Error::HelpRequested | Error::HelpVerbRequested { .. } | Error::HelpVerbNotFound(_)
            )
        })
    }
    pub fn is_version_request(&self) -> bool {
        self.errors().iter().any(|e| matches!(e, Error::VersionRequested))
    }
}

/// Warnings first, then fatal errors.
pub(crate) fn split_errors(errors: Vec<Error>, non_fatal: &[ErrorKind]) -> (Vec<Error>, Vec<Error>) {
    errors.into_iter().partition(|e| non_fatal.contains(&e.kind()))
}

/// Splits errors into fatal ones and the ones configured as warnings, then picks the outcome.
pub(crate) fn to_parse_result<T>(
    value: T,
    default: impl FnOnce() -> Option<T>,
    errors: Vec<Error>,
    non_fatal: &[ErrorKind],
) -> ParseResult<T> {
    let (warnings, errors) = split_errors(errors, non_fatal);
    if errors.is_empty() {
        ParseResult::Parsed { value, warnings }
    } else {
        ParseResult::NotParsed {
            instance: default(),
            errors,
            warnings,
        }
    }
}
