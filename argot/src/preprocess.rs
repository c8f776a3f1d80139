//! Checks run against the raw arguments before tokenizing.

use super::settings::ParserSettings;
use super::spec::names_equal;
use super::Error;

/// Inspects the raw argument list; any error it reports ends the parse.
pub trait Preprocessor {
    fn check(&self, args: &[String], case_sensitive: bool) -> Vec<Error>;
}

fn first_is(args: &[String], switch: &str, case_sensitive: bool) -> bool {
    args.first().map_or(false, |a| names_equal(a, switch, case_sensitive))
}

/// `--help` as the first argument.
pub struct HelpSwitch;

impl Preprocessor for HelpSwitch {
    fn check(&self, args: &[String], case_sensitive: bool) -> Vec<Error> {
        if first_is(args, "--help", case_sensitive) {
            vec![Error::HelpRequested]
        } else {
            Vec::new()
        }
    }
}

/// `--version` as the first argument.
pub struct VersionSwitch;

impl Preprocessor for VersionSwitch {
    fn check(&self, args: &[String], case_sensitive: bool) -> Vec<Error> {
        if first_is(args, "--version", case_sensitive) {
            vec![Error::VersionRequested]
        } else {
            Vec::new()
        }
    }
}

/// The chain enabled by `settings`.
pub fn standard(settings: &ParserSettings) -> Vec<Box<dyn Preprocessor>> {
    let mut chain: Vec<Box<dyn Preprocessor>> = Vec::new();
    if settings.auto_help {
        chain.push(Box::new(HelpSwitch));
    }
    if settings.auto_version {
        chain.push(Box::new(VersionSwitch));
    }
    chain
}

/// Runs `chain` in order and returns the errors of the first one that reports any.
pub fn preprocess(args: &[String], chain: &[Box<dyn Preprocessor>], case_sensitive: bool) -> Vec<Error> {
    for pre in chain {
        let errors = pre.check(args, case_sensitive);
        if !errors.is_empty() {
            tracing::debug!(?errors, "preprocessor short-circuited the parse");
            return errors;
        }
    }
    Vec::new()
}
