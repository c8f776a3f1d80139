//! Lexing of raw arguments into name and value tokens.

use std::sync::OnceLock;

use regex::Regex;

use super::lookup::{NameLookup, NameResolver};
use super::settings::{Dialect, ParserSettings};
use super::token::Token;
use super::Error;

/// Getopt-style tokenization.
///
/// A value-taking option swallows the next argument (or the rest of its cluster) as its
/// value, so that argument is never read as an option itself.
pub fn tokenize(
    args: &[String],
    resolve: impl Fn(&str) -> NameLookup,
    allow_dash_dash: bool,
    posixly_correct: bool,
    ignore_unknown: bool,
) -> (Vec<Token>, Vec<Error>) {
    let mut tokens = Vec::with_capacity(args.len());
    let mut errors = Vec::new();
    let unknown = |name: &str, errors: &mut Vec<Error>| {
        if ignore_unknown {
            tracing::trace!(name, "ignoring unknown option");
        } else {
            errors.push(Error::UnknownOption(name.to_string()));
        }
    };

    let mut force_values = false;
    let mut consume_next = 0usize;
    for arg in args {
        let arg = arg.as_str();
        if force_values {
            tokens.push(Token::forced(arg));
        } else if consume_next > 0 {
            tokens.push(Token::value(arg));
            consume_next -= 1;
        } else if arg == "--" {
            if allow_dash_dash {
                force_values = true;
            } else {
                tokens.push(Token::value(arg));
                force_values = posixly_correct;
            }
        } else if arg == "-" {
            tokens.push(Token::value(arg));
            force_values = posixly_correct;
        } else if let Some(text) = arg.strip_prefix("--") {
            let (name, value) = match text.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (text, None),
            };
            if name.trim().is_empty() || name.contains(' ') {
                errors.push(Error::BadFormatToken(arg.to_string()));
                continue;
            }
            match resolve(name) {
                NameLookup::NotFound => unknown(name, &mut errors),
                NameLookup::FoundNoValue => tokens.push(Token::name(name)),
                NameLookup::FoundTakesValue => {
                    tokens.push(Token::name(name));
                    match value {
                        // `--name=` assigns the empty string.
                        Some(value) => tokens.push(Token::assigned(value)),
                        None => consume_next += 1,
                    }
                }
            }
        } else if let Some(cluster) = arg.strip_prefix('-') {
            if cluster.starts_with(|c: char| c.is_ascii_digit()) {
                // A negative number.
                tokens.push(Token::value(arg));
                continue;
            }
            for (i, c) in cluster.char_indices() {
                let mut buf = [0; 4];
                let name: &str = c.encode_utf8(&mut buf);
                match resolve(name) {
                    NameLookup::NotFound => unknown(name, &mut errors),
                    NameLookup::FoundNoValue => tokens.push(Token::name(name)),
                    NameLookup::FoundTakesValue => {
                        tokens.push(Token::name(name));
                        let rest = &cluster[i + c.len_utf8()..];
                        if rest.is_empty() {
                            consume_next += 1;
                        } else {
                            tokens.push(Token::value(rest));
                        }
                        break;
                    }
                }
            }
        } else {
            tokens.push(Token::value(arg));
            force_values = posixly_correct;
        }
    }
    tracing::trace!(tokens = tokens.len(), errors = errors.len(), "tokenized (getopt)");
    (tokens, errors)
}

fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([^=]+)=([^ ].*)$").expect("valid pattern"))
}

/// Strict tokenization.
///
/// Names are emitted as written and values are left for the partitioner to pair up.
/// `--` splits the list up front when enabled; everything after it is forced.
pub fn tokenize_strict(
    args: &[String],
    resolve: impl Fn(&str) -> NameLookup,
    allow_dash_dash: bool,
    ignore_unknown: bool,
) -> (Vec<Token>, Vec<Error>) {
    let (head, forced) = match args.iter().position(|a| a == "--") {
        Some(at) if allow_dash_dash => (&args[..at], &args[at + 1..]),
        _ => (args, &args[args.len()..]),
    };

    let mut tokens = Vec::with_capacity(args.len());
    let mut errors = Vec::new();
    for arg in head {
        if let Some(text) = arg.strip_prefix("--") {
            strict_long(arg, text, &mut tokens, &mut errors);
        } else if let Some(cluster) = arg.strip_prefix('-') {
            strict_short(arg, cluster, &resolve, &mut tokens);
        } else {
            tokens.push(Token::value(arg.as_str()));
        }
    }

    if ignore_unknown {
        // Drop `--unknown=value` pairs along with the name.
        let mut kept: Vec<Token> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let after_unknown = kept
                .last()
                .map_or(false, |p| p.is_name() && resolve(p.text()) == NameLookup::NotFound);
            if !(token.is_explicitly_assigned() && after_unknown) {
                kept.push(token);
            }
        }
        tokens = kept;
    }

    let mut kept = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.is_name() && resolve(token.text()) == NameLookup::NotFound {
            if ignore_unknown {
                tracing::trace!(name = token.text(), "ignoring unknown option");
            } else {
                errors.push(Error::UnknownOption(token.text().to_string()));
            }
        } else {
            kept.push(token);
        }
    }
    kept.extend(forced.iter().map(|a| Token::forced(a.as_str())));
    tracing::trace!(tokens = kept.len(), errors = errors.len(), "tokenized (strict)");
    (kept, errors)
}

fn strict_long(arg: &str, text: &str, tokens: &mut Vec<Token>, errors: &mut Vec<Error>) {
    match text.find('=') {
        // A bare `--` when dash-dash handling is off.
        _ if text.is_empty() => {}
        None => tokens.push(Token::name(text)),
        Some(0) => errors.push(Error::BadFormatToken(arg.to_string())),
        Some(_) => match assignment_pattern().captures(text) {
            Some(caps) => {
                tokens.push(Token::name(&caps[1]));
                tokens.push(Token::assigned(&caps[2]));
            }
            None => errors.push(Error::BadFormatToken(arg.to_string())),
        },
    }
}

fn strict_short(arg: &str, cluster: &str, resolve: &impl Fn(&str) -> NameLookup, tokens: &mut Vec<Token>) {
    if cluster.is_empty() || cluster.starts_with(|c: char| c.is_ascii_digit()) {
        tokens.push(Token::value(arg));
        return;
    }
    let mut consumed = 0;
    for (i, c) in cluster.char_indices() {
        let mut buf = [0; 4];
        let name: &str = c.encode_utf8(&mut buf);
        let found = resolve(name);
        // The first character is always a name.
        if i > 0 && found == NameLookup::NotFound {
            break;
        }
        tokens.push(Token::name(name));
        consumed = i + c.len_utf8();
        if found == NameLookup::FoundTakesValue {
            break;
        }
    }
    if consumed < cluster.len() {
        tokens.push(Token::value(&cluster[consumed..]));
    }
}

/// Splits the first value after each option that declares a separator.
pub fn explode(tokens: Vec<Token>, separator_for: impl Fn(&str) -> Option<char>) -> Vec<Token> {
    let mut exploded = Vec::with_capacity(tokens.len());
    let mut pending = None;
    for token in tokens {
        match token {
            Token::Name(ref name) => {
                pending = separator_for(name);
                exploded.push(token);
            }
            Token::Value(ref value) => {
                match pending.take() {
                    Some(sep) if !value.forced && value.text.contains(sep) => {
                        exploded.extend(value.text.split(sep).map(Token::from_separator));
                    }
                    _ => exploded.push(token),
                }
            }
        }
    }
    exploded
}

/// Runs the configured dialect followed by list explosion.
pub struct Tokenizer<'a> {
    names: &'a NameResolver<'a>,
    settings: &'a ParserSettings,
}

impl<'a> Tokenizer<'a> {
    pub fn new(names: &'a NameResolver<'a>, settings: &'a ParserSettings) -> Self {
        Self { names, settings }
    }

    pub fn run(&self, args: &[String]) -> (Vec<Token>, Vec<Error>) {
        let s = self.settings;
        let resolve = |name: &str| self.names.resolve(name);
        let (tokens, errors) = match s.dialect {
            Dialect::Getopt => tokenize(
                args,
                resolve,
                s.enable_dash_dash,
                s.posixly_correct,
                s.ignore_unknown_arguments,
            ),
            Dialect::Strict => {
                tokenize_strict(args, resolve, s.enable_dash_dash, s.ignore_unknown_arguments)
            }
        };
        let tokens = explode(tokens, |name| self.names.separator_for(name));
        (tokens, errors)
    }
}
