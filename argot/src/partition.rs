//! Grouping of tokens into option values, positional values and missing values.

use super::spec::TargetShape;
use super::token::Token;

/// What the partitioner needs to know about a named option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptor {
    /// Canonical key, shared by all names of one option.
    pub key: String,
    pub shape: TargetShape,
    pub max_items: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partitions {
    /// Raw values per option key, in order of first appearance.
    pub options: Vec<(String, Vec<String>)>,
    pub values: Vec<String>,
    /// Names that should have been followed by a value.
    pub missing: Vec<Token>,
}

impl Partitions {
    pub fn option(&self, key: &str) -> Option<&[String]> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    fn push_option(&mut self, key: &str, values: impl IntoIterator<Item = String>) {
        match self.options.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => existing.extend(values),
            None => self.options.push((key.to_string(), values.into_iter().collect())),
        }
    }
}

fn takes(token: Option<&Token>) -> bool {
    matches!(token, Some(Token::Value(v)) if !v.forced)
}

pub fn partition(tokens: &[Token], describe: impl Fn(&str) -> Option<Descriptor>) -> Partitions {
    let mut parts = Partitions::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;
        let name = match token {
            Token::Value(v) => {
                parts.values.push(v.text.clone());
                continue;
            }
            Token::Name(name) => name,
        };
        let desc = match describe(name) {
            Some(desc) => desc,
            None => {
                tracing::trace!(name = name.as_str(), "skipping unknown name");
                continue;
            }
        };
        match desc.shape {
            TargetShape::Switch => parts.push_option(&desc.key, Some("true".to_string())),
            TargetShape::Scalar => {
                if takes(tokens.get(i)) {
                    parts.push_option(&desc.key, Some(tokens[i].text().to_string()));
                    i += 1;
                } else {
                    parts.missing.push(token.clone());
                }
            }
            TargetShape::Sequence => {
                let mut taken = Vec::new();
                let mut separated = false;
                while takes(tokens.get(i)) && desc.max_items.map_or(true, |max| taken.len() < max) {
                    let next = &tokens[i];
                    // A plain value after a separated list starts the positionals.
                    if separated && !next.is_from_separator() {
                        break;
                    }
                    separated = next.is_from_separator();
                    taken.push(next.text().to_string());
                    i += 1;
                }
                if taken.is_empty() {
                    parts.missing.push(token.clone());
                } else {
                    parts.push_option(&desc.key, taken);
                }
            }
        }
    }
    tracing::trace!(
        options = parts.options.len(),
        values = parts.values.len(),
        missing = parts.missing.len(),
        "partitioned"
    );
    parts
}
