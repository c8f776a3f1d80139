//! Conversion of raw strings into typed values.

use super::spec::{Kind, TargetShape};
use super::ArgValue;

/// Number formatting rules for numeric conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Culture {
    pub decimal_separator: char,
    /// Stripped from floating point input.
    pub group_separator: Option<char>,
}

impl Culture {
    pub fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: Some(','),
        }
    }
    pub fn new(decimal_separator: char, group_separator: Option<char>) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Why a conversion failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    /// The kind can't be produced from a string at all.
    #[error("invalid conversion")]
    Cast,
    #[error("invalid format")]
    Format,
    #[error("value out of range")]
    Overflow,
}

/// Converts the raw strings bound to one specification.
///
/// A scalar uses only the last string. A sequence fails as a whole if any element fails.
/// A switch converts each occurrence as a boolean literal: an integer kind counts the
/// `true` occurrences, a `bool` kind keeps the last one.
pub fn convert(
    values: &[String],
    kind: &Kind,
    shape: TargetShape,
    culture: &Culture,
    ignore_case: bool,
) -> Result<ArgValue, Failure> {
    match shape {
        TargetShape::Switch => {
            let flags = values
                .iter()
                .map(|v| parse_bool(v).ok_or(Failure::Format))
                .collect::<Result<Vec<_>, _>>()?;
            if kind.is_integer() {
                let count = flags.iter().filter(|&&b| b).count() as i128;
                let (_, hi) = kind.int_range().ok_or(Failure::Cast)?;
                if count > hi {
                    return Err(Failure::Overflow);
                }
                Ok(kind.int_value(count))
            } else {
                Ok(ArgValue::Bool(flags.last().copied().unwrap_or(false)))
            }
        }
        TargetShape::Scalar => {
            let last = values.last().ok_or(Failure::Format)?;
            convert_scalar(last, kind, culture, ignore_case)
        }
        TargetShape::Sequence => {
            let element = kind.element().ok_or(Failure::Cast)?;
            values
                .iter()
                .map(|v| convert_scalar(v, element, culture, ignore_case))
                .collect::<Result<Vec<_>, _>>()
                .map(ArgValue::List)
        }
    }
}

fn convert_scalar(text: &str, kind: &Kind, culture: &Culture, ignore_case: bool) -> Result<ArgValue, Failure> {
    let result = match kind {
        Kind::Bool => parse_bool(text).map(ArgValue::Bool).ok_or(Failure::Format),
        Kind::Enum(names) => parse_enum(text, names, ignore_case),
        Kind::Optional(inner) => convert_scalar(text, inner, culture, ignore_case),
        Kind::Custom(custom) => custom.parse(text).map_err(|e| {
            tracing::trace!(kind = custom.name(), error = %e, "custom conversion failed");
            Failure::Format
        }),
        Kind::String => Ok(ArgValue::Str(text.to_string())),
        Kind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(ArgValue::Char(c)),
                _ => Err(Failure::Format),
            }
        }
        Kind::F32 | Kind::F64 => parse_float(text, matches!(kind, Kind::F32), culture),
        Kind::Sequence(_) => Err(Failure::Cast),
        int => parse_int(text, int),
    };
    if let Err(failure) = &result {
        tracing::trace!(text, ?kind, %failure, "conversion failed");
    }
    result
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Names only; numeric text is rejected even when it would index a variant.
fn parse_enum(text: &str, names: &[String], ignore_case: bool) -> Result<ArgValue, Failure> {
    let text = text.trim();
    if text.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') {
        return Err(Failure::Format);
    }
    names
        .iter()
        .find(|n| if ignore_case { n.eq_ignore_ascii_case(text) } else { *n == text })
        .map(|n| ArgValue::Enum(n.clone()))
        .ok_or(Failure::Format)
}

fn parse_int(text: &str, kind: &Kind) -> Result<ArgValue, Failure> {
    let (lo, hi) = kind.int_range().ok_or(Failure::Cast)?;
    let text = text.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Failure::Format);
    }
    // Only reachable by too many digits.
    let n: i128 = text.parse().map_err(|_| Failure::Overflow)?;
    if n < lo || n > hi {
        return Err(Failure::Overflow);
    }
    Ok(kind.int_value(n))
}

fn parse_float(text: &str, single: bool, culture: &Culture) -> Result<ArgValue, Failure> {
    let mut normalized = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if Some(c) == culture.group_separator {
            continue;
        }
        if c == culture.decimal_separator {
            normalized.push('.');
        } else if c == '.' {
            // A `.` that isn't this culture's decimal point.
            return Err(Failure::Format);
        } else {
            normalized.push(c);
        }
    }
    let x: f64 = normalized.parse().map_err(|_| Failure::Format)?;
    if single && x.is_finite() && x.abs() > f32::MAX as f64 {
        return Err(Failure::Overflow);
    }
    Ok(ArgValue::Float(x))
}
