//! Binding of specifications to their converted values.

use super::convert::{convert, Culture};
use super::partition::Partitions;
use super::spec::{Specification, TargetShape};
use super::{ArgValue, Error};

/// One specification and what was bound to it during a parse.
#[derive(Clone, Debug)]
pub struct SpecProperty {
    pub spec: Specification,
    /// Position of the specification in its schema, which is also its setter.
    pub slot: usize,
    /// `None` when nothing in the input named it.
    pub value: Option<ArgValue>,
    /// How many raw values were supplied for it.
    pub occurrences: usize,
}

impl SpecProperty {
    fn unbound(spec: &Specification, slot: usize) -> Self {
        Self {
            spec: spec.clone(),
            slot,
            value: None,
            occurrences: 0,
        }
    }
    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }
}

/// Binds every option specification to its partition entry, matched by key.
pub fn map_options(
    specs: &[Specification],
    parts: &Partitions,
    culture: &Culture,
    ignore_case: bool,
) -> (Vec<SpecProperty>, Vec<Error>) {
    let mut props = Vec::new();
    let mut errors = Vec::new();
    for (slot, spec) in specs.iter().enumerate().filter(|(_, s)| s.is_option()) {
        let mut prop = SpecProperty::unbound(spec, slot);
        if let Some(raw) = parts.option(spec.key()) {
            prop.occurrences = raw.len();
            match convert(raw, spec.kind(), spec.target_shape(), culture, ignore_case) {
                Ok(val) => prop.value = Some(val),
                Err(failure) => errors.push(Error::BadFormatConversion(spec.arg_ref(), failure)),
            }
        }
        props.push(prop);
    }
    tracing::trace!(bound = props.iter().filter(|p| p.is_bound()).count(), "mapped options");
    (props, errors)
}

/// Binds positional specifications in index order.
///
/// A scalar takes one value; a sequence takes up to its maximum, or everything left.
pub fn map_values(
    specs: &[Specification],
    values: &[String],
    culture: &Culture,
    ignore_case: bool,
) -> (Vec<SpecProperty>, Vec<Error>) {
    let mut positional: Vec<(usize, &Specification)> = specs
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_option())
        .collect();
    positional.sort_by_key(|(_, s)| s.as_value().map_or(0, |v| v.index));

    let mut props = Vec::with_capacity(positional.len());
    let mut errors = Vec::new();
    let mut rest = values;
    for (slot, spec) in positional {
        let mut prop = SpecProperty::unbound(spec, slot);
        let shape = spec.target_shape();
        let take = match shape {
            TargetShape::Sequence => spec.common().max.unwrap_or(usize::MAX).min(rest.len()),
            _ => 1usize.min(rest.len()),
        };
        if take > 0 {
            let (raw, tail) = rest.split_at(take);
            rest = tail;
            prop.occurrences = raw.len();
            match convert(raw, spec.kind(), shape, culture, ignore_case) {
                Ok(val) => prop.value = Some(val),
                Err(failure) => errors.push(Error::BadFormatConversion(spec.arg_ref(), failure)),
            }
        }
        props.push(prop);
    }
    if !rest.is_empty() {
        tracing::debug!(leftover = rest.len(), "ignoring unbound positional values");
    }
    (props, errors)
}
