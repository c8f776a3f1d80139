//! Checks that span several specifications, run after the target is built.

use std::collections::BTreeMap;

use super::mapper::SpecProperty;
use super::spec::{Specification, TargetShape};
use super::Error;

pub fn validate(props: &[SpecProperty], allow_multi_instance: bool) -> Vec<Error> {
    let mut errors = Vec::new();
    mutually_exclusive(props, &mut errors);
    groups(props, &mut errors);
    required(props, &mut errors);
    ranges(props, &mut errors);
    if !allow_multi_instance {
        single(props, &mut errors);
    }
    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "validation failed");
    }
    errors
}

fn set_of(prop: &SpecProperty) -> Option<&str> {
    prop.spec.as_option().and_then(|o| o.set_name.as_deref())
}
fn group_of(prop: &SpecProperty) -> Option<&str> {
    prop.spec.as_option().and_then(|o| o.group.as_deref())
}

fn mutually_exclusive(props: &[SpecProperty], errors: &mut Vec<Error>) {
    let mut sets: BTreeMap<&str, Vec<&SpecProperty>> = BTreeMap::new();
    for prop in props.iter().filter(|p| p.is_bound()) {
        if let Some(set) = set_of(prop) {
            sets.entry(set).or_default().push(prop);
        }
    }
    for (set, bound) in sets {
        if bound.len() > 1 {
            errors.extend(
                bound
                    .iter()
                    .map(|p| Error::MutuallyExclusiveSetViolation(p.spec.arg_ref(), set.to_string())),
            );
        }
    }
}

fn groups(props: &[SpecProperty], errors: &mut Vec<Error>) {
    let mut groups: BTreeMap<&str, Vec<&SpecProperty>> = BTreeMap::new();
    for prop in props {
        if let Some(group) = group_of(prop) {
            groups.entry(group).or_default().push(prop);
        }
    }
    for (group, members) in groups {
        if !members.iter().any(|p| p.is_bound()) {
            errors.push(Error::GroupValidationFailed {
                group: group.to_string(),
                names: members.iter().map(|p| p.spec.arg_ref()).collect(),
            });
        }
    }
}

fn required(props: &[SpecProperty], errors: &mut Vec<Error>) {
    for prop in props {
        let common = prop.spec.common();
        if !common.required || prop.is_bound() || common.default.is_some() || group_of(prop).is_some() {
            continue;
        }
        let set_satisfied = set_of(prop).map_or(false, |set| {
            props.iter().any(|p| p.is_bound() && set_of(p) == Some(set))
        });
        if !set_satisfied {
            errors.push(Error::MissingRequiredOption(prop.spec.arg_ref()));
        }
    }
}

fn ranges(props: &[SpecProperty], errors: &mut Vec<Error>) {
    for prop in props {
        if prop.spec.target_shape() != TargetShape::Sequence {
            continue;
        }
        let common = prop.spec.common();
        if let Some(len) = prop.value.as_ref().and_then(|v| v.len()) {
            if common.min.map_or(false, |min| len < min) || common.max.map_or(false, |max| len > max) {
                errors.push(Error::SequenceOutOfRange(prop.spec.arg_ref()));
            }
        }
    }
}

/// Scalars and plain switches supplied more than once.
fn single(props: &[SpecProperty], errors: &mut Vec<Error>) {
    for prop in props {
        let Specification::Option(o) = &prop.spec else { continue };
        if o.flag_counter || prop.spec.target_shape() == TargetShape::Sequence {
            continue;
        }
        if prop.occurrences > 1 {
            errors.push(Error::RepeatedOption(o.arg_ref()));
        }
    }
}
