//! Per-thread replacement of specifications, for tests that need to tweak one
//! attribute of an existing schema.

use std::cell::RefCell;
use std::collections::HashMap;

use super::spec::{self, Specification};
use super::ConfigError;

thread_local! {
    static OVERRIDES: RefCell<HashMap<String, Vec<Specification>>> = RefCell::new(HashMap::new());
}

/// Replaces the specifications of `schema` that share a key with one of `specs`,
/// for every parse on the current thread until [`reset`].
pub fn set(schema: impl Into<String>, specs: Vec<Specification>) {
    let schema = schema.into();
    tracing::debug!(schema = schema.as_str(), count = specs.len(), "installing overrides");
    OVERRIDES.with(|o| o.borrow_mut().insert(schema, specs));
}

pub fn reset() {
    OVERRIDES.with(|o| o.borrow_mut().clear());
}

/// `None` when nothing is overridden for `schema`.
pub(crate) fn apply(
    schema: &str,
    specs: &[Specification],
) -> Result<Option<Vec<Specification>>, ConfigError> {
    let replacements = match OVERRIDES.with(|o| o.borrow().get(schema).cloned()) {
        Some(r) => r,
        None => return Ok(None),
    };
    let mut specs = specs.to_vec();
    for replacement in replacements {
        let slot = specs
            .iter_mut()
            .find(|s| s.key().eq_ignore_ascii_case(replacement.key()))
            .ok_or_else(|| ConfigError::UnknownOverride {
                schema: schema.to_string(),
                key: replacement.key().to_string(),
            })?;
        *slot = replacement;
    }
    spec::guard(schema, &mut specs)?;
    Ok(Some(specs))
}
