//! Resolution of option names against a target's specifications.

use super::partition::Descriptor;
use super::spec::{OptionSpec, Specification, TargetShape};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameLookup {
    NotFound,
    /// A switch or flag counter.
    FoundNoValue,
    FoundTakesValue,
}

pub struct NameResolver<'a> {
    options: Vec<&'a OptionSpec>,
    case_sensitive: bool,
}

impl<'a> NameResolver<'a> {
    pub fn new(specs: &'a [Specification], case_sensitive: bool) -> Self {
        Self {
            options: specs.iter().filter_map(Specification::as_option).collect(),
            case_sensitive,
        }
    }

    pub fn spec_for(&self, name: &str) -> Option<&'a OptionSpec> {
        self.options
            .iter()
            .copied()
            .find(|o| o.matches(name, self.case_sensitive))
    }

    pub fn resolve(&self, name: &str) -> NameLookup {
        match self.spec_for(name) {
            None => NameLookup::NotFound,
            Some(o) if o.target_shape() == TargetShape::Switch => NameLookup::FoundNoValue,
            Some(_) => NameLookup::FoundTakesValue,
        }
    }

    pub fn separator_for(&self, name: &str) -> Option<char> {
        self.spec_for(name).and_then(|o| o.separator)
    }

    /// Shape and canonical key, so aliases of one option are grouped together.
    pub fn describe(&self, name: &str) -> Option<Descriptor> {
        self.spec_for(name).map(|o| Descriptor {
            key: o.common.key.clone(),
            shape: o.target_shape(),
            max_items: o.common.max,
        })
    }
}
