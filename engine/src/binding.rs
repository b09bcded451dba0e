//! Intermediate binding state shared by the pipeline stages.

use std::collections::HashMap;

use option_resolver_core::{Source, SpecifiedOption};

/// One binding before parameter processing.
#[derive(Debug, Clone)]
pub(crate) struct RawBinding {
    pub(crate) id: String,
    pub(crate) source: Source,
    /// Literal flag or variable used; `None` iff `source` is `Default`.
    pub(crate) specifier: Option<String>,
    pub(crate) raw_params: Vec<String>,
    /// Every flag spelling seen for this descriptor on the command line.
    pub(crate) flags_used: Vec<String>,
}

impl RawBinding {
    pub(crate) fn specified(&self) -> SpecifiedOption {
        SpecifiedOption {
            id: self.id.clone(),
            source: self.source,
            specifier: self.specifier.clone(),
        }
    }
}

/// The evolving specified-option set, keyed by descriptor id.
///
/// Insertion order is preserved for inspection, but deterministic outputs
/// (validation order, warnings, the final resolution) always iterate the
/// table's declaration order instead.
#[derive(Debug, Default)]
pub(crate) struct BindingSet {
    bindings: Vec<RawBinding>,
    index: HashMap<String, usize>,
}

impl BindingSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, binding: RawBinding) {
        debug_assert!(!self.index.contains_key(&binding.id));
        self.index.insert(binding.id.clone(), self.bindings.len());
        self.bindings.push(binding);
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub(crate) fn get(&self, id: &str) -> Option<&RawBinding> {
        self.index.get(id).map(|&idx| &self.bindings[idx])
    }
}
