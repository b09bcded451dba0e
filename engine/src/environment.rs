//! Environment variable resolution.
//!
//! For each descriptor not bound from the command line, the primary
//! variable is checked first, then each variable synonym in declared
//! order; the first present value wins and binds the descriptor with the
//! variable name as specifier and the value as a single raw parameter.
//!
//! Fallback variables are deliberately not consulted here. They only come
//! into play while satisfying another specified option's dependency (see
//! [`resolve_fallback`]), where a hit likewise produces an
//! environment-sourced binding.

use std::collections::HashMap;

use tracing::debug;

use option_resolver_core::{OptionDescriptor, OptionTable, Source};

use crate::binding::{BindingSet, RawBinding};

/// Binds unbound descriptors from their primary/synonym variables.
pub(crate) fn resolve_environment(
    table: &OptionTable,
    env: &HashMap<String, String>,
    bound: &mut BindingSet,
) {
    for descriptor in table.descriptors() {
        if bound.contains(&descriptor.id) {
            continue;
        }
        for variable in descriptor.binding_variables() {
            let Some(value) = env.get(variable) else {
                continue;
            };
            debug!(id = %descriptor.id, variable = %variable, "Bound option from environment");
            bound.insert(RawBinding {
                id: descriptor.id.clone(),
                source: Source::Environment,
                specifier: Some(variable.to_string()),
                raw_params: vec![value.clone()],
                flags_used: Vec::new(),
            });
            break;
        }
    }
}

/// Walks a descriptor's fallback chain in order; the first present
/// variable yields an environment-sourced binding.
pub(crate) fn resolve_fallback(
    descriptor: &OptionDescriptor,
    env: &HashMap<String, String>,
) -> Option<RawBinding> {
    for variable in &descriptor.fallback_variables {
        if let Some(value) = env.get(variable) {
            debug!(id = %descriptor.id, variable = %variable, "Bound option from fallback variable");
            return Some(RawBinding {
                id: descriptor.id.clone(),
                source: Source::Environment,
                specifier: Some(variable.clone()),
                raw_params: vec![value.clone()],
                flags_used: Vec::new(),
            });
        }
    }
    None
}
