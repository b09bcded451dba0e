//! Cross-option validation over the specified set.
//!
//! Runs after binding, environment resolution, and default application,
//! against every bound descriptor regardless of source:
//!
//! 1. **Conflicts** — no specified pair may be mutually exclusive.
//! 2. **Primary** — at least one primary option must be specified.
//! 3. **Dependencies** — every specified option's OR-of-AND requirement
//!    must have one inner set fully satisfied, where an unbound member
//!    counts as satisfied if its fallback-variable chain resolves (the
//!    member is then promoted into the specified set, environment-sourced).
//!    A candidate set containing a member that conflicts with any already
//!    specified option is excluded outright rather than offered as a fix.
//! 4. **Deprecation scan** — each deprecated option bound from a
//!    non-default source yields one warning.
//!
//! Checks 1–3 abort on the first failure found (first-fail contract); the
//! scan in 4 only runs once everything validated.

use std::collections::HashMap;

use tracing::debug;

use option_resolver_core::{OptionTable, Source, SpecifiedOption, Warning};

use crate::binding::{BindingSet, RawBinding};
use crate::environment::resolve_fallback;
use crate::error::{ResolveError, Result};

/// Validates the specified set, promoting fallback-resolved dependencies
/// into `bound`. Returns the deprecation warnings in declaration order.
pub(crate) fn validate(
    table: &OptionTable,
    env: &HashMap<String, String>,
    bound: &mut BindingSet,
) -> Result<Vec<Warning>> {
    check_conflicts(table, bound)?;
    check_primary(table, bound)?;
    check_dependencies(table, env, bound)?;
    Ok(collect_warnings(table, bound))
}

fn check_conflicts(table: &OptionTable, bound: &BindingSet) -> Result<()> {
    let specified: Vec<_> = table
        .descriptors()
        .iter()
        .filter(|d| bound.contains(&d.id))
        .collect();

    for (i, a) in specified.iter().enumerate() {
        for b in &specified[i + 1..] {
            let conflicting = a.conflicts.iter().any(|c| c == &b.id)
                || b.conflicts.iter().any(|c| c == &a.id);
            if !conflicting {
                continue;
            }
            let (Some(first), Some(second)) = (bound.get(&a.id), bound.get(&b.id)) else {
                continue;
            };
            return Err(ResolveError::ConflictingOptions {
                first: first.specified(),
                second: second.specified(),
            });
        }
    }
    Ok(())
}

fn check_primary(table: &OptionTable, bound: &BindingSet) -> Result<()> {
    if table.primary_candidates().any(|d| bound.contains(&d.id)) {
        return Ok(());
    }
    Err(ResolveError::NoPrimaryOption {
        candidates: table
            .primary_candidates()
            .map(|d| d.flag.clone())
            .collect(),
    })
}

/// Whether any unbound member of `set` conflicts with a specified option.
///
/// Such a set is never offered as a missing-dependency fix: adding the
/// member would itself immediately conflict.
fn set_excluded_by_conflict(table: &OptionTable, set: &[String], bound: &BindingSet) -> bool {
    for member_id in set {
        if bound.contains(member_id) {
            continue;
        }
        let Some(member) = table.get(member_id) else {
            continue;
        };
        for specified in table.descriptors().iter().filter(|d| bound.contains(&d.id)) {
            if member.conflicts.iter().any(|c| c == &specified.id)
                || specified.conflicts.iter().any(|c| c == member_id)
            {
                return true;
            }
        }
    }
    false
}

fn check_dependencies(
    table: &OptionTable,
    env: &HashMap<String, String>,
    bound: &mut BindingSet,
) -> Result<()> {
    // Declaration-order worklist; promoted descriptors are appended so
    // their own dependencies get checked too.
    let mut worklist: Vec<String> = table
        .descriptors()
        .iter()
        .filter(|d| bound.contains(&d.id))
        .map(|d| d.id.clone())
        .collect();

    let mut next = 0;
    while next < worklist.len() {
        let id = worklist[next].clone();
        next += 1;
        let Some(descriptor) = table.get(&id) else {
            continue;
        };
        if descriptor.dependencies.is_empty() {
            continue;
        }

        let viable: Vec<&Vec<String>> = descriptor
            .dependencies
            .iter()
            .filter(|set| {
                let excluded = set_excluded_by_conflict(table, set, bound);
                if excluded {
                    debug!(id = %id, set = ?set, "Dependency set excluded by conflict");
                }
                !excluded
            })
            .collect();

        let mut satisfied = false;
        for set in &viable {
            let mut promotions: Vec<RawBinding> = Vec::new();
            let mut resolvable = true;
            for member_id in set.iter() {
                if bound.contains(member_id) || promotions.iter().any(|p| &p.id == member_id) {
                    continue;
                }
                let Some(member) = table.get(member_id) else {
                    resolvable = false;
                    break;
                };
                match resolve_fallback(member, env) {
                    Some(binding) => promotions.push(binding),
                    None => {
                        resolvable = false;
                        break;
                    }
                }
            }
            if resolvable {
                for binding in promotions {
                    debug!(id = %id, member = %binding.id, "Dependency satisfied via fallback");
                    worklist.push(binding.id.clone());
                    bound.insert(binding);
                }
                satisfied = true;
                break;
            }
        }

        if !satisfied {
            let candidate_sets: Vec<Vec<String>> = viable
                .iter()
                .map(|set| {
                    set.iter()
                        .filter(|m| !bound.contains(m))
                        .map(|m| {
                            table
                                .get(m)
                                .map(|d| d.flag.clone())
                                .unwrap_or_else(|| m.clone())
                        })
                        .collect()
                })
                .collect();
            return Err(ResolveError::MissingDependencies {
                id,
                candidate_sets,
                specified: specified_set(table, bound),
            });
        }
    }
    Ok(())
}

fn specified_set(table: &OptionTable, bound: &BindingSet) -> Vec<SpecifiedOption> {
    table
        .descriptors()
        .iter()
        .filter_map(|d| bound.get(&d.id))
        .map(|b| b.specified())
        .collect()
}

fn collect_warnings(table: &OptionTable, bound: &BindingSet) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for descriptor in table.descriptors() {
        if !descriptor.is_deprecated {
            continue;
        }
        let Some(binding) = bound.get(&descriptor.id) else {
            continue;
        };
        if binding.source == Source::Default {
            continue;
        }
        let Some(specifier) = binding.specifier.clone() else {
            continue;
        };
        warnings.push(Warning {
            id: descriptor.id.clone(),
            source: binding.source,
            specifier,
            alternatives: descriptor
                .deprecation_alternatives
                .iter()
                .filter_map(|alt| table.get(alt).map(|d| d.flag.clone()))
                .collect(),
        });
    }
    warnings
}
