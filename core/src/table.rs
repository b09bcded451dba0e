//! Option table construction and configuration validation.
//!
//! An [`OptionTable`] is the caller-constructed configuration object the
//! resolution engine runs against. Construction validates the whole
//! descriptor set eagerly: duplicate identities, flags shared across
//! descriptors, environment variables shared across descriptors, dangling
//! id references, and an empty primary-candidate set are all configuration
//! errors — programmer mistakes reported before any resolution runs, never
//! triggered by end-user input.
//!
//! # Examples
//!
//! ```
//! use option_resolver_core::{OptionDescriptor, OptionTable};
//!
//! let table = OptionTable::new(vec![
//!     OptionDescriptor::new("extract", "--extract").primary(),
//!     OptionDescriptor::new("output", "--output").with_arity(1, 1),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert!(table.by_flag("--extract").is_some());
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::OptionDescriptor;

/// Configuration errors detected when building an [`OptionTable`].
///
/// These are programmer errors in the declarative table, distinct from the
/// runtime resolution failures end-user input can cause.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two descriptors share an id.
    #[error("duplicate descriptor id: {0}")]
    DuplicateId(String),

    /// A flag spelling (primary or synonym) appears more than once.
    #[error("duplicate flag across descriptors: {0}")]
    DuplicateFlag(String),

    /// An environment variable (primary, synonym, or fallback) appears
    /// more than once.
    #[error("duplicate environment variable across descriptors: {0}")]
    DuplicateVariable(String),

    /// A relationship references an id that is not in the table.
    #[error("descriptor '{from}' references unknown descriptor '{to}'")]
    UnknownReference {
        /// Id of the referencing descriptor.
        from: String,
        /// The id that could not be resolved.
        to: String,
    },

    /// No descriptor in the table is marked primary.
    #[error("option table declares no primary options")]
    NoPrimaryCandidates,

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Immutable, validated collection of option descriptors.
///
/// Declaration order is preserved and drives every deterministic iteration
/// downstream: validation order, candidate listings in diagnostics, and
/// the order of resolved values and warnings.
///
/// Tables are read-only after construction and safe to share across
/// threads.
#[derive(Debug, Clone)]
pub struct OptionTable {
    descriptors: Vec<OptionDescriptor>,
    by_id: HashMap<String, usize>,
    by_flag: HashMap<String, usize>,
}

impl OptionTable {
    /// Builds a table, validating the full descriptor set.
    ///
    /// # Examples
    ///
    /// ```
    /// use option_resolver_core::{ConfigError, OptionDescriptor, OptionTable};
    ///
    /// // Duplicate flag via a synonym → configuration error.
    /// let err = OptionTable::new(vec![
    ///     OptionDescriptor::new("a", "--a").primary(),
    ///     OptionDescriptor::new("b", "--b").with_flag_synonym("--a"),
    /// ])
    /// .unwrap_err();
    /// assert!(matches!(err, ConfigError::DuplicateFlag(_)));
    /// ```
    pub fn new(descriptors: Vec<OptionDescriptor>) -> Result<Self, ConfigError> {
        let mut by_id: HashMap<String, usize> = HashMap::new();
        for (idx, d) in descriptors.iter().enumerate() {
            if by_id.insert(d.id.clone(), idx).is_some() {
                return Err(ConfigError::DuplicateId(d.id.clone()));
            }
        }

        let mut by_flag: HashMap<String, usize> = HashMap::new();
        for (idx, d) in descriptors.iter().enumerate() {
            for flag in d.all_flags() {
                if by_flag.insert(flag.to_string(), idx).is_some() {
                    return Err(ConfigError::DuplicateFlag(flag.to_string()));
                }
            }
        }

        let mut variables: HashSet<&str> = HashSet::new();
        for d in &descriptors {
            let all_vars = d
                .binding_variables()
                .chain(d.fallback_variables.iter().map(String::as_str));
            for var in all_vars {
                if !variables.insert(var) {
                    return Err(ConfigError::DuplicateVariable(var.to_string()));
                }
            }
        }

        for d in &descriptors {
            let referenced = d
                .conflicts
                .iter()
                .chain(d.dependencies.iter().flatten())
                .chain(d.deprecation_alternatives.iter());
            for id in referenced {
                if !by_id.contains_key(id) {
                    return Err(ConfigError::UnknownReference {
                        from: d.id.clone(),
                        to: id.clone(),
                    });
                }
            }
        }

        if !descriptors.iter().any(|d| d.is_primary) {
            return Err(ConfigError::NoPrimaryCandidates);
        }

        Ok(Self {
            descriptors,
            by_id,
            by_flag,
        })
    }

    /// Loads a table from a JSON array of descriptors.
    ///
    /// # Examples
    ///
    /// ```
    /// use option_resolver_core::OptionTable;
    ///
    /// let table = OptionTable::from_json(
    ///     r#"[{"id": "run", "flag": "--run", "is_primary": true}]"#,
    /// )
    /// .unwrap();
    /// assert!(table.get("run").is_some());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let descriptors: Vec<OptionDescriptor> = serde_json::from_str(json)?;
        Self::new(descriptors)
    }

    /// Serializes the descriptor set back to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.descriptors)?)
    }

    /// Looks up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&OptionDescriptor> {
        self.by_id.get(id).map(|&idx| &self.descriptors[idx])
    }

    /// Looks up a descriptor by any of its flag spellings.
    pub fn by_flag(&self, token: &str) -> Option<&OptionDescriptor> {
        self.by_flag.get(token).map(|&idx| &self.descriptors[idx])
    }

    /// Whether `token` is a recognized flag of any descriptor.
    pub fn is_flag(&self, token: &str) -> bool {
        self.by_flag.contains_key(token)
    }

    /// All descriptors in declaration order.
    pub fn descriptors(&self) -> &[OptionDescriptor] {
        &self.descriptors
    }

    /// Primary candidates in declaration order.
    pub fn primary_candidates(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.descriptors.iter().filter(|d| d.is_primary)
    }

    /// Number of descriptors in the table.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the table holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
