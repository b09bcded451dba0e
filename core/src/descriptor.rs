//! Descriptor and binding type definitions for option resolution.
//!
//! This module defines the core data model used to describe configurable
//! options declaratively. The types are designed for serialization with
//! [`serde`] so descriptor tables can be written as JSON and loaded at
//! startup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a bound option value came from.
///
/// Determines how the specifier of a binding is interpreted for
/// diagnostics: a flag for [`CommandLine`](Source::CommandLine), a
/// variable name for [`Environment`](Source::Environment), and nothing at
/// all for [`Default`](Source::Default).
///
/// # Examples
///
/// ```
/// use option_resolver_core::Source;
///
/// assert_ne!(Source::CommandLine, Source::Default);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// Bound from a command-line flag.
    CommandLine,
    /// Bound from an environment variable (including dependency fallback).
    Environment,
    /// Bound from declared default parameters.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::CommandLine => write!(f, "command line"),
            Source::Environment => write!(f, "environment"),
            Source::Default => write!(f, "default"),
        }
    }
}

/// Static description of one configurable option.
///
/// A descriptor carries the option's identity (a unique `id` plus its
/// primary flag and flag synonyms), its environment identity (primary
/// variable, variable synonyms, and the ordered fallback chain consulted
/// only during dependency satisfaction), its parameter arity, and its
/// relationships to other descriptors. Relationships reference other
/// descriptors by `id`; the referenced ids are checked when a table is
/// built.
///
/// Descriptors are immutable once published into an
/// [`OptionTable`](crate::OptionTable) and are compared by `id`.
///
/// Use [`new`](OptionDescriptor::new) and chain builder methods:
///
/// # Examples
///
/// ```
/// use option_resolver_core::OptionDescriptor;
///
/// let output = OptionDescriptor::new("output", "--output")
///     .with_flag_synonym("-o")
///     .with_variable("TOOL_OUTPUT")
///     .with_arity(1, 1)
///     .primary();
///
/// assert!(output.matches_flag("-o"));
/// assert!(output.matches_flag("--output"));
/// assert!(!output.matches_flag("--out"));
/// assert!(output.is_primary);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Unique identity key; relationships reference this.
    pub id: String,
    /// Primary flag spelling (e.g., "--output").
    pub flag: String,
    /// Additional flag spellings bound to the same descriptor.
    #[serde(default)]
    pub flag_synonyms: Vec<String>,
    /// Primary environment variable.
    #[serde(default)]
    pub variable: Option<String>,
    /// Additional environment variables, checked in declared order.
    #[serde(default)]
    pub variable_synonyms: Vec<String>,
    /// Ordered fallback variables, consulted only while satisfying another
    /// option's dependency on this one.
    #[serde(default)]
    pub fallback_variables: Vec<String>,
    /// Minimum number of trailing parameters.
    #[serde(default)]
    pub min_params: usize,
    /// Maximum number of trailing parameters; `None` means unbounded
    /// (consume until the next recognized flag).
    #[serde(default)]
    pub max_params: Option<usize>,
    /// Member of the set from which at least one option must be chosen.
    #[serde(default)]
    pub is_primary: bool,
    /// Specifying this option warns and suggests alternatives.
    #[serde(default)]
    pub is_deprecated: bool,
    /// Value should not be echoed back in logs or messages.
    #[serde(default)]
    pub is_sensitive: bool,
    /// Ids of descriptors this option is mutually exclusive with.
    #[serde(default)]
    pub conflicts: Vec<String>,
    /// Dependency requirement: OR across the outer list, AND within each
    /// inner list. At least one inner set must be fully satisfied.
    #[serde(default)]
    pub dependencies: Vec<Vec<String>>,
    /// Ids of replacement descriptors named by deprecation warnings.
    #[serde(default)]
    pub deprecation_alternatives: Vec<String>,
    /// Default parameters applied when the option is otherwise unbound.
    /// `None` means no default binding; `Some(vec![])` means bound by
    /// default with zero parameters.
    #[serde(default)]
    pub default_params: Option<Vec<String>>,
}

impl OptionDescriptor {
    /// Creates a descriptor with the given identity and primary flag.
    ///
    /// The descriptor starts with zero arity (a bare switch), no
    /// environment identity, and no relationships.
    ///
    /// # Examples
    ///
    /// ```
    /// use option_resolver_core::OptionDescriptor;
    ///
    /// let verbose = OptionDescriptor::new("verbose", "--verbose");
    /// assert_eq!(verbose.id, "verbose");
    /// assert_eq!(verbose.min_params, 0);
    /// assert_eq!(verbose.max_params, Some(0));
    /// ```
    pub fn new(id: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            flag: flag.into(),
            flag_synonyms: Vec::new(),
            variable: None,
            variable_synonyms: Vec::new(),
            fallback_variables: Vec::new(),
            min_params: 0,
            max_params: Some(0),
            is_primary: false,
            is_deprecated: false,
            is_sensitive: false,
            conflicts: Vec::new(),
            dependencies: Vec::new(),
            deprecation_alternatives: Vec::new(),
            default_params: None,
        }
    }

    /// Adds a flag synonym.
    pub fn with_flag_synonym(mut self, flag: impl Into<String>) -> Self {
        self.flag_synonyms.push(flag.into());
        self
    }

    /// Sets the primary environment variable.
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Adds an environment variable synonym.
    pub fn with_variable_synonym(mut self, variable: impl Into<String>) -> Self {
        self.variable_synonyms.push(variable.into());
        self
    }

    /// Appends a fallback environment variable to the ordered chain.
    pub fn with_fallback_variable(mut self, variable: impl Into<String>) -> Self {
        self.fallback_variables.push(variable.into());
        self
    }

    /// Sets a bounded parameter arity.
    ///
    /// # Examples
    ///
    /// ```
    /// use option_resolver_core::OptionDescriptor;
    ///
    /// let d = OptionDescriptor::new("level", "--level").with_arity(1, 2);
    /// assert!(!d.accepts(0));
    /// assert!(d.accepts(1));
    /// assert!(d.accepts(2));
    /// assert!(!d.accepts(3));
    /// ```
    pub fn with_arity(mut self, min: usize, max: usize) -> Self {
        self.min_params = min;
        self.max_params = Some(max);
        self
    }

    /// Sets an unbounded arity: at least `min` parameters, consuming until
    /// the next recognized flag.
    pub fn with_unbounded_arity(mut self, min: usize) -> Self {
        self.min_params = min;
        self.max_params = None;
        self
    }

    /// Marks as a primary option.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Marks as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }

    /// Marks the value as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.is_sensitive = true;
        self
    }

    /// Declares a conflict with the descriptor identified by `id`.
    ///
    /// Conflicts are symmetric at validation time: a pair conflicts when
    /// either side names the other.
    pub fn conflicts_with(mut self, id: impl Into<String>) -> Self {
        self.conflicts.push(id.into());
        self
    }

    /// Adds one AND-set of required descriptor ids.
    ///
    /// Each call adds an alternative: the requirement is satisfied when
    /// any one added set is fully present.
    ///
    /// # Examples
    ///
    /// ```
    /// use option_resolver_core::OptionDescriptor;
    ///
    /// // Requires (x AND y) OR z.
    /// let d = OptionDescriptor::new("d", "--d")
    ///     .with_dependency_set(["x", "y"])
    ///     .with_dependency_set(["z"]);
    /// assert_eq!(d.dependencies.len(), 2);
    /// ```
    pub fn with_dependency_set<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .push(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Names a replacement descriptor for deprecation warnings.
    pub fn with_deprecation_alternative(mut self, id: impl Into<String>) -> Self {
        self.deprecation_alternatives.push(id.into());
        self
    }

    /// Declares default parameters, applied when the option is not bound
    /// from the command line or the environment.
    pub fn with_default<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Checks whether `token` matches the primary flag or any synonym.
    pub fn matches_flag(&self, token: &str) -> bool {
        self.flag == token || self.flag_synonyms.iter().any(|s| s == token)
    }

    /// All flag spellings, primary first.
    pub fn all_flags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.flag.as_str()).chain(self.flag_synonyms.iter().map(String::as_str))
    }

    /// All environment variables that bind this option directly (primary
    /// then synonyms, in lookup order). Excludes the fallback chain.
    pub fn binding_variables(&self) -> impl Iterator<Item = &str> {
        self.variable
            .iter()
            .map(String::as_str)
            .chain(self.variable_synonyms.iter().map(String::as_str))
    }

    /// Checks a parameter count against the declared arity.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_params && self.max_params.is_none_or(|max| count <= max)
    }
}

/// One resolved option value.
///
/// Produced for every descriptor in the specified set. The `specifier` is
/// the literal flag or variable name that supplied the value and is
/// `None` exactly when the source is [`Source::Default`].
///
/// # Examples
///
/// ```
/// use option_resolver_core::{BoundValue, Source};
///
/// let v = BoundValue::command_line("--level", vec!["3".into()], 3u32);
/// assert_eq!(v.source, Source::CommandLine);
/// assert_eq!(v.specifier.as_deref(), Some("--level"));
/// assert_eq!(v.value, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundValue<V> {
    /// How the value was supplied.
    pub source: Source,
    /// Literal flag or variable used; `None` iff `source` is `Default`.
    pub specifier: Option<String>,
    /// Raw parameters as received, before processing.
    pub raw_params: Vec<String>,
    /// Processed value produced by the parameter processor.
    pub value: V,
}

impl<V> BoundValue<V> {
    /// Creates a command-line binding.
    pub fn command_line(specifier: impl Into<String>, raw_params: Vec<String>, value: V) -> Self {
        Self {
            source: Source::CommandLine,
            specifier: Some(specifier.into()),
            raw_params,
            value,
        }
    }

    /// Creates an environment binding.
    pub fn environment(specifier: impl Into<String>, raw_params: Vec<String>, value: V) -> Self {
        Self {
            source: Source::Environment,
            specifier: Some(specifier.into()),
            raw_params,
            value,
        }
    }

    /// Creates a default binding. Default bindings have no specifier.
    pub fn default_params(raw_params: Vec<String>, value: V) -> Self {
        Self {
            source: Source::Default,
            specifier: None,
            raw_params,
            value,
        }
    }
}

/// Diagnostic handle for an option that made it into the specified set.
///
/// Carried inside conflict and dependency failures so callers can render
/// messages without re-deriving resolution state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifiedOption {
    /// Descriptor id.
    pub id: String,
    /// How the option was specified.
    pub source: Source,
    /// Literal flag or variable used; `None` for default bindings.
    pub specifier: Option<String>,
}

impl fmt::Display for SpecifiedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.specifier {
            Some(specifier) => write!(f, "'{}' ({})", specifier, self.source),
            None => write!(f, "'{}' (default)", self.id),
        }
    }
}

/// Deprecation warning for an explicitly specified option.
///
/// Emitted for every bound descriptor that is deprecated and was supplied
/// from a non-default source. `alternatives` holds the replacement flags
/// for message rendering: zero yields a bare notice, one names the
/// replacement, several list every alternative.
///
/// # Examples
///
/// ```
/// use option_resolver_core::{Source, Warning};
///
/// let w = Warning {
///     id: "old-output".into(),
///     source: Source::CommandLine,
///     specifier: "--old-output".into(),
///     alternatives: vec!["--output".into()],
/// };
/// assert!(w.to_string().contains("use '--output' instead"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Descriptor id of the deprecated option.
    pub id: String,
    /// How the option was supplied (never `Default`).
    pub source: Source,
    /// Literal flag or variable used.
    pub specifier: String,
    /// Replacement flags, in declaration order.
    pub alternatives: Vec<String>,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option '{}' ({}) is deprecated", self.specifier, self.source)?;
        match self.alternatives.as_slice() {
            [] => Ok(()),
            [only] => write!(f, "; use '{only}' instead"),
            many => write!(f, "; use one of: {}", many.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let d = OptionDescriptor::new("output", "--output")
            .with_flag_synonym("-o")
            .with_variable("TOOL_OUTPUT")
            .with_variable_synonym("TOOL_OUT")
            .with_fallback_variable("TOOL_OUTPUT_FALLBACK")
            .with_arity(1, 2)
            .primary();

        assert_eq!(d.id, "output");
        assert!(d.matches_flag("--output"));
        assert!(d.matches_flag("-o"));
        assert_eq!(d.all_flags().collect::<Vec<_>>(), vec!["--output", "-o"]);
        assert_eq!(
            d.binding_variables().collect::<Vec<_>>(),
            vec!["TOOL_OUTPUT", "TOOL_OUT"]
        );
        assert_eq!(d.fallback_variables, vec!["TOOL_OUTPUT_FALLBACK"]);
        assert!(d.is_primary);
    }

    #[test]
    fn test_arity_bounds() {
        let bounded = OptionDescriptor::new("level", "--level").with_arity(1, 2);
        assert!(!bounded.accepts(0));
        assert!(bounded.accepts(1));
        assert!(bounded.accepts(2));
        assert!(!bounded.accepts(3));

        let unbounded = OptionDescriptor::new("files", "--files").with_unbounded_arity(1);
        assert!(!unbounded.accepts(0));
        assert!(unbounded.accepts(100));
    }

    #[test]
    fn test_bound_value_specifier_invariant() {
        let cli = BoundValue::command_line("--level", vec!["3".into()], ());
        assert_eq!(cli.specifier.as_deref(), Some("--level"));

        let default = BoundValue::default_params(vec!["3".into()], ());
        assert_eq!(default.source, Source::Default);
        assert!(default.specifier.is_none());
    }

    #[test]
    fn test_warning_rendering() {
        let bare = Warning {
            id: "old".into(),
            source: Source::Environment,
            specifier: "OLD_VAR".into(),
            alternatives: vec![],
        };
        assert_eq!(bare.to_string(), "option 'OLD_VAR' (environment) is deprecated");

        let many = Warning {
            id: "old".into(),
            source: Source::CommandLine,
            specifier: "--old".into(),
            alternatives: vec!["--new".into(), "--newer".into()],
        };
        assert!(many.to_string().contains("use one of: --new, --newer"));
    }

    #[test]
    fn test_descriptor_json_round_trip() {
        let d = OptionDescriptor::new("mode", "--mode")
            .with_arity(1, 1)
            .with_dependency_set(["output"])
            .with_default(["strict"]);

        let json = serde_json::to_string(&d).unwrap();
        let back: OptionDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "mode");
        assert_eq!(back.dependencies, vec![vec!["output".to_string()]]);
        assert_eq!(back.default_params.as_deref(), Some(&["strict".to_string()][..]));
    }
}
