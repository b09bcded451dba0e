//! Error types for option resolution.
//!
//! Every failure kind carries the structured data (descriptor ids,
//! specifiers, literal parameter lists) a caller needs to render a human
//! message without re-deriving resolution state. The `Display` impls are a
//! convenience, not part of the contract.
//!
//! Configuration mistakes in the descriptor table are a different animal:
//! they are reported eagerly at table construction as
//! [`ConfigError`](option_resolver_core::ConfigError), never from a
//! resolution call.

use thiserror::Error;

use option_resolver_core::SpecifiedOption;

/// Processor rejection of a raw parameter list.
///
/// Returned by [`ParamProcessor`](crate::ParamProcessor) implementations;
/// the engine wraps it into
/// [`ResolveError::BadOptionParameters`] together with the descriptor,
/// specifier, and original parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParamError {
    /// Why the parameters were rejected.
    pub message: String,
}

impl ParamError {
    /// Creates a rejection with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn describe_count(min: &usize, max: &Option<usize>, params: &[String]) -> String {
    let expected = match max {
        Some(max) if min == max => format!("exactly {min}"),
        Some(max) => format!("between {min} and {max}"),
        None => format!("at least {min}"),
    };
    let kind = if params.len() < *min {
        "too few"
    } else {
        "too many"
    };
    format!(
        "{kind} parameters (expected {expected}, got {}: [{}])",
        params.len(),
        params.join(", ")
    )
}

fn describe_sets(sets: &[Vec<String>]) -> String {
    sets.iter()
        .map(|set| format!("({})", set.join(" and ")))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Errors terminating a resolution call.
///
/// All variants are terminal for the current call; nothing is retried
/// internally and no partial result is returned.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A token appeared where a flag was expected but matches no
    /// descriptor.
    #[error("unrecognized option: {token}")]
    UnrecognizedOption {
        /// The offending token.
        token: String,
    },

    /// The same descriptor was bound more than once through any
    /// combination of its flags.
    #[error("option '{id}' specified more than once: {}", .flags_used.join(", "))]
    RepeatedOption {
        /// Descriptor id.
        id: String,
        /// Every literal flag spelling used, in argument order.
        flags_used: Vec<String>,
    },

    /// The collected parameter count violates the descriptor's arity.
    #[error("option '{specifier}': {}", describe_count(.min, .max, .params))]
    BadOptionParameterCount {
        /// Descriptor id.
        id: String,
        /// Literal flag that started the binding.
        specifier: String,
        /// Parameters as received.
        params: Vec<String>,
        /// Declared minimum.
        min: usize,
        /// Declared maximum; `None` means unbounded.
        max: Option<usize>,
    },

    /// The parameter processor rejected the raw parameters.
    #[error("invalid parameters for '{}': {source}", .specifier.as_deref().unwrap_or(.id.as_str()))]
    BadOptionParameters {
        /// Descriptor id.
        id: String,
        /// Flag or variable used; `None` for default bindings.
        specifier: Option<String>,
        /// Parameters as received.
        params: Vec<String>,
        /// The processor's rejection.
        #[source]
        source: ParamError,
    },

    /// Two specified options are mutually exclusive.
    #[error("conflicting options: {first} and {second}")]
    ConflictingOptions {
        /// One side of the conflicting pair.
        first: SpecifiedOption,
        /// The other side.
        second: SpecifiedOption,
    },

    /// No primary option is present in the specified set.
    #[error("no primary option specified; expected one of: {}", .candidates.join(", "))]
    NoPrimaryOption {
        /// Primary flags of every candidate, in declaration order.
        candidates: Vec<String>,
    },

    /// A specified option's OR-of-AND dependency requirement is
    /// unsatisfied.
    #[error("option '{id}' requires {}", describe_sets(.candidate_sets))]
    MissingDependencies {
        /// Descriptor id of the option with unmet dependencies.
        id: String,
        /// Remaining candidate AND-sets (flags), already-specified members
        /// and conflict-impossible sets omitted.
        candidate_sets: Vec<Vec<String>>,
        /// The full specified set at failure time.
        specified: Vec<SpecifiedOption>,
    },
}

/// Convenience alias for results with [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;
