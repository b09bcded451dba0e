//! Core descriptor types and table validation for option resolution.
//!
//! This crate defines the foundational types for describing configurable
//! options declaratively:
//!
//! - [`OptionDescriptor`] — one option's identity (flags, environment
//!   variables), parameter arity, and relationships (conflicts, OR-of-AND
//!   dependency sets, deprecation alternatives).
//! - [`OptionTable`] — the validated, immutable collection of descriptors
//!   a resolution run operates against.
//! - [`BoundValue`], [`Source`], [`SpecifiedOption`], [`Warning`] — the
//!   binding and diagnostic types produced by resolution.
//!
//! Table construction catches configuration errors ([`ConfigError`]) such
//! as duplicate flags, shared environment variables, and dangling id
//! references before any resolution runs.
//!
//! # Example
//!
//! ```
//! use option_resolver_core::*;
//!
//! let table = OptionTable::new(vec![
//!     OptionDescriptor::new("extract", "--extract").primary(),
//!     OptionDescriptor::new("output", "--output")
//!         .with_flag_synonym("-o")
//!         .with_variable("TOOL_OUTPUT")
//!         .with_arity(1, 1),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.by_flag("-o").unwrap().id, "output");
//! ```

mod descriptor;
mod table;

pub use descriptor::{BoundValue, OptionDescriptor, Source, SpecifiedOption, Warning};
pub use table::{ConfigError, OptionTable};
