//! Resolution and validation engine for declaratively described options.
//!
//! Given an [`OptionTable`](option_resolver_core::OptionTable) of
//! descriptors, an argument list, and an environment snapshot, a
//! [`Resolver`] produces a validated [`Resolution`] — one typed
//! [`BoundValue`](option_resolver_core::BoundValue) per specified option
//! plus deprecation warnings — or fails with a structured
//! [`ResolveError`].
//!
//! The pipeline stages run strictly in order:
//!
//! 1. Tokenize and bind command-line flags (synonym-aware, arity-checked).
//! 2. Resolve unbound options from their environment variables.
//! 3. Apply declared defaults.
//! 4. Validate the whole specified set: conflicts, the primary-option
//!    requirement, OR-of-AND dependency satisfaction (with
//!    fallback-variable promotion), and the deprecation scan.
//! 5. Run every binding through the caller's [`ParamProcessor`] and
//!    assemble the result.
//!
//! # Quick start
//!
//! ```
//! use std::collections::HashMap;
//!
//! use option_resolver_core::{OptionDescriptor, OptionTable};
//! use option_resolver_engine::{RawParams, Resolver};
//!
//! let table = OptionTable::new(vec![
//!     OptionDescriptor::new("export", "--export")
//!         .primary()
//!         .with_dependency_set(["output"]),
//!     OptionDescriptor::new("output", "--output")
//!         .with_flag_synonym("-o")
//!         .with_variable("TOOL_OUTPUT")
//!         .with_arity(1, 1),
//! ])
//! .unwrap();
//!
//! let resolver = Resolver::new(&table, RawParams);
//! let args: Vec<String> = vec!["--export".into(), "-o".into(), "dump.json".into()];
//! let resolution = resolver.resolve(&args, &HashMap::new()).unwrap();
//!
//! assert_eq!(
//!     resolution.value("output"),
//!     Some(&vec!["dump.json".to_string()]),
//! );
//! ```

mod binder;
mod binding;
mod defaults;
mod environment;
mod error;
mod processor;
mod resolve;
mod validate;

pub use error::{ParamError, ResolveError, Result};
pub use processor::{ParamProcessor, RawParams};
pub use resolve::{Resolution, Resolver};
