//! Resolution entry point and result assembly.
//!
//! [`Resolver`] wires the pipeline together: command-line binding →
//! environment resolution → default application → cross-option validation
//! (with fallback promotion) → parameter processing → the immutable
//! [`Resolution`]. One call fully consumes one argument list plus one
//! environment snapshot; nothing is shared between calls, so resolution is
//! a pure function of (table, args, env) apart from the explicit failure
//! paths.

use std::collections::HashMap;

use tracing::debug;

use option_resolver_core::{BoundValue, OptionTable, Warning};

use crate::binder::bind_command_line;
use crate::binding::BindingSet;
use crate::defaults::apply_defaults;
use crate::environment::resolve_environment;
use crate::error::{ResolveError, Result};
use crate::processor::ParamProcessor;
use crate::validate::validate;

/// The validated outcome of one resolution call.
///
/// Maps each specified descriptor (by id, synonyms collapsed) to its
/// [`BoundValue`], plus the ordered deprecation warnings. Iteration
/// follows the table's declaration order.
#[derive(Debug, Clone)]
pub struct Resolution<V> {
    entries: Vec<(String, BoundValue<V>)>,
    index: HashMap<String, usize>,
    warnings: Vec<Warning>,
}

impl<V> Resolution<V> {
    /// Looks up the binding for a descriptor id.
    pub fn get(&self, id: &str) -> Option<&BoundValue<V>> {
        self.index.get(id).map(|&idx| &self.entries[idx].1)
    }

    /// Looks up just the processed value for a descriptor id.
    pub fn value(&self, id: &str) -> Option<&V> {
        self.get(id).map(|b| &b.value)
    }

    /// Whether the descriptor ended up in the specified set.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Bindings in table declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue<V>)> {
        self.entries.iter().map(|(id, b)| (id.as_str(), b))
    }

    /// Deprecation warnings in table declaration order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Number of specified options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolution engine for one option table and parameter processor.
///
/// The resolver borrows the table; tables are immutable after
/// construction, so independent resolutions may run concurrently against
/// the same table from different threads.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use option_resolver_core::{OptionDescriptor, OptionTable, Source};
/// use option_resolver_engine::{RawParams, Resolver};
///
/// let table = OptionTable::new(vec![
///     OptionDescriptor::new("extract", "--extract").primary(),
///     OptionDescriptor::new("output", "--output")
///         .with_flag_synonym("-o")
///         .with_arity(1, 1),
/// ])
/// .unwrap();
///
/// let resolver = Resolver::new(&table, RawParams);
/// let args: Vec<String> = vec!["--extract".into(), "-o".into(), "out.db".into()];
/// let resolution = resolver.resolve(&args, &HashMap::new()).unwrap();
///
/// assert!(resolution.contains("extract"));
/// let output = resolution.get("output").unwrap();
/// assert_eq!(output.source, Source::CommandLine);
/// assert_eq!(output.specifier.as_deref(), Some("-o"));
/// assert_eq!(output.value, vec!["out.db".to_string()]);
/// ```
#[derive(Debug)]
pub struct Resolver<'t, P> {
    table: &'t OptionTable,
    processor: P,
}

impl<'t, P: ParamProcessor> Resolver<'t, P> {
    /// Creates a resolver over a validated table.
    pub fn new(table: &'t OptionTable, processor: P) -> Self {
        Self { table, processor }
    }

    /// The table this resolver runs against.
    pub fn table(&self) -> &OptionTable {
        self.table
    }

    /// Resolves one argument list against one environment snapshot.
    ///
    /// Runs the full pipeline and fails with the first
    /// [`ResolveError`] encountered; no partial result is returned.
    pub fn resolve(
        &self,
        args: &[String],
        env: &HashMap<String, String>,
    ) -> Result<Resolution<P::Value>> {
        let mut bound = bind_command_line(self.table, args)?;
        resolve_environment(self.table, env, &mut bound);
        apply_defaults(self.table, &mut bound);
        let warnings = validate(self.table, env, &mut bound)?;
        self.assemble(bound, warnings)
    }

    fn assemble(
        &self,
        bound: BindingSet,
        warnings: Vec<Warning>,
    ) -> Result<Resolution<P::Value>> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for descriptor in self.table.descriptors() {
            let Some(binding) = bound.get(&descriptor.id) else {
                continue;
            };
            let value = self
                .processor
                .process(descriptor, &binding.raw_params)
                .map_err(|source| ResolveError::BadOptionParameters {
                    id: descriptor.id.clone(),
                    specifier: binding.specifier.clone(),
                    params: binding.raw_params.clone(),
                    source,
                })?;
            index.insert(descriptor.id.clone(), entries.len());
            entries.push((
                descriptor.id.clone(),
                BoundValue {
                    source: binding.source,
                    specifier: binding.specifier.clone(),
                    raw_params: binding.raw_params.clone(),
                    value,
                },
            ));
        }

        debug!(options = entries.len(), warnings = warnings.len(), "Resolution complete");
        Ok(Resolution {
            entries,
            index,
            warnings,
        })
    }
}
