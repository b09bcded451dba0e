//! Default parameter application.

use tracing::debug;

use option_resolver_core::{OptionTable, Source};

use crate::binding::{BindingSet, RawBinding};

/// Binds still-unbound descriptors that declare default parameters.
///
/// A declared empty list counts: the descriptor is bound by default with
/// zero parameters. Descriptors without defaults stay unbound and are
/// absent from the result.
pub(crate) fn apply_defaults(table: &OptionTable, bound: &mut BindingSet) {
    for descriptor in table.descriptors() {
        if bound.contains(&descriptor.id) {
            continue;
        }
        let Some(params) = &descriptor.default_params else {
            continue;
        };
        debug!(id = %descriptor.id, params = params.len(), "Bound option from defaults");
        bound.insert(RawBinding {
            id: descriptor.id.clone(),
            source: Source::Default,
            specifier: None,
            raw_params: params.clone(),
            flags_used: Vec::new(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use option_resolver_core::OptionDescriptor;

    #[test]
    fn test_defaults_bind_only_declared() {
        let table = OptionTable::new(vec![
            OptionDescriptor::new("mode", "--mode")
                .primary()
                .with_arity(1, 1)
                .with_default(["strict"]),
            OptionDescriptor::new("quiet", "--quiet").with_default(Vec::<String>::new()),
            OptionDescriptor::new("output", "--output").with_arity(1, 1),
        ])
        .unwrap();

        let mut bound = BindingSet::new();
        apply_defaults(&table, &mut bound);

        let mode = bound.get("mode").unwrap();
        assert_eq!(mode.source, Source::Default);
        assert!(mode.specifier.is_none());
        assert_eq!(mode.raw_params, vec!["strict"]);

        // Empty default list still binds, with zero parameters.
        assert!(bound.get("quiet").unwrap().raw_params.is_empty());

        // No default declared: stays unbound.
        assert!(!bound.contains("output"));
    }

    #[test]
    fn test_defaults_skip_already_bound() {
        let table = OptionTable::new(vec![
            OptionDescriptor::new("mode", "--mode")
                .primary()
                .with_arity(1, 1)
                .with_default(["strict"]),
        ])
        .unwrap();

        let mut bound = BindingSet::new();
        bound.insert(RawBinding {
            id: "mode".into(),
            source: Source::CommandLine,
            specifier: Some("--mode".into()),
            raw_params: vec!["lenient".into()],
            flags_used: vec!["--mode".into()],
        });
        apply_defaults(&table, &mut bound);

        assert_eq!(bound.get("mode").unwrap().raw_params, vec!["lenient"]);
    }
}
