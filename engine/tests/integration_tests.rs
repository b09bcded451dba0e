use std::collections::HashMap;

use option_resolver_core::{ConfigError, OptionDescriptor, OptionTable, Source};
use option_resolver_engine::{ParamError, ParamProcessor, RawParams, ResolveError, Resolver};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Descriptor set loosely modeled on a data export tool.
fn export_table() -> OptionTable {
    OptionTable::new(vec![
        OptionDescriptor::new("export", "--export")
            .primary()
            .with_dependency_set(["output"]),
        OptionDescriptor::new("import", "--import")
            .primary()
            .conflicts_with("export"),
        OptionDescriptor::new("output", "--output")
            .with_flag_synonym("-o")
            .with_variable("EXPORT_OUTPUT")
            .with_arity(1, 1),
        OptionDescriptor::new("level", "--level").with_arity(1, 2),
        OptionDescriptor::new("token", "--token")
            .with_arity(1, 1)
            .with_fallback_variable("EXPORT_TOKEN_FILE")
            .with_fallback_variable("EXPORT_TOKEN")
            .sensitive(),
        OptionDescriptor::new("old-format", "--old-format")
            .deprecated()
            .with_deprecation_alternative("format")
            .with_arity(1, 1),
        OptionDescriptor::new("format", "--format")
            .with_arity(1, 1)
            .with_default(["json"]),
    ])
    .unwrap()
}

// ---------------------------------------------------------------------------
// Table configuration errors
// ---------------------------------------------------------------------------

#[test]
fn duplicate_flag_is_a_config_error_not_a_resolve_error() {
    let err = OptionTable::new(vec![
        OptionDescriptor::new("a", "--shared").primary(),
        OptionDescriptor::new("b", "--b").with_flag_synonym("--shared"),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateFlag(_)));
}

#[test]
fn duplicate_variable_across_descriptors_is_rejected() {
    let err = OptionTable::new(vec![
        OptionDescriptor::new("a", "--a").primary().with_variable("VAR"),
        OptionDescriptor::new("b", "--b").with_variable_synonym("VAR"),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateVariable(_)));
}

#[test]
fn json_table_loads_and_resolves() {
    let table = OptionTable::from_json(
        r#"[
            {"id": "run", "flag": "--run", "is_primary": true},
            {"id": "jobs", "flag": "--jobs", "min_params": 1, "max_params": 1}
        ]"#,
    )
    .unwrap();

    let resolver = Resolver::new(&table, RawParams);
    let resolution = resolver
        .resolve(&args(&["--run", "--jobs", "4"]), &env(&[]))
        .unwrap();
    assert_eq!(resolution.value("jobs"), Some(&vec!["4".to_string()]));
}

// ---------------------------------------------------------------------------
// Arity
// ---------------------------------------------------------------------------

#[test]
fn arity_one_to_two_accepts_one_or_two_parameters() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    for params in [vec!["--export", "-o", "x", "--level", "a"],
        vec!["--export", "-o", "x", "--level", "a", "b"]]
    {
        let resolution = resolver.resolve(&args(&params), &env(&[])).unwrap();
        assert!(resolution.contains("level"));
    }
}

#[test]
fn arity_one_to_two_rejects_zero_and_three() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    let err = resolver.resolve(&args(&["--level"]), &env(&[])).unwrap_err();
    match err {
        ResolveError::BadOptionParameterCount { id, params, .. } => {
            assert_eq!(id, "level");
            assert!(params.is_empty());
        }
        other => panic!("expected BadOptionParameterCount, got {other:?}"),
    }

    let err = resolver
        .resolve(&args(&["--level", "a", "b", "c"]), &env(&[]))
        .unwrap_err();
    match err {
        ResolveError::BadOptionParameterCount { params, min, max, .. } => {
            assert_eq!(params, vec!["a", "b", "c"]);
            assert_eq!((min, max), (1, Some(2)));
        }
        other => panic!("expected BadOptionParameterCount, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Repeats and unrecognized tokens
// ---------------------------------------------------------------------------

#[test]
fn repeat_via_primary_and_synonym_lists_both_spellings() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    let err = resolver
        .resolve(&args(&["--output", "a", "-o", "b"]), &env(&[]))
        .unwrap_err();
    match err {
        ResolveError::RepeatedOption { id, flags_used } => {
            assert_eq!(id, "output");
            assert_eq!(flags_used, vec!["--output", "-o"]);
        }
        other => panic!("expected RepeatedOption, got {other:?}"),
    }
}

#[test]
fn unrecognized_leading_token_is_reported() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    let err = resolver.resolve(&args(&["--bogus"]), &env(&[])).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::UnrecognizedOption { token } if token == "--bogus"
    ));
}

// ---------------------------------------------------------------------------
// Conflicts
// ---------------------------------------------------------------------------

#[test]
fn conflicting_pair_fails_regardless_of_argument_order() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    for order in [
        vec!["--export", "-o", "x", "--import"],
        vec!["--import", "--export", "-o", "x"],
    ] {
        let err = resolver.resolve(&args(&order), &env(&[])).unwrap_err();
        match err {
            ResolveError::ConflictingOptions { first, second } => {
                let mut ids = vec![first.id, second.id];
                ids.sort();
                assert_eq!(ids, vec!["export", "import"]);
            }
            other => panic!("expected ConflictingOptions, got {other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Primary requirement
// ---------------------------------------------------------------------------

#[test]
fn no_primary_option_lists_all_candidates() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    let err = resolver
        .resolve(&args(&["--level", "5"]), &env(&[]))
        .unwrap_err();
    match err {
        ResolveError::NoPrimaryOption { candidates } => {
            assert_eq!(candidates, vec!["--export", "--import"]);
        }
        other => panic!("expected NoPrimaryOption, got {other:?}"),
    }
}

#[test]
fn either_primary_satisfies_the_requirement() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    assert!(resolver
        .resolve(&args(&["--export", "-o", "x"]), &env(&[]))
        .is_ok());
    assert!(resolver.resolve(&args(&["--import"]), &env(&[])).is_ok());
}

// ---------------------------------------------------------------------------
// Dependencies
// ---------------------------------------------------------------------------

fn dependency_table() -> OptionTable {
    OptionTable::new(vec![
        OptionDescriptor::new("d", "--d")
            .primary()
            .with_dependency_set(["x", "y"])
            .with_dependency_set(["z"]),
        OptionDescriptor::new("x", "--x"),
        OptionDescriptor::new("y", "--y"),
        OptionDescriptor::new("z", "--z").with_fallback_variable("DEP_Z"),
        OptionDescriptor::new("w", "--w").conflicts_with("x"),
    ])
    .unwrap()
}

#[test]
fn dependency_unmet_when_no_set_satisfiable() {
    let table = dependency_table();
    let resolver = Resolver::new(&table, RawParams);

    let err = resolver.resolve(&args(&["--d"]), &env(&[])).unwrap_err();
    match err {
        ResolveError::MissingDependencies { id, candidate_sets, .. } => {
            assert_eq!(id, "d");
            assert_eq!(candidate_sets, vec![vec!["--x", "--y"], vec!["--z"]]);
        }
        other => panic!("expected MissingDependencies, got {other:?}"),
    }
}

#[test]
fn dependency_satisfied_by_full_inner_set() {
    let table = dependency_table();
    let resolver = Resolver::new(&table, RawParams);

    assert!(resolver.resolve(&args(&["--d", "--z"]), &env(&[])).is_ok());
    assert!(resolver
        .resolve(&args(&["--d", "--x", "--y"]), &env(&[]))
        .is_ok());
}

#[test]
fn partial_inner_set_does_not_satisfy() {
    let table = dependency_table();
    let resolver = Resolver::new(&table, RawParams);

    let err = resolver.resolve(&args(&["--d", "--x"]), &env(&[])).unwrap_err();
    match err {
        ResolveError::MissingDependencies { candidate_sets, .. } => {
            // x is already specified: first set lists only the missing y.
            assert_eq!(candidate_sets, vec![vec!["--y"], vec!["--z"]]);
        }
        other => panic!("expected MissingDependencies, got {other:?}"),
    }
}

#[test]
fn conflicting_candidate_set_is_not_offered_as_a_fix() {
    let table = dependency_table();
    let resolver = Resolver::new(&table, RawParams);

    // w conflicts with x, so the {x, y} alternative is pruned entirely.
    let err = resolver.resolve(&args(&["--d", "--w"]), &env(&[])).unwrap_err();
    match err {
        ResolveError::MissingDependencies { candidate_sets, .. } => {
            assert_eq!(candidate_sets, vec![vec!["--z"]]);
        }
        other => panic!("expected MissingDependencies, got {other:?}"),
    }
}

#[test]
fn fallback_variable_satisfies_dependency_and_binds_member() {
    let table = dependency_table();
    let resolver = Resolver::new(&table, RawParams);

    let resolution = resolver
        .resolve(&args(&["--d"]), &env(&[("DEP_Z", "from-env")]))
        .unwrap();

    let z = resolution.get("z").unwrap();
    assert_eq!(z.source, Source::Environment);
    assert_eq!(z.specifier.as_deref(), Some("DEP_Z"));
    assert_eq!(z.value, vec!["from-env".to_string()]);
}

#[test]
fn fallback_is_ignored_outside_dependency_resolution() {
    let table = dependency_table();
    let resolver = Resolver::new(&table, RawParams);

    // Nothing depends on z here, so DEP_Z must not bind it.
    let resolution = resolver
        .resolve(&args(&["--d", "--x", "--y"]), &env(&[("DEP_Z", "ignored")]))
        .unwrap();
    assert!(!resolution.contains("z"));
}

// ---------------------------------------------------------------------------
// Environment binding
// ---------------------------------------------------------------------------

#[test]
fn environment_binds_unbound_option_and_satisfies_dependency() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    let resolution = resolver
        .resolve(&args(&["--export"]), &env(&[("EXPORT_OUTPUT", "out.db")]))
        .unwrap();

    let output = resolution.get("output").unwrap();
    assert_eq!(output.source, Source::Environment);
    assert_eq!(output.specifier.as_deref(), Some("EXPORT_OUTPUT"));
    assert_eq!(output.raw_params, vec!["out.db"]);
}

#[test]
fn command_line_wins_over_environment() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    let resolution = resolver
        .resolve(
            &args(&["--export", "-o", "cli.db"]),
            &env(&[("EXPORT_OUTPUT", "env.db")]),
        )
        .unwrap();
    assert_eq!(resolution.value("output"), Some(&vec!["cli.db".to_string()]));
}

// ---------------------------------------------------------------------------
// Defaults and deprecation
// ---------------------------------------------------------------------------

#[test]
fn default_binds_with_no_specifier_and_no_warning() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    let resolution = resolver
        .resolve(&args(&["--export", "-o", "x"]), &env(&[]))
        .unwrap();

    let format = resolution.get("format").unwrap();
    assert_eq!(format.source, Source::Default);
    assert!(format.specifier.is_none());
    assert_eq!(format.value, vec!["json".to_string()]);
    assert!(resolution.warnings().is_empty());
}

#[test]
fn deprecated_option_on_command_line_warns_once_with_alternative() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);

    let resolution = resolver
        .resolve(
            &args(&["--export", "-o", "x", "--old-format", "csv"]),
            &env(&[]),
        )
        .unwrap();

    assert_eq!(resolution.warnings().len(), 1);
    let warning = &resolution.warnings()[0];
    assert_eq!(warning.id, "old-format");
    assert_eq!(warning.source, Source::CommandLine);
    assert_eq!(warning.specifier, "--old-format");
    assert_eq!(warning.alternatives, vec!["--format"]);
}

// ---------------------------------------------------------------------------
// Parameter processing
// ---------------------------------------------------------------------------

/// Parses `--level` parameters as integers, passes everything else raw.
struct LevelProcessor;

#[derive(Debug, PartialEq)]
enum Value {
    Levels(Vec<i64>),
    Raw(Vec<String>),
}

impl ParamProcessor for LevelProcessor {
    type Value = Value;

    fn process(
        &self,
        descriptor: &OptionDescriptor,
        raw_params: &[String],
    ) -> Result<Value, ParamError> {
        if descriptor.id != "level" {
            return Ok(Value::Raw(raw_params.to_vec()));
        }
        raw_params
            .iter()
            .map(|p| {
                p.parse()
                    .map_err(|_| ParamError::new(format!("not a number: {p}")))
            })
            .collect::<Result<Vec<i64>, _>>()
            .map(Value::Levels)
    }
}

#[test]
fn typed_processor_converts_and_rejects() {
    let table = export_table();
    let resolver = Resolver::new(&table, LevelProcessor);

    let resolution = resolver
        .resolve(&args(&["--export", "-o", "x", "--level", "3", "7"]), &env(&[]))
        .unwrap();
    assert_eq!(
        resolution.value("level"),
        Some(&Value::Levels(vec![3, 7])),
    );

    let err = resolver
        .resolve(&args(&["--export", "-o", "x", "--level", "high"]), &env(&[]))
        .unwrap_err();
    match err {
        ResolveError::BadOptionParameters { id, params, source, .. } => {
            assert_eq!(id, "level");
            assert_eq!(params, vec!["high"]);
            assert_eq!(source.message, "not a number: high");
        }
        other => panic!("expected BadOptionParameters, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn repeated_resolution_yields_identical_content() {
    let table = export_table();
    let resolver = Resolver::new(&table, RawParams);
    let a = args(&["--export", "--old-format", "csv"]);
    let e = env(&[("EXPORT_OUTPUT", "out.db")]);

    let first = resolver.resolve(&a, &e).unwrap();
    let second = resolver.resolve(&a, &e).unwrap();

    let snapshot = |r: &option_resolver_engine::Resolution<Vec<String>>| {
        r.iter()
            .map(|(id, b)| (id.to_string(), b.source, b.specifier.clone(), b.value.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(snapshot(&first), snapshot(&second));
    assert_eq!(first.warnings(), second.warnings());
}
