use super::*;

#[test]
fn test_parse_accepts_comments_and_trailing_commas() {
    let config = parse_config(
        r#"{
            // line comment
            "compilerOptions": {
                /* block */ "superfluousPropertyCheck": true,
                "ignoreMethods": "yes", // trailing
            },
        }"#,
    )
    .unwrap();
    let options = config.compiler_options.unwrap();
    assert_eq!(options.superfluous_property_check, Some(true));
    assert_eq!(options.ignore_methods, Some(true));
    assert_eq!(options.short_circuit, None);
}

#[test]
fn test_comment_markers_inside_strings_are_kept() {
    let config = parse_config(r#"{ "extends": "./a//b/*c*/,", "compilerOptions": {} }"#).unwrap();
    assert_eq!(config.extends.as_deref(), Some("./a//b/*c*/,"));
}

#[test]
fn test_invalid_boolean_string_is_rejected() {
    let err = parse_config(r#"{ "compilerOptions": { "shortCircuit": "maybe" } }"#).unwrap_err();
    assert!(format!("{err:#}").contains("invalid boolean value: 'maybe'"));
}

#[test]
fn test_merge_and_apply() {
    let own = CompilerOptions {
        ignore_methods: Some(true),
        ..CompilerOptions::default()
    };
    let base = CompilerOptions {
        ignore_methods: Some(false),
        inline_trivial_predicates: Some(false),
        ..CompilerOptions::default()
    };
    let options = own.merge(base).apply(CompileOptions::default());
    assert!(options.ignore_methods);
    assert!(!options.inline_trivial_predicates);
    assert!(!options.superfluous_property_check);
}

#[test]
fn test_extends_chain_and_cycle() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("base.json"),
        r#"{ "compilerOptions": { "valueMayBeAbsent": true, "ignoreMethods": true } }"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{ "extends": "./base", "compilerOptions": { "ignoreMethods": false } }"#,
    )
    .unwrap();

    let options = load_config(&dir.path().join(CONFIG_FILE_NAME))
        .unwrap()
        .compiler_options
        .unwrap();
    assert_eq!(options.value_may_be_absent, Some(true));
    assert_eq!(options.ignore_methods, Some(false));

    std::fs::write(dir.path().join("a.json"), r#"{ "extends": "./b.json" }"#).unwrap();
    std::fs::write(dir.path().join("b.json"), r#"{ "extends": "./a.json" }"#).unwrap();
    let err = load_config(&dir.path().join("a.json")).unwrap_err();
    assert!(format!("{err:#}").contains("extends cycle"));
}

#[test]
fn test_discovered_config_then_flags() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("types");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{ "compilerOptions": { "superfluousPropertyCheck": true, "shortCircuit": "true" } }"#,
    )
    .unwrap();
    let document = nested.join("doc.json");

    assert_eq!(find_config(&document), Some(dir.path().join(CONFIG_FILE_NAME)));

    let flags = OptionFlags {
        short_circuit: Some(false),
        ..OptionFlags::default()
    };
    let options = resolve_options(&document, None, flags).unwrap();
    assert!(options.superfluous_property_check);
    assert!(!options.short_circuit);
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = resolve_options(&dir.path().join("doc.json"), Some(missing.as_path()), OptionFlags::default())
        .unwrap_err();
    assert!(format!("{err:#}").contains("failed to read config"));
}
