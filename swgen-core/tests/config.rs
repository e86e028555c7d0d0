use swgen_core::{CollectionFormat, ConfigError, GeneratorConfig};

// ── GeneratorConfig ─────────────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = GeneratorConfig::new();
    assert!(!config.qualify_names);
    assert_eq!(config.definition_prefix, "#/definitions/");
    assert_eq!(config.default_collection_format, CollectionFormat::Multi);
}

#[test]
fn config_builders() {
    let config = GeneratorConfig::new()
        .with_qualified_names(true)
        .with_definition_prefix("#/components/schemas/")
        .with_default_collection_format(CollectionFormat::Pipes);
    assert!(config.qualify_names);
    assert_eq!(config.definition_prefix, "#/components/schemas/");
    assert_eq!(config.default_collection_format, CollectionFormat::Pipes);
}

// ── YAML loading ────────────────────────────────────────────────────────────

#[test]
fn yaml_partial_document_keeps_defaults() {
    let config = GeneratorConfig::from_yaml_str("qualify_names: true\n").unwrap();
    assert!(config.qualify_names);
    assert_eq!(config.definition_prefix, "#/definitions/");
    assert_eq!(config.default_collection_format, CollectionFormat::Multi);
}

#[test]
fn yaml_full_document() {
    let yaml = r##"
qualify_names: false
definition_prefix: "#/components/schemas/"
default_collection_format: ssv
"##;
    let config = GeneratorConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(
        config,
        GeneratorConfig::new()
            .with_definition_prefix("#/components/schemas/")
            .with_default_collection_format(CollectionFormat::Ssv)
    );
}

#[test]
fn yaml_empty_document_is_default() {
    assert_eq!(
        GeneratorConfig::from_yaml_str("  \n").unwrap(),
        GeneratorConfig::default()
    );
}

#[test]
fn yaml_invalid_value_is_a_load_error() {
    let err = GeneratorConfig::from_yaml_str("default_collection_format: commas\n").unwrap_err();
    let ConfigError::Load(msg) = &err;
    assert!(!msg.is_empty());
    assert!(err.to_string().starts_with("Config load error:"));
}

#[test]
fn yaml_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("swgen-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "qualify_names: true\ndefault_collection_format: tsv\n").unwrap();

    let config = GeneratorConfig::from_yaml_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(config.qualify_names);
    assert_eq!(config.default_collection_format, CollectionFormat::Tsv);
}

#[test]
fn yaml_missing_file_is_a_load_error() {
    let err = GeneratorConfig::from_yaml_file("/nonexistent/swgen.yaml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/swgen.yaml"));
}
