use std::path::PathBuf;

use nova_config::{ConfigError, NovaConfig};

#[test]
fn parses_every_eclipse_key() {
    let config = NovaConfig::load_from_str(
        r#"
[eclipse]
output_directory = "target/classes"
test_output_directory = "target/test-classes"
alternative_output = "bin"
sources_optional = false
dry_run = true
skip = false
default_builders = false
default_natures = false
extra_builders = ["custom.builder"]
extra_natures = ["custom.nature"]
extra_sources = ["src/gen/java"]
extra_resources = ["src/gen/resources"]
extra_test_sources = ["src/it/java"]
extra_test_resources = ["src/it/resources"]
"#,
    )
    .unwrap();

    let eclipse = config.eclipse;
    assert_eq!(
        eclipse.output_directory,
        Some(PathBuf::from("target/classes"))
    );
    assert_eq!(
        eclipse.test_output_directory,
        Some(PathBuf::from("target/test-classes"))
    );
    assert_eq!(eclipse.alternative_output, Some(PathBuf::from("bin")));
    assert!(!eclipse.sources_optional);
    assert!(eclipse.dry_run);
    assert!(!eclipse.skip);
    assert!(!eclipse.default_builders);
    assert!(!eclipse.default_natures);
    assert_eq!(eclipse.extra_builders, vec!["custom.builder".to_string()]);
    assert_eq!(eclipse.extra_natures, vec!["custom.nature".to_string()]);
    assert_eq!(eclipse.extra_sources, vec![PathBuf::from("src/gen/java")]);
    assert_eq!(
        eclipse.extra_resources,
        vec![PathBuf::from("src/gen/resources")]
    );
    assert_eq!(eclipse.extra_test_sources, vec![PathBuf::from("src/it/java")]);
    assert_eq!(
        eclipse.extra_test_resources,
        vec![PathBuf::from("src/it/resources")]
    );
}

#[test]
fn partial_section_keeps_remaining_defaults() {
    let config = NovaConfig::load_from_str("[eclipse]\nextra_builders = [\"a\", \"a\"]\n").unwrap();

    assert_eq!(config.eclipse.extra_builders, vec!["a", "a"]);
    assert!(config.eclipse.sources_optional);
    assert!(config.eclipse.default_builders);
    assert_eq!(config.eclipse.output_directory, None);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = NovaConfig::load_from_str("[eclipse]\naltTarget = \"bin\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "unexpected error: {err:?}");
}
