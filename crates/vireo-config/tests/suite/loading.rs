use pretty_assertions::assert_eq;
use vireo_config::{ConfigError, LoggingConfig, OverrideConfig, VireoConfig};
use vireo_override::OverrideOptions;

#[test]
fn empty_config_uses_defaults() {
    let config = VireoConfig::load_from_str("").unwrap();
    assert_eq!(config, VireoConfig::default());
    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.stderr);
    assert_eq!(config.override_options(), OverrideOptions::default());
}

#[test]
fn override_section_maps_onto_options() {
    let config = VireoConfig::load_from_str(
        r#"
[overrides]
match_setters = true
"#,
    )
    .unwrap();

    assert_eq!(
        config.overrides,
        OverrideConfig {
            compare_type_arguments: false,
            match_setters: true,
        }
    );
    let options = config.override_options();
    assert!(options.match_setters);
    assert!(!options.compare_type_arguments);
}

#[test]
fn logging_section_is_parsed() {
    let config = VireoConfig::load_from_str(
        r#"
[logging]
level = "vireo.override=trace"
json = true
stderr = false
"#,
    )
    .unwrap();

    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "vireo.override=trace".to_string(),
            json: true,
            stderr: false,
        }
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = VireoConfig::load_from_str(
        r#"
[overrides]
compare_generics = true
"#,
    )
    .unwrap_err();

    match err {
        ConfigError::Toml(message) => assert!(
            message.contains("compare_generics"),
            "unexpected message: {message}"
        ),
        other => panic!("expected toml error, got {other:?}"),
    }
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = VireoConfig::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vireo.toml");
    std::fs::write(&path, "[overrides]\ncompare_type_arguments = true\n").unwrap();

    let config = VireoConfig::load_from_path(&path).unwrap();
    assert!(config.override_options().compare_type_arguments);
}
