use vireo_config::discover_config_path;

#[test]
fn finds_nothing_in_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(discover_config_path(dir.path()), None);
}

#[test]
fn prefers_plain_name_over_hidden() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".vireo.toml"), "").unwrap();
    assert_eq!(
        discover_config_path(dir.path()),
        Some(dir.path().join(".vireo.toml"))
    );

    std::fs::write(dir.path().join("vireo.toml"), "").unwrap();
    assert_eq!(
        discover_config_path(dir.path()),
        Some(dir.path().join("vireo.toml"))
    );
}

#[test]
fn ignores_directories_named_like_configs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("vireo.toml")).unwrap();
    assert_eq!(discover_config_path(dir.path()), None);
}
