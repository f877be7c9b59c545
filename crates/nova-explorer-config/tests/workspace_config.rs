use std::path::PathBuf;

use nova_explorer_config::{discover_config_path, load_for_workspace, ConfigError, ExplorerConfig};

#[test]
fn missing_config_yields_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let (config, path) = load_for_workspace(tmp.path()).unwrap();
    assert_eq!(config, ExplorerConfig::default());
    assert_eq!(path, None);
    assert_eq!(config.workspace_folders(tmp.path()), vec![tmp.path().to_path_buf()]);
}

#[test]
fn config_is_loaded_from_workspace_root() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("nova-explorer.toml"),
        "[workspace]\nfolders = [\"app\", \"lib\"]\n\n[logging]\nlevel = \"debug\"\njson = true\n",
    )
    .unwrap();

    let (config, path) = load_for_workspace(tmp.path()).unwrap();
    assert_eq!(path, Some(tmp.path().join("nova-explorer.toml")));
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert_eq!(
        config.workspace_folders(tmp.path()),
        vec![tmp.path().join("app"), tmp.path().join("lib")]
    );
}

#[test]
fn visible_config_file_wins_over_hidden_one() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".nova-explorer.toml"), "").unwrap();
    assert_eq!(
        discover_config_path(tmp.path()),
        Some(tmp.path().join(".nova-explorer.toml"))
    );

    std::fs::write(tmp.path().join("nova-explorer.toml"), "").unwrap();
    assert_eq!(
        discover_config_path(tmp.path()),
        Some(tmp.path().join("nova-explorer.toml"))
    );
}

#[test]
fn unreadable_config_reports_path() {
    let tmp = tempfile::tempdir().unwrap();
    let missing: PathBuf = tmp.path().join("does-not-exist.toml");
    let err = ExplorerConfig::load_from_path(&missing).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, missing.display().to_string()),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn malformed_config_is_a_toml_error() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("nova-explorer.toml"), "[workspace\n").unwrap();
    let err = load_for_workspace(tmp.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "unexpected error: {err:?}");
}
