//! Tests for the pacprune configuration system.

use std::sync::Mutex;

use pacprune_core::config::{CliOverrides, PruneConfig};
use pacprune_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 5] = [
    "PACPRUNE_RETENTION_DAYS",
    "PACPRUNE_GRACE_MULTIPLIER",
    "PACPRUNE_INDEX_SUFFIX",
    "PACPRUNE_SOURCES_DIR",
    "PACPRUNE_THREADS",
];

/// Clear all PACPRUNE_ env vars and point HOME at an empty directory.
fn isolate_env(home: &std::path::Path) {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pacprune.toml"),
        r#"
[retention]
window_days = 30
grace_multiplier = 6

[scan]
index_suffix = ".db"
"#,
    )
    .unwrap();

    std::env::set_var("PACPRUNE_RETENTION_DAYS", "60");
    std::env::set_var("PACPRUNE_SOURCES_DIR", "src-archive");

    let cli = CliOverrides {
        retention_days: Some(90),
        ..Default::default()
    };
    let config = PruneConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats env and project
    assert_eq!(config.retention.window_days, Some(90));
    // Project value survives when nobody overrides it
    assert_eq!(config.retention.effective_grace_multiplier(), 6);
    assert_eq!(config.scan.effective_index_suffix(), ".db");
    // Env beats the compiled default
    assert_eq!(config.scan.effective_sources_dir(), "src-archive");

    isolate_env(home.path());
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let dir = tempfile::tempdir().unwrap();
    let config = PruneConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.scan.effective_index_suffix(), ".files");
    assert_eq!(config.scan.effective_sources_dir(), "sources");
    assert_eq!(config.scan.effective_threads(), 0);
    assert_eq!(config.retention.effective_grace_multiplier(), 4);
}

#[test]
fn test_retention_window_has_no_default() {
    let config = PruneConfig::default();
    match config.retention.effective_window() {
        Err(ConfigError::MissingValue { field, .. }) => {
            assert_eq!(field, "retention.window_days");
        }
        other => panic!("Expected MissingValue, got: {:?}", other),
    }
}

#[test]
fn test_effective_window_in_days() {
    let config = PruneConfig::from_toml("[retention]\nwindow_days = 365\n").unwrap();
    assert_eq!(
        config.retention.effective_window().unwrap(),
        chrono::Duration::days(365)
    );
}

#[test]
fn test_user_config_is_lowest_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let user_dir = home.path().join(".pacprune");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[retention]\nwindow_days = 10\ngrace_multiplier = 2\n",
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pacprune.toml"), "[retention]\nwindow_days = 20\n").unwrap();

    let config = PruneConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.retention.window_days, Some(20));
    assert_eq!(config.retention.grace_multiplier, Some(2));

    isolate_env(home.path());
}

#[test]
fn test_explicit_config_file_replaces_project_lookup() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pacprune.toml"), "[retention]\nwindow_days = 20\n").unwrap();
    let explicit = dir.path().join("mirror.toml");
    std::fs::write(&explicit, "[retention]\nwindow_days = 45\n").unwrap();

    let cli = CliOverrides {
        config_file: Some(explicit),
        ..Default::default()
    };
    let config = PruneConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.retention.window_days, Some(45));
}

#[test]
fn test_explicit_config_file_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let dir = tempfile::tempdir().unwrap();
    let cli = CliOverrides {
        config_file: Some(dir.path().join("nope.toml")),
        ..Default::default()
    };
    let result = PruneConfig::load(dir.path(), Some(&cli));
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pacprune.toml"), "this is not valid toml {{{{").unwrap();

    match PruneConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_zero_window_rejected() {
    let config = PruneConfig::from_toml("[retention]\nwindow_days = 0\n").unwrap();
    match PruneConfig::validate(&config) {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "retention.window_days");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_sources_dir_must_be_a_single_name() {
    for bad in ["../elsewhere", ".", "..", "", "a/b", "./sources", "sources/"] {
        let config = PruneConfig::from_toml(&format!("[scan]\nsources_dir = {bad:?}\n")).unwrap();
        assert!(
            matches!(
                PruneConfig::validate(&config),
                Err(ConfigError::ValidationFailed { .. })
            ),
            "{bad:?} should be rejected"
        );
    }

    let config = PruneConfig::from_toml("[scan]\nsources_dir = \"src-archive\"\n").unwrap();
    assert!(PruneConfig::validate(&config).is_ok());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config =
        PruneConfig::from_toml("[retention]\nwindow_days = 7\nfuture_knob = true\n").unwrap();
    assert_eq!(config.retention.window_days, Some(7));
}

#[test]
fn test_to_toml_reloads() {
    let mut config = PruneConfig::default();
    config.retention.window_days = Some(14);
    config.scan.index_suffix = Some(".db".to_string());

    let text = config.to_toml().unwrap();
    let reloaded = PruneConfig::from_toml(&text).unwrap();
    assert_eq!(reloaded.retention.window_days, Some(14));
    assert_eq!(reloaded.scan.effective_index_suffix(), ".db");
}
