//! Integration tests for configuration file loading
//!
//! Tests that point the platform config directory elsewhere are #[serial]
//! to avoid racing on the environment.

use cheesedir_common::config::{
    default_config_path, load_toml_config, resolve_config, ConfigSource, TomlConfig,
    DEFAULT_OUTPUT_FILE,
};
use cheesedir_common::Error;
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
data_file = "/srv/cheese/directory.csv"
output_file = "/srv/cheese/export.csv"
record_limit = 250

[mirror]
enabled = true
database_path = "/srv/cheese/mirror.db"

[logging]
level = "debug"
file = "/var/log/cheesedir.log"
"#;

#[test]
fn test_load_full_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, FULL_CONFIG).unwrap();

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.data_file, PathBuf::from("/srv/cheese/directory.csv"));
    assert_eq!(config.output_file, PathBuf::from("/srv/cheese/export.csv"));
    assert_eq!(config.record_limit, 250);
    assert_eq!(config.mirror.database_path, PathBuf::from("/srv/cheese/mirror.db"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, Some(PathBuf::from("/var/log/cheesedir.log")));
}

#[test]
fn test_explicit_missing_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let err = resolve_config(Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "record_limit = \"many\"").unwrap();

    let err = load_toml_config(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_platform_config_discovered() {
    let temp_dir = TempDir::new().unwrap();
    let app_dir = temp_dir.path().join("cheesedir");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(app_dir.join("config.toml"), "record_limit = 12\n").unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let discovered = default_config_path();
    let config = resolve_config(None);

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(discovered, Some(app_dir.join("config.toml")));
    let (config, source) = config.unwrap();
    assert_eq!(source, ConfigSource::Platform(app_dir.join("config.toml")));
    assert_eq!(config.record_limit, 12);
    assert_eq!(config.output_file, PathBuf::from(DEFAULT_OUTPUT_FILE));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_no_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let config = resolve_config(None);

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    let (config, source) = config.unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(source, ConfigSource::Defaults);
}
