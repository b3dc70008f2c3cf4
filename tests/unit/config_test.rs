//! Tests for loading the configuration file

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tokenkit::config::{Config, ConfigError};
use tokenkit::output::OutputMode;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_full_config() {
    let (_dir, path) = write_config(
        r#"
[scan]
stop_markers = ["?>", "%>"]

[detect]
candidates = ["ini", "c"]

[output]
format = "json"
color = false
"#,
    );
    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.scan.stop_markers, ["?>", "%>"]);
    assert_eq!(config.detect.candidates, ["ini", "c"]);
    assert_eq!(config.output.format, OutputMode::Json);
    assert!(!config.output.color);
}

#[test]
fn test_empty_file_is_default() {
    let (_dir, path) = write_config("");
    let config = Config::from_file(&path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.output.format, OutputMode::Human);
    assert!(config.output.color);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_invalid_toml_names_the_file() {
    let (_dir, path) = write_config("[output]\nformat = \"yaml\"\n");
    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn test_unknown_section_is_rejected() {
    let (_dir, path) = write_config("[server]\nport = 1\n");
    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_round_trips_through_toml() {
    let mut config = Config::default();
    config.scan.stop_markers.push("__END__".to_string());
    config.output.color = false;
    let text = toml::to_string(&config).unwrap();
    let (_dir, path) = write_config(&text);
    assert_eq!(Config::from_file(&path).unwrap(), config);
}
