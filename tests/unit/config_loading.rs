//! Unit tests for loading configuration from disk

use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use vessel_track_downloader::config::{AppConfig, ConfigError};
use vessel_track_downloader::fetcher::Protocol;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(&path, content).unwrap();
    (temp, path)
}

#[test]
fn test_load_full_file() {
    let (_temp, path) = write_config(
        r#"
api:
  key: "abc123"
  base_url: "http://localhost:8080/api/exportvesseltrack"
  version: 3
  protocol: csv
vessel:
  mmsi: "538007475"
  start_date: "2022-01-08"
  end_date: "2025-12-26"
paths:
  temp_dir: /data/staging
  results_dir: /data/results
fetch:
  cooldown_secs: 5
"#,
    );

    let config = AppConfig::load(&path, true).unwrap();

    assert_eq!(config.api_key().unwrap().expose(), "abc123");
    assert_eq!(config.mmsi().unwrap().as_str(), "538007475");
    assert_eq!(config.date_bounds().unwrap(), ("2022-01-08", "2025-12-26"));
    assert_eq!(
        config.api.endpoint.base_url,
        "http://localhost:8080/api/exportvesseltrack"
    );
    assert_eq!(config.api.endpoint.protocol, Protocol::Csv);
    assert_eq!(config.cooldown(), Duration::from_secs(5));

    let layout = config.layout();
    assert_eq!(layout.temp_root(), PathBuf::from("/data/staging"));
    assert_eq!(layout.results_root(), PathBuf::from("/data/results"));
}

#[test]
fn test_empty_sections_fall_back_to_defaults() {
    let (_temp, path) = write_config("vessel:\n  mmsi: \"538007475\"\n");

    let config = AppConfig::load(&path, true).unwrap();
    assert_eq!(config.paths, AppConfig::default().paths);
    assert_eq!(config.fetch, AppConfig::default().fetch);
    assert_eq!(config.api.endpoint.version, 3);
}

#[test]
fn test_missing_optional_file_is_default() {
    let temp = TempDir::new().unwrap();
    let config = AppConfig::load(&temp.path().join("config.yaml"), false).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_missing_required_file_is_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.yaml");
    match AppConfig::load(&path, true) {
        Err(ConfigError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let (_temp, path) = write_config("fetch:\n  cooldown_secs: soon\n");
    assert!(matches!(
        AppConfig::load(&path, true),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_unknown_protocol_is_parse_error() {
    let (_temp, path) = write_config("api:\n  protocol: parquet\n");
    assert!(matches!(
        AppConfig::load(&path, true),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_environment_overrides_file() {
    let (_temp, path) = write_config("vessel:\n  mmsi: \"111111111\"\n  start_date: \"2022-01-08\"\n");
    let mut config = AppConfig::load(&path, true).unwrap();

    config.apply_env(|key| match key {
        "VESSEL_MMSI" => Some("538007475".to_string()),
        "TRACK_START_DATE" => Some("   ".to_string()),
        "TRACK_END_DATE" => Some("2022-02-01".to_string()),
        _ => None,
    });

    assert_eq!(config.mmsi().unwrap().as_str(), "538007475");
    assert_eq!(config.date_bounds().unwrap(), ("2022-01-08", "2022-02-01"));
}

#[test]
fn test_invalid_identifiers_surface_on_access() {
    let (_temp, path) = write_config("api:\n  key: \"a/b\"\nvessel:\n  mmsi: \"12345\"\n");
    let config = AppConfig::load(&path, true).unwrap();

    assert!(matches!(config.api_key(), Err(ConfigError::Invalid(_))));
    assert!(matches!(config.mmsi(), Err(ConfigError::Invalid(_))));
}
