//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use meetgrid_domain::{MeetgridError, ZeroAvailabilityPolicy};
use meetgrid_infra::config;
use tempfile::tempdir;

#[test]
fn test_load_config_from_json_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meetgrid.json");
    std::fs::write(
        &path,
        r#"{
            "logging": { "level": "debug", "json": true },
            "schedule": {
                "zero_availability_policy": "remove",
                "max_candidate_days": 14,
                "best_slot_limit": 3
            },
            "holidays": { "path": "/srv/meetgrid/holidays.json" }
        }"#,
    )
    .expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("Failed to load config from JSON file");

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert_eq!(config.schedule.zero_availability_policy, ZeroAvailabilityPolicy::Remove);
    assert_eq!(config.schedule.max_candidate_days, 14);
    assert_eq!(config.schedule.best_slot_limit, 3);
    assert_eq!(config.holidays.path.as_deref(), Some("/srv/meetgrid/holidays.json"));
}

#[test]
fn test_load_config_from_toml_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meetgrid.toml");
    std::fs::write(
        &path,
        r#"
[logging]
level = "warn"

[schedule]
max_candidate_days = 93
"#,
    )
    .expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("Failed to load config from TOML file");

    assert_eq!(config.logging.level, "warn");
    assert!(!config.logging.json);
    assert_eq!(config.schedule.max_candidate_days, 93);
    assert_eq!(config.schedule.zero_availability_policy, ZeroAvailabilityPolicy::Retain);
    assert!(config.holidays.path.is_none());
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/meetgrid.json".into()));

    match result {
        Err(MeetgridError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meetgrid.json");
    std::fs::write(&path, r#"{ "this is": "not valid" "#).expect("Failed to write config");

    match config::load_from_file(Some(path)) {
        Err(MeetgridError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_rejects_unknown_policy() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meetgrid.toml");
    std::fs::write(&path, "[schedule]\nzero_availability_policy = \"archive\"\n")
        .expect("Failed to write config");

    assert!(matches!(config::load_from_file(Some(path)), Err(MeetgridError::Config(_))));
}
