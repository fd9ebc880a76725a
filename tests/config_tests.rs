//! Configuration persistence lifecycle

use matterstamp::{ConfigStore, StampConfig, StampError};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn load_edit_save_reload_lifecycle() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::new(dir.path().join("matterstamp.json"));

    // First start: nothing persisted yet.
    let mut config = store.load().unwrap();
    assert_eq!(config, StampConfig::default());

    config.set_entry("fieldName", "modified").unwrap();
    config.set_entry("dateFormat", "YYYY-MM-DD HH:mm").unwrap();
    store.save(&config).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.field_name, "modified");
    assert_eq!(reloaded.date_format, "YYYY-MM-DD HH:mm");
    assert_eq!(reloaded.delimiter, "---");
}

#[test]
fn partial_file_written_by_hand_merges_over_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matterstamp.json");
    fs::write(&path, r#"{"autoInsert": false}"#).unwrap();

    let config = ConfigStore::new(&path).load().unwrap();
    assert!(!config.auto_insert);
    assert_eq!(config.field_name, "lastmod");
    assert_eq!(config.date_format, "YYYY-MM-DD");
}

#[test]
fn blank_values_never_survive_a_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matterstamp.json");
    fs::write(&path, r#"{"delimiter": "", "fieldName": "\t "}"#).unwrap();

    let config = ConfigStore::new(&path).load().unwrap();
    assert_eq!(config.delimiter, "---");
    assert_eq!(config.field_name, "lastmod");
}

#[test]
fn unknown_keys_in_set_entry_are_rejected() {
    let mut config = StampConfig::default();
    let err = config.set_entry("frontMatterDelimiter", "---").unwrap_err();
    assert!(matches!(err, StampError::InvalidConfig { .. }));
}

#[test]
fn saved_file_is_valid_pretty_json() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::new(dir.path().join("matterstamp.json"));
    store.save(&StampConfig::default()).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["fieldName"], "lastmod");
    assert!(raw.ends_with('\n'));
}
