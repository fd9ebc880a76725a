//! Configuration model and persistence
//!
//! The updater is driven by a small settings object persisted as JSON. A
//! partially filled file merges over the built-in defaults at load time, and
//! blank `delimiter`/`field_name` values are replaced by their defaults both
//! at load and on every edit.

use crate::error::{Result, StampError};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default file name for the persisted configuration
pub const DEFAULT_CONFIG_FILE: &str = "matterstamp.json";

pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";
pub const DEFAULT_DELIMITER: &str = "---";
pub const DEFAULT_FIELD_NAME: &str = "lastmod";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_field_name() -> String {
    DEFAULT_FIELD_NAME.to_string()
}

fn default_auto_insert() -> bool {
    true
}

/// Settings for the front-matter updater
///
/// Every field carries a serde default, so a configuration file containing
/// only some of the keys deserializes with the remaining fields at their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampConfig {
    /// Timestamp format using the literal tokens YYYY, MM, DD, HH, mm, ss
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Marker line delimiting the front matter block
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Name of the key that receives the timestamp
    #[serde(default = "default_field_name")]
    pub field_name: String,

    /// Emit diagnostic logging for skipped and updated documents
    #[serde(default)]
    pub debug: bool,

    /// Insert the field when the block does not contain it yet
    #[serde(default = "default_auto_insert")]
    pub auto_insert: bool,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            delimiter: default_delimiter(),
            field_name: default_field_name(),
            debug: false,
            auto_insert: true,
        }
    }
}

impl StampConfig {
    /// Replace blank `delimiter` and `field_name` values with their defaults
    ///
    /// Applied after every load and after every edit, so the updater never
    /// sees an unusable marker or key.
    pub fn sanitize(&mut self) {
        if self.delimiter.trim().is_empty() {
            warn!("front matter delimiter is blank, using {DEFAULT_DELIMITER:?}");
            self.delimiter = default_delimiter();
        }
        if self.field_name.trim().is_empty() {
            warn!("field name is blank, using {DEFAULT_FIELD_NAME:?}");
            self.field_name = default_field_name();
        }
    }

    /// Set a configuration entry by its JSON key name, sanitizing afterwards
    pub fn set_entry(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "dateFormat" => self.date_format = value.to_string(),
            "delimiter" => self.delimiter = value.to_string(),
            "fieldName" => self.field_name = value.to_string(),
            "debug" => {
                self.debug = value.parse().map_err(|_| {
                    StampError::invalid_config(key, format!("expected true or false, got {value:?}"))
                })?
            }
            "autoInsert" => {
                self.auto_insert = value.parse().map_err(|_| {
                    StampError::invalid_config(key, format!("expected true or false, got {value:?}"))
                })?
            }
            other => {
                return Err(StampError::invalid_config(
                    other,
                    "unknown configuration key",
                ));
            }
        }
        self.sanitize();
        Ok(())
    }
}

/// Loads and persists the configuration file
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, merging a partial file over defaults
    ///
    /// A missing file yields the pure defaults. A file that exists but does
    /// not parse as a JSON object is an error rather than a silent reset.
    pub fn load(&self) -> Result<StampConfig> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StampConfig::default());
            }
            Err(e) => return Err(StampError::read_failed(&self.path, e)),
        };

        let mut config: StampConfig = serde_json::from_str(&raw)
            .map_err(|e| StampError::invalid_config(&self.path, e.to_string()))?;
        config.sanitize();
        Ok(config)
    }

    /// Persist the full configuration object
    ///
    /// Written through a temporary file in the target directory and renamed
    /// into place, so a crash mid-save cannot truncate the existing file.
    pub fn save(&self, config: &StampConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| StampError::invalid_config(&self.path, e.to_string()))?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
            .map_err(|e| StampError::write_failed(&self.path, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| StampError::write_failed(&self.path, e))?;
        tmp.write_all(b"\n")
            .map_err(|e| StampError::write_failed(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StampError::write_failed(&self.path, e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StampConfig::default();
        assert_eq!(config.date_format, "YYYY-MM-DD");
        assert_eq!(config.delimiter, "---");
        assert_eq!(config.field_name, "lastmod");
        assert!(!config.debug);
        assert!(config.auto_insert);
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matterstamp.json");
        fs::write(&path, r#"{"fieldName": "updated", "debug": true}"#).unwrap();

        let config = ConfigStore::new(&path).load().unwrap();
        assert_eq!(config.field_name, "updated");
        assert!(config.debug);
        assert_eq!(config.date_format, "YYYY-MM-DD");
        assert_eq!(config.delimiter, "---");
        assert!(config.auto_insert);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), StampConfig::default());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matterstamp.json");
        fs::write(&path, "{not json").unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StampError::InvalidConfig { .. }));
    }

    #[test]
    fn test_blank_delimiter_sanitized_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matterstamp.json");
        fs::write(&path, r#"{"delimiter": "   ", "fieldName": ""}"#).unwrap();

        let config = ConfigStore::new(&path).load().unwrap();
        assert_eq!(config.delimiter, "---");
        assert_eq!(config.field_name, "lastmod");
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("matterstamp.json"));

        let mut config = StampConfig::default();
        config.field_name = "modified".to_string();
        config.auto_insert = false;
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_set_entry() {
        let mut config = StampConfig::default();
        config.set_entry("dateFormat", "YYYY-MM-DD HH:mm:ss").unwrap();
        config.set_entry("autoInsert", "false").unwrap();
        assert_eq!(config.date_format, "YYYY-MM-DD HH:mm:ss");
        assert!(!config.auto_insert);

        // blank values fall back to defaults at each edit
        config.set_entry("delimiter", "  ").unwrap();
        assert_eq!(config.delimiter, "---");

        assert!(config.set_entry("debug", "maybe").is_err());
        assert!(config.set_entry("unknown", "x").is_err());
    }
}
