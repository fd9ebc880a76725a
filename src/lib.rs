//! matterstamp: keep a last-modified timestamp field up to date in markdown front matter
//!
//! This library watches for document changes and maintains a single `key: value`
//! line (by default `lastmod`) inside the front matter block at the top of a
//! markdown file. It deliberately does **not** parse the front matter as YAML:
//! the block is rewritten line by line, so every byte outside the one field
//! line survives an update untouched.
//!
//! # Features
//!
//! - **Minimal-disturbance upserts**: replace the first matching field line or
//!   insert a new one right before the closing delimiter
//! - **Self-trigger suppression**: an in-flight set keeps the updater's own
//!   writes from re-triggering it
//! - **Pluggable scanning** behind the [`BlockScanner`] trait
//! - **Token-based timestamps** (`YYYY`, `MM`, `DD`, `HH`, `mm`, `ss`) with an
//!   injectable [`Clock`] for tests
//! - **Partial configuration files** merged over defaults, sanitized on load
//!   and on every edit
//!
//! # Quick Start
//!
//! ## Stamping a document on change
//!
//! ```rust,no_run
//! use matterstamp::{ConfigStore, FsStore, Outcome, Updater, DEFAULT_CONFIG_FILE};
//! use std::path::Path;
//!
//! fn main() -> matterstamp::Result<()> {
//!     let config = ConfigStore::new(DEFAULT_CONFIG_FILE).load()?;
//!     let updater = Updater::new(FsStore, config);
//!
//!     match updater.handle_change(Path::new("notes/today.md"))? {
//!         Outcome::Updated(timestamp) => println!("stamped {timestamp}"),
//!         other => println!("nothing to do: {other:?}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Formatting timestamps
//!
//! ```rust
//! use chrono::NaiveDate;
//! use matterstamp::format_timestamp;
//!
//! let moment = NaiveDate::from_ymd_opt(2024, 3, 5)
//!     .unwrap()
//!     .and_hms_opt(9, 30, 0)
//!     .unwrap();
//! assert_eq!(format_timestamp(moment, "YYYY-MM-DD HH:mm"), "2024-03-05 09:30");
//! ```
//!
//! # Architecture
//!
//! - [`core`]: the updater, the block/field scanner, the upsert policy, and
//!   the clock
//! - [`io`]: the filesystem store and file resolution for batch runs
//! - [`config`]: the settings object and its JSON persistence
//! - [`error`]: error types shared across the crate
//!
//! The CLI host (stamp once, watch a directory, edit the configuration) lives
//! in the binary and is not part of the library API.

// Public API exports
pub use error::{Result, StampError};

pub use config::{ConfigStore, StampConfig, DEFAULT_CONFIG_FILE};

// Core types
pub use crate::core::{
    format_timestamp, upsert_field, BlockScanner, BlockSpan, Clock, DelimiterScanner,
    DocumentStore, FieldSpan, InFlightGuard, Outcome, Rewrite, SystemClock, Updater,
    UpsertOutcome,
};

// IO types
pub use io::{compile_patterns, is_excluded, is_markdown, resolve_files, write_atomic, FsStore};

// Internal modules
pub mod config;
pub mod core;
pub mod error;
pub mod io;

/// Convenience functions for common operations
pub mod convenience {
    //! One-shot helpers with default settings, for scripts that don't need an
    //! updater instance of their own.

    use crate::{FsStore, Outcome, Result, Rewrite, StampConfig, Updater};
    use std::path::Path;

    /// Stamp a single file using the default configuration
    pub fn stamp_file<P: AsRef<Path>>(path: P) -> Result<Outcome> {
        Updater::new(FsStore, StampConfig::default()).handle_change(path.as_ref())
    }

    /// Rewrite a document string in memory, without touching any file
    pub fn rewrite_text(text: &str, config: &StampConfig) -> Rewrite {
        Updater::new(FsStore, config.clone()).rewrite(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_end_to_end_workflow() {
        let mut temp_file = NamedTempFile::with_suffix(".md").unwrap();
        let content = "---\ntitle: Test Document\n---\n# Hello World\n\nBody content.";
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let outcome = convenience::stamp_file(temp_file.path()).unwrap();
        let timestamp = match outcome {
            Outcome::Updated(ts) => ts,
            other => panic!("expected Updated, got {other:?}"),
        };

        let updated = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(
            updated,
            format!("---\ntitle: Test Document\nlastmod: {timestamp}\n---\n# Hello World\n\nBody content.")
        );
    }

    #[test]
    fn test_rewrite_text_without_front_matter() {
        let config = StampConfig::default();
        assert_eq!(
            convenience::rewrite_text("plain text", &config),
            Rewrite::NoFrontMatter
        );
    }
}
