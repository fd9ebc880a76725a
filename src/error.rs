//! Error types for the matterstamp library
//!
//! This module provides error handling for all library operations: document
//! I/O through the store, configuration loading and persistence, and the
//! filesystem watcher used by the CLI host.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum StampError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document store could not read a document
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document store could not write a document back
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is present but unusable
    #[error("invalid configuration in {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    /// An exclude pattern supplied on the command line did not compile
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Filesystem watcher errors
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, StampError>;

impl StampError {
    /// Create a new read failure error
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a new write failure error
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
