//! Filesystem access
//!
//! `FsStore` is the production [`DocumentStore`]: plain reads, atomic writes
//! through a temp file in the target directory. File resolution for batch
//! runs recurses into directories and keeps markdown files only.

use crate::core::DocumentStore;
use crate::error::{Result, StampError};
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Whether the path carries a targeted markdown extension
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "md" || s == "markdown")
        .unwrap_or(false)
}

/// Whether the path matches any of the exclude patterns
pub fn is_excluded(path: &Path, exclude: &[Regex]) -> bool {
    let text = path.to_string_lossy();
    exclude.iter().any(|re| re.is_match(&text))
}

/// Expand files and directories into the list of files to process
///
/// Explicit file arguments are kept as given; directories are walked
/// recursively for markdown files. Excluded paths are dropped in both cases.
pub fn resolve_files(paths: &[PathBuf], exclude: &[Regex]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if !is_excluded(path, exclude) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file()
                    && is_markdown(entry.path())
                    && !is_excluded(entry.path(), exclude)
                {
                    files.push(entry.path().to_owned());
                }
            }
        }
    }
    files
}

/// Compile raw exclude patterns from the command line
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(StampError::from))
        .collect()
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| StampError::read_failed(path, e))
}

/// Replace the file's content atomically
///
/// The new text goes into a temp file next to the target, which is then
/// renamed over it, so a crash mid-write never leaves a half-written
/// document behind.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| StampError::write_failed(path, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| StampError::write_failed(path, e))?;
    tmp.persist(path)
        .map_err(|e| StampError::write_failed(path, e.error))?;
    Ok(())
}

/// Document store backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn read_text(&self, path: &Path) -> Result<String> {
        read_to_string(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        write_atomic(path, text)
    }
}
