//! The front-matter updater
//!
//! [`Updater::handle_change`] is the single entry point: called once per
//! document-changed notification, it reads the document through its
//! [`DocumentStore`], rewrites the front matter block with a fresh timestamp,
//! and writes the document back only when the text actually changed.
//!
//! Because a successful write triggers a new change notification for the same
//! document, the updater keeps an in-flight set of paths it is currently
//! writing and suppresses the echo. The set is instance state, acquired and
//! released through an RAII guard around the write so release runs on every
//! exit path.

use crate::config::StampConfig;
use crate::core::scan::{BlockScanner, DelimiterScanner};
use crate::core::stamp::{format_timestamp, Clock, SystemClock};
use crate::core::upsert::{upsert_field, UpsertOutcome};
use crate::error::Result;
use crate::io::is_markdown;
use log::{debug, error};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// What the host requires from the document side: read the full text of a
/// document and replace it. Both operations may fail with I/O errors.
pub trait DocumentStore {
    fn read_text(&self, path: &Path) -> Result<String>;
    fn write_text(&self, path: &Path, text: &str) -> Result<()>;
}

/// Result of handling one change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The notification is the echo of this updater's own write
    Skipped,
    /// The document type is not targeted
    NotApplicable,
    /// The document has no front matter block
    NoFrontMatter,
    /// The field is absent and auto-insert is disabled
    SkippedNoAutoInsert,
    /// The rewritten text equals the old text, nothing written
    Unchanged,
    /// The document was written with this timestamp
    Updated(String),
}

/// Result of the pure rewrite step, before any write happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    NoFrontMatter,
    SkippedNoAutoInsert,
    Unchanged,
    Updated { text: String, timestamp: String },
}

/// Keeps the front matter timestamp field of documents up to date
pub struct Updater<S> {
    store: S,
    config: StampConfig,
    scanner: Box<dyn BlockScanner + Send + Sync>,
    clock: Box<dyn Clock + Send + Sync>,
    in_flight: Mutex<HashSet<PathBuf>>,
}

impl<S: DocumentStore> Updater<S> {
    /// Create an updater with the default line scanner and the system clock
    pub fn new(store: S, config: StampConfig) -> Self {
        let scanner = DelimiterScanner::new(&config.delimiter);
        Self {
            store,
            config,
            scanner: Box::new(scanner),
            clock: Box::new(SystemClock),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Replace the block/field scanner
    pub fn with_scanner(mut self, scanner: impl BlockScanner + Send + Sync + 'static) -> Self {
        self.scanner = Box::new(scanner);
        self
    }

    /// Replace the clock, mainly for tests
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &StampConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one document-changed notification
    ///
    /// Safe to call on arbitrary documents; everything that is not an actual
    /// update is reported as a non-error [`Outcome`]. Read and write failures
    /// come back as errors, with the in-flight marker released either way.
    pub fn handle_change(&self, path: &Path) -> Result<Outcome> {
        if self.is_in_flight(path) {
            if self.config.debug {
                debug!("{}: change is an echo of our own write", path.display());
            }
            return Ok(Outcome::Skipped);
        }

        if !is_markdown(path) {
            return Ok(Outcome::NotApplicable);
        }

        let text = self.store.read_text(path).inspect_err(|e| error!("{e}"))?;

        match self.rewrite(&text) {
            Rewrite::NoFrontMatter => {
                if self.config.debug {
                    debug!("{}: no front matter block", path.display());
                }
                Ok(Outcome::NoFrontMatter)
            }
            Rewrite::SkippedNoAutoInsert => Ok(Outcome::SkippedNoAutoInsert),
            Rewrite::Unchanged => Ok(Outcome::Unchanged),
            Rewrite::Updated { text, timestamp } => {
                let _guard = self.mark_in_flight(path);
                self.store
                    .write_text(path, &text)
                    .inspect_err(|e| error!("{e}"))?;
                if self.config.debug {
                    debug!(
                        "{}: {} set to {}",
                        path.display(),
                        self.config.field_name,
                        timestamp
                    );
                }
                Ok(Outcome::Updated(timestamp))
            }
        }
    }

    /// Rewrite the document text without touching the store
    ///
    /// This is steps 3–7 of the update: locate the block, upsert the field
    /// with a freshly formatted timestamp, reassemble, and compare against
    /// the input. Used by `handle_change` and by dry-run previews.
    pub fn rewrite(&self, text: &str) -> Rewrite {
        let Some(block_span) = self.scanner.locate_block(text) else {
            return Rewrite::NoFrontMatter;
        };
        let (block, suffix) = text.split_at(block_span.end);

        let timestamp = format_timestamp(self.clock.now(), &self.config.date_format);

        match upsert_field(
            self.scanner.as_ref(),
            block,
            &self.config.field_name,
            &timestamp,
            self.config.auto_insert,
        ) {
            UpsertOutcome::MissingNoInsert => Rewrite::SkippedNoAutoInsert,
            UpsertOutcome::Applied { block: updated } => {
                let new_text = format!("{updated}{suffix}");
                if new_text == text {
                    Rewrite::Unchanged
                } else {
                    Rewrite::Updated {
                        text: new_text,
                        timestamp,
                    }
                }
            }
        }
    }

    /// Mark `path` as being written by this updater
    ///
    /// Change notifications for a marked path are suppressed until the
    /// returned guard is dropped. Exposed for hosts that replace document
    /// text through their own channel.
    pub fn mark_in_flight(&self, path: &Path) -> InFlightGuard<'_> {
        InFlightGuard::acquire(&self.in_flight, path)
    }

    fn is_in_flight(&self, path: &Path) -> bool {
        self.in_flight
            .lock()
            .expect("in-flight set poisoned")
            .contains(path)
    }
}

/// Scoped membership in the in-flight set
///
/// Dropping the guard removes the path again, so a failed write cannot leave
/// the document permanently suppressed.
pub struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<PathBuf>>,
    path: PathBuf,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a Mutex<HashSet<PathBuf>>, path: &Path) -> Self {
        let path = path.to_path_buf();
        set.lock()
            .expect("in-flight set poisoned")
            .insert(path.clone());
        Self { set, path }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .expect("in-flight set poisoned")
            .remove(&self.path);
    }
}
