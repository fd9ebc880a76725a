//! Filesystem watcher for live stamping
//!
//! Subscribes to change notifications for the given paths and feeds each
//! changed markdown file to the updater. Editors tend to emit bursts of
//! events per save, so events are batched by a small debouncer and only
//! processed after a quiet interval. The updater's own writes come back
//! through this same stream; its in-flight set breaks that feedback loop.

use log::{debug, error, info};
use matterstamp::{is_excluded, FsStore, Outcome, Result, Updater};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

/// Batches rapid file events until a quiet interval passes
struct Debouncer {
    pending: HashSet<PathBuf>,
    last_event: Option<Instant>,
    quiet: Duration,
}

impl Debouncer {
    fn new(quiet: Duration) -> Self {
        Self {
            pending: HashSet::new(),
            last_event: None,
            quiet,
        }
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty() && self.last_event.is_some_and(|t| t.elapsed() >= self.quiet)
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            self.quiet
        }
    }
}

/// Run the blocking watch loop until the event stream closes
pub fn run(
    paths: &[PathBuf],
    exclude: &[Regex],
    debounce_ms: u64,
    updater: &Updater<FsStore>,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;

    for path in paths {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(path, mode)?;
        info!("watching {}", path.display());
    }

    let mut debouncer = Debouncer::new(Duration::from_millis(debounce_ms));

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Ok(_)) => {}
            Ok(Err(e)) => error!("watch error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                handle_changes(&debouncer.take(), exclude, updater);
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Stamp one batch of changed files, isolating failures per document
fn handle_changes(paths: &[PathBuf], exclude: &[Regex], updater: &Updater<FsStore>) {
    for path in paths {
        if is_excluded(path, exclude) {
            continue;
        }
        match updater.handle_change(path) {
            Ok(Outcome::Updated(timestamp)) => {
                info!(
                    "{}: {} -> {}",
                    path.display(),
                    updater.config().field_name,
                    timestamp
                );
            }
            Ok(outcome) => debug!("{}: {:?}", path.display(), outcome),
            Err(e) => error!("{e}"),
        }
    }
}
