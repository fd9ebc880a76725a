//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::{ConfigAction, ConfigArgs, ConfigOverrides, StampArgs, WatchArgs};
use log::{debug, error, info, warn};
use matterstamp::{
    compile_patterns, is_markdown, resolve_files, ConfigStore, DocumentStore, FsStore, Outcome,
    Result, Rewrite, StampConfig, StampError, Updater,
};
use std::path::Path;

/// Load the configuration file and apply command-line overrides
pub fn load_config(overrides: &ConfigOverrides) -> Result<StampConfig> {
    let mut config = ConfigStore::new(&overrides.config).load()?;

    if let Some(field) = &overrides.field {
        config.field_name = field.clone();
    }
    if let Some(delimiter) = &overrides.delimiter {
        config.delimiter = delimiter.clone();
    }
    if let Some(format) = &overrides.date_format {
        config.date_format = format.clone();
    }
    if overrides.no_insert {
        config.auto_insert = false;
    }
    if overrides.debug {
        config.debug = true;
    }

    config.sanitize();
    Ok(config)
}

/// Execute the stamp command
pub fn stamp_command(args: StampArgs) -> Result<()> {
    let config = load_config(&args.overrides)?;
    let exclude = compile_patterns(&args.exclude_patterns)?;

    let files = resolve_files(&args.paths, &exclude);
    if files.is_empty() {
        warn!("no files found to process");
        return Ok(());
    }

    let updater = Updater::new(FsStore, config);
    let mut updated = 0usize;
    let mut failed = 0usize;

    for file in &files {
        let outcome = if args.dry_run {
            preview(&updater, file)
        } else {
            updater.handle_change(file)
        };

        match outcome {
            Ok(Outcome::Updated(timestamp)) => {
                updated += 1;
                info!(
                    "{}: {} -> {}",
                    file.display(),
                    updater.config().field_name,
                    timestamp
                );
            }
            Ok(other) => debug!("{}: {:?}", file.display(), other),
            // Failures are isolated to the one document; keep going.
            Err(e) => {
                failed += 1;
                error!("{e}");
            }
        }
    }

    let verb = if args.dry_run {
        "would be updated"
    } else {
        "updated"
    };
    let failures = if failed > 0 {
        format!(", {failed} failed")
    } else {
        String::new()
    };
    println!("{} files processed, {updated} {verb}{failures}", files.len());
    Ok(())
}

/// Rewrite a document and print the result instead of writing it
fn preview(updater: &Updater<FsStore>, path: &Path) -> Result<Outcome> {
    if !is_markdown(path) {
        return Ok(Outcome::NotApplicable);
    }
    let text = updater.store().read_text(path)?;
    match updater.rewrite(&text) {
        Rewrite::NoFrontMatter => Ok(Outcome::NoFrontMatter),
        Rewrite::SkippedNoAutoInsert => Ok(Outcome::SkippedNoAutoInsert),
        Rewrite::Unchanged => Ok(Outcome::Unchanged),
        Rewrite::Updated { text, timestamp } => {
            println!("--- Dry run: {} ---", path.display());
            println!("{text}");
            Ok(Outcome::Updated(timestamp))
        }
    }
}

/// Execute the watch command
pub fn watch_command(args: WatchArgs) -> Result<()> {
    let config = load_config(&args.overrides)?;
    let exclude = compile_patterns(&args.exclude_patterns)?;
    let updater = Updater::new(FsStore, config);

    crate::cli_bin::watch::run(&args.paths, &exclude, args.debounce, &updater)
}

/// Execute the config command
pub fn config_command(args: ConfigArgs) -> Result<()> {
    let store = ConfigStore::new(&args.config);

    match args.action {
        ConfigAction::Show => {
            let config = store.load()?;
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| StampError::invalid_config(store.path(), e.to_string()))?;
            println!("{json}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = store.load()?;
            config.set_entry(&key, &value)?;
            store.save(&config)?;
            info!("saved {}", store.path().display());
        }
    }
    Ok(())
}
