//! Command-line argument definitions and parsing
//!
//! This module provides the CLI argument surface using clap, with proper
//! separation between CLI concerns and library operations.

use clap::{Args, Parser, Subcommand};
use matterstamp::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "matterstamp",
    version,
    about = "Keep a last-modified timestamp field up to date in markdown front matter",
    long_about = "matterstamp maintains a single key: value line (by default lastmod) inside \
                  the front matter block of markdown files. Run it once over a tree with \
                  `stamp`, or leave it running with `watch` to stamp files as they change."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stamp the timestamp field once in the given files or directories
    Stamp(StampArgs),
    /// Watch files or directories and stamp markdown files as they change
    Watch(WatchArgs),
    /// Inspect or edit the persisted configuration
    Config(ConfigArgs),
}

/// Configuration source and per-invocation overrides
#[derive(Args, Debug)]
pub struct ConfigOverrides {
    /// Configuration file to load (missing file means defaults)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the timestamp field name
    #[arg(long, value_name = "NAME")]
    pub field: Option<String>,

    /// Override the front matter delimiter line
    #[arg(long, value_name = "MARKER")]
    pub delimiter: Option<String>,

    /// Override the timestamp format (tokens: YYYY MM DD HH mm ss)
    #[arg(long, value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Do not insert the field into blocks that lack it
    #[arg(long)]
    pub no_insert: bool,

    /// Log a diagnostic line for every skipped or updated document
    #[arg(long)]
    pub debug: bool,
}

/// Arguments for the stamp command
#[derive(Args, Debug)]
pub struct StampArgs {
    /// Files or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Exclude files whose path matches these patterns
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,

    /// Preview rewritten documents without modifying files
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Files or directories to watch
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Exclude files whose path matches these patterns
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,

    /// Quiet interval before a batch of change events is processed
    #[arg(long, value_name = "MS", default_value_t = 300)]
    pub debounce: u64,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file to operate on
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set one entry and save the file
    Set {
        /// Entry name: dateFormat, delimiter, fieldName, debug or autoInsert
        key: String,
        /// New value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_stamp_command() {
        let args = vec!["matterstamp", "stamp", "--dry-run", "notes/", "extra.md"];
        let cli = Cli::try_parse_from(args).unwrap();

        if let Commands::Stamp(stamp_args) = cli.command {
            assert!(stamp_args.dry_run);
            assert_eq!(
                stamp_args.paths,
                vec![PathBuf::from("notes/"), PathBuf::from("extra.md")]
            );
            assert_eq!(
                stamp_args.overrides.config,
                PathBuf::from(DEFAULT_CONFIG_FILE)
            );
        } else {
            panic!("Expected Stamp command");
        }
    }

    #[test]
    fn test_stamp_requires_paths() {
        assert!(Cli::try_parse_from(vec!["matterstamp", "stamp"]).is_err());
    }

    #[test]
    fn test_watch_command_overrides() {
        let args = vec![
            "matterstamp",
            "watch",
            "--field",
            "updated",
            "--delimiter",
            "+++",
            "--no-insert",
            "--debounce",
            "500",
            "--exclude",
            "drafts/",
            "vault/",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        if let Commands::Watch(watch_args) = cli.command {
            assert_eq!(watch_args.overrides.field.as_deref(), Some("updated"));
            assert_eq!(watch_args.overrides.delimiter.as_deref(), Some("+++"));
            assert!(watch_args.overrides.no_insert);
            assert_eq!(watch_args.debounce, 500);
            assert_eq!(watch_args.exclude_patterns, vec!["drafts/".to_string()]);
        } else {
            panic!("Expected Watch command");
        }
    }

    #[test]
    fn test_config_set_command() {
        let args = vec!["matterstamp", "config", "set", "fieldName", "modified"];
        let cli = Cli::try_parse_from(args).unwrap();

        if let Commands::Config(config_args) = cli.command {
            match config_args.action {
                ConfigAction::Set { key, value } => {
                    assert_eq!(key, "fieldName");
                    assert_eq!(value, "modified");
                }
                other => panic!("Expected Set action, got {other:?}"),
            }
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_verbose_quiet_conflict() {
        let args = vec!["matterstamp", "--verbose", "--quiet", "config", "show"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
