use anyhow::Result;
use clap::Parser;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Stamp(args) => commands::stamp_command(args)?,
        Commands::Watch(args) => commands::watch_command(args)?,
        Commands::Config(args) => commands::config_command(args)?,
    }
    Ok(())
}

/// RUST_LOG still wins; the flags only pick the default filter.
fn init_logging(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
