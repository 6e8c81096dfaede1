//! Qt resource checker CLI
//!
//! Audits `.qrc` manifests against the files on disk and the resource paths
//! referenced from source and `.ui` files.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            // No command provided - show help hint
            println!("{} Qt resource checker", "qrc-check".green().bold());
            println!();
            println!("Run {} for available commands.", "qrc-check --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr so that `--json` output on stdout stays parseable.
fn init_tracing(verbose: bool) -> Result<()> {
    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);
    let result = if verbose {
        tracing::subscriber::set_global_default(
            builder.with_max_level(Level::DEBUG).with_target(true).finish(),
        )
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing::subscriber::set_global_default(
            builder.with_env_filter(filter).with_target(false).finish(),
        )
    };
    result.map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Scan(args) => {
            let cwd = std::env::current_dir()?;
            commands::run_scan(&cwd, args)
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}
