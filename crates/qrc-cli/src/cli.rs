//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use qrc_core::Classification;

/// Qt resource checker - audit .qrc manifests against disk and code
#[derive(Parser, Debug)]
#[command(name = "qrc-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Reconcile manifests, files on disk and code references
    ///
    /// Examples:
    ///   qrc-check scan -m resources.qrc
    ///   qrc-check scan ~/src/app -m res/app.qrc -m res/icons.qrc -r "*.png;*.svg"
    ///   qrc-check scan --config checker.toml --only missing
    Scan(ScanArgs),
}

/// Arguments of the `scan` command
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct ScanArgs {
    /// Project root; defaults to the config file's root, then the current directory
    pub root: Option<PathBuf>,

    /// Manifest file to audit (repeatable, in priority order)
    #[arg(short, long = "manifest", value_name = "FILE")]
    pub manifests: Vec<PathBuf>,

    /// Resource filter, e.g. "*.png;*.jpg"
    #[arg(short, long, value_name = "PATTERNS", env = "QRC_CHECK_RESOURCES")]
    pub resources: Option<String>,

    /// Source-file filter
    #[arg(long, value_name = "PATTERNS")]
    pub sources: Option<String>,

    /// Markup-file filter
    #[arg(long, value_name = "PATTERNS")]
    pub markup: Option<String>,

    /// Load settings from a .toml, .json or .yaml file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,

    /// Only list records of this class
    #[arg(long, value_name = "CLASS", value_parser = parse_classification)]
    pub only: Option<Classification>,
}

fn parse_classification(value: &str) -> Result<Classification, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_with_manifests() {
        let cli = Cli::parse_from(["qrc-check", "scan", "proj", "-m", "a.qrc", "-m", "b.qrc"]);
        let Some(Commands::Scan(args)) = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(args.root, Some(PathBuf::from("proj")));
        assert_eq!(
            args.manifests,
            vec![PathBuf::from("a.qrc"), PathBuf::from("b.qrc")]
        );
        assert!(!args.json);
        assert_eq!(args.only, None);
    }

    #[test]
    fn test_parse_only_filter() {
        let cli = Cli::parse_from(["qrc-check", "scan", "-m", "a.qrc", "--only", "Missing"]);
        let Some(Commands::Scan(args)) = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(args.only, Some(Classification::Missing));
    }

    #[test]
    fn test_rejects_unknown_class() {
        let result = Cli::try_parse_from(["qrc-check", "scan", "--only", "stale"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["qrc-check", "scan", "-m", "a.qrc", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["qrc-check"]);
        assert!(cli.command.is_none());
    }
}
