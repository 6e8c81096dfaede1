//! Scan command implementation

use std::fmt;
use std::path::Path;

use colored::{ColoredString, Colorize};
use qrc_core::{
    CheckerConfig, Classification, Diagnostic, ResourceRecord, ScanEngine, ScanReport,
    ScanRequest, Severity,
};
use qrc_fs::NormalizedPath;

use crate::cli::ScanArgs;
use crate::error::{CliError, Result};

/// Run the scan command
pub fn run_scan(cwd: &Path, args: ScanArgs) -> Result<()> {
    let json = args.json;
    let only = args.only;
    let request = build_request(cwd, args)?;
    let report = ScanEngine::new(request)?.run();

    if json {
        println!("{}", render_json(&report, only)?);
    } else {
        print!("{}", render_table(&report, only));
    }
    Ok(())
}

/// Layer command-line values over the optional config file.
///
/// Paths given on the command line are taken from `cwd`.
pub fn build_request(cwd: &Path, args: ScanArgs) -> Result<ScanRequest> {
    let mut config = match &args.config {
        Some(path) => CheckerConfig::load(&cwd.join(path))?,
        None => CheckerConfig::default(),
    };

    config.merge(CheckerConfig {
        root: args.root.map(|root| cwd.join(root)),
        manifests: args.manifests.iter().map(|m| cwd.join(m)).collect(),
        resource_patterns: args.resources,
        source_patterns: args.sources,
        markup_patterns: args.markup,
    });
    if config.root.is_none() {
        config.root = Some(cwd.to_path_buf());
    }
    if config.manifests.is_empty() {
        return Err(CliError::user(
            "No manifest given; pass -m <FILE> or list manifests in a --config file",
        ));
    }

    tracing::debug!(?config, "Effective configuration");
    Ok(config.into_request()?)
}

/// Pretty JSON of the report, optionally restricted to one class.
pub fn render_json(report: &ScanReport, only: Option<Classification>) -> Result<String> {
    match only {
        None => Ok(serde_json::to_string_pretty(report)?),
        Some(class) => {
            let filtered = ScanReport {
                records: report.records_with(class).cloned().collect(),
                ..report.clone()
            };
            Ok(serde_json::to_string_pretty(&filtered)?)
        }
    }
}

/// Human-readable table: records, then diagnostics, then a summary line.
pub fn render_table(report: &ScanReport, only: Option<Classification>) -> String {
    ReportTable { report, only }.to_string()
}

struct ReportTable<'a> {
    report: &'a ScanReport,
    only: Option<Classification>,
}

impl fmt::Display for ReportTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let records: Vec<&ResourceRecord> = match self.only {
            Some(class) => report.records_with(class).collect(),
            None => report.records.iter().collect(),
        };

        writeln!(f, "{}", "Resource Check".bold())?;
        writeln!(f, "{}:   {}", "Root".dimmed(), report.root)?;
        for manifest in &report.manifests {
            writeln!(
                f,
                "{}:   {}",
                "Manifest".dimmed(),
                display_path(manifest, &report.root)
            )?;
        }
        writeln!(f)?;

        if records.is_empty() {
            writeln!(f, "  {}", "No resources".dimmed())?;
        }
        for record in records {
            let manifest_path = record.manifest_path.as_deref().unwrap_or("-");
            let disk_path = record
                .disk_path
                .as_ref()
                .map(|p| display_path(p, &report.root))
                .unwrap_or("-");
            let reference = record
                .first_reference
                .as_ref()
                .map(|r| format!("{}:{}", display_path(&r.file, &report.root), r.line))
                .unwrap_or_else(|| "-".to_string());

            writeln!(
                f,
                "  {} {}  {}  {}",
                class_tag(record.classification()),
                manifest_path.cyan(),
                disk_path,
                reference.dimmed()
            )?;
        }

        if !report.diagnostics.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}:", "Diagnostics".bold())?;
            for diagnostic in &report.diagnostics {
                writeln!(f, "  {} {}", severity_tag(diagnostic), diagnostic)?;
            }
        }

        let summary = report.summary();
        writeln!(f)?;
        writeln!(
            f,
            "{} resources: {} used, {} unused, {} missing ({} dangling), {} orphan",
            summary.total,
            summary.used.to_string().green(),
            summary.unused.to_string().yellow(),
            summary.missing.to_string().red(),
            summary.dangling,
            summary.orphan.to_string().magenta()
        )
    }
}

fn class_tag(class: Classification) -> ColoredString {
    let tag = format!("{:<9}", format!("[{class}]"));
    match class {
        Classification::Missing => tag.red().bold(),
        Classification::Unused => tag.yellow(),
        Classification::Orphan => tag.magenta(),
        Classification::Used => tag.green(),
    }
}

fn severity_tag(diagnostic: &Diagnostic) -> ColoredString {
    match diagnostic.severity() {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow(),
    }
}

/// `path` relative to `root` when it lies below it.
fn display_path<'a>(path: &'a NormalizedPath, root: &NormalizedPath) -> &'a str {
    path.relative_to(root).unwrap_or(path.as_str())
}
