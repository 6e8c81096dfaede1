//! ScanEngine for reconciling manifests, disk and code
//!
//! A scan runs three phases over one fresh [`RecordSet`]:
//!
//! 1. **manifests**: declare every `<file>` entry, in manifest order
//! 2. **walk**: observe resource candidates, collect text files
//! 3. **references**: scan source files, then markup files
//!
//! Preconditions are checked by [`ScanEngine::new`]; once [`ScanEngine::run`]
//! starts, every failure is recovered and reported as a [`Diagnostic`].

use std::path::PathBuf;

use qrc_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::{Error, Result};
use crate::manifest::parse_manifests;
use crate::record::{Classification, RecordSet, ResourceRecord};
use crate::scanner::scan_references;
use crate::walker::{
    DEFAULT_MARKUP_PATTERNS, DEFAULT_SOURCE_PATTERNS, FileClassifier, validate_root,
    walk_filesystem,
};

/// Inputs for one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Project base directory
    pub root: PathBuf,
    /// Manifest files in priority order; relative paths are taken from `root`
    pub manifests: Vec<PathBuf>,
    /// Semicolon-separated resource globs
    pub resource_patterns: String,
    /// Semicolon-separated source globs
    pub source_patterns: String,
    /// Semicolon-separated markup globs
    pub markup_patterns: String,
}

impl ScanRequest {
    /// Create a request with the default source and markup filters.
    pub fn new(
        root: impl Into<PathBuf>,
        manifests: Vec<PathBuf>,
        resource_patterns: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            manifests,
            resource_patterns: resource_patterns.into(),
            source_patterns: DEFAULT_SOURCE_PATTERNS.to_string(),
            markup_patterns: DEFAULT_MARKUP_PATTERNS.to_string(),
        }
    }

    pub fn with_source_patterns(mut self, patterns: impl Into<String>) -> Self {
        self.source_patterns = patterns.into();
        self
    }

    pub fn with_markup_patterns(mut self, patterns: impl Into<String>) -> Self {
        self.markup_patterns = patterns.into();
        self
    }
}

/// Counts per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total: usize,
    pub used: usize,
    pub unused: usize,
    pub missing: usize,
    pub orphan: usize,
    /// Missing records created only from a reference
    pub dangling: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// The reconciled result of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub root: NormalizedPath,
    pub manifests: Vec<NormalizedPath>,
    pub records: Vec<ResourceRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanReport {
    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.classification() {
                Classification::Used => summary.used += 1,
                Classification::Unused => summary.unused += 1,
                Classification::Missing => summary.missing += 1,
                Classification::Orphan => summary.orphan += 1,
            }
            if record.is_dangling() {
                summary.dangling += 1;
            }
        }
        for diagnostic in &self.diagnostics {
            match diagnostic.severity() {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
        }
        summary
    }

    /// Records of one classification, in report order.
    pub fn records_with(
        &self,
        classification: Classification,
    ) -> impl Iterator<Item = &ResourceRecord> {
        self.records
            .iter()
            .filter(move |r| r.classification() == classification)
    }

    /// Find the record declared or referenced as `manifest_path`.
    pub fn find(&self, manifest_path: &str) -> Option<&ResourceRecord> {
        self.records
            .iter()
            .find(|r| r.manifest_path.as_deref() == Some(manifest_path))
    }
}

/// A validated scan, ready to run
#[derive(Debug, Clone)]
pub struct ScanEngine {
    root: NormalizedPath,
    manifests: Vec<NormalizedPath>,
    classifier: FileClassifier,
}

impl ScanEngine {
    /// Validate `request`.
    ///
    /// Fails if the root is missing or not a directory, if no manifest is
    /// given, or if a filter contains an invalid glob. Missing manifest
    /// files are not an error here; they are reported by [`run`](Self::run).
    pub fn new(request: ScanRequest) -> Result<Self> {
        let root = validate_root(&request.root)?;
        if request.manifests.is_empty() {
            return Err(Error::NoManifests);
        }

        let classifier = FileClassifier::from_patterns(
            &request.source_patterns,
            &request.markup_patterns,
            &request.resource_patterns,
        )?;
        if classifier.resource_patterns().is_empty() {
            tracing::warn!("Resource filter is empty; no files on disk will be matched");
        }

        let manifests = request
            .manifests
            .iter()
            .map(|path| NormalizedPath::new(path).absolute(&root))
            .collect();

        Ok(Self {
            root,
            manifests,
            classifier,
        })
    }

    /// The canonical project root
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Absolute manifest paths in request order
    pub fn manifests(&self) -> &[NormalizedPath] {
        &self.manifests
    }

    /// Run all phases against a fresh record set.
    pub fn run(&self) -> ScanReport {
        tracing::info!(root = %self.root, manifests = self.manifests.len(), "Starting scan");

        let mut records = RecordSet::new();
        let mut diagnostics = Vec::new();

        parse_manifests(&self.manifests, &mut records, &mut diagnostics);
        let walked = walk_filesystem(&self.root, &self.classifier, &mut records, &mut diagnostics);
        scan_references(&walked, &mut records, &mut diagnostics);

        let report = ScanReport {
            root: self.root.clone(),
            manifests: self.manifests.clone(),
            records: records.into_records(),
            diagnostics,
        };
        let summary = report.summary();
        tracing::info!(
            total = summary.total,
            used = summary.used,
            unused = summary.unused,
            missing = summary.missing,
            orphan = summary.orphan,
            "Scan complete"
        );
        report
    }
}
