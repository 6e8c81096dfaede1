//! Resource reconciliation engine for the Qt resource checker
//!
//! Audits the consistency between three views of a project's resources:
//!
//! - **Manifests**: `.qrc` files declaring resources under namespace prefixes
//! - **Disk**: files under the project root matching the resource filter
//! - **Code**: `":/..."` literals in source files and `>:/...<` text in `.ui` files
//!
//! Each view is an observation producer that feeds one shared [`RecordSet`].
//! Observations about the same logical resource converge on one
//! [`ResourceRecord`] when they agree on its manifest path or its absolute
//! disk path; otherwise they stay separate, which exposes path-mapping
//! mistakes instead of hiding them.
//!
//! # Architecture
//!
//! ```text
//!                      qrc-cli
//!                         |
//!                    ScanEngine
//!                         |
//!       +-----------------+-----------------+
//!       |                 |                 |
//!  parse_manifests  walk_filesystem  scan_references
//!       |                 |                 |
//!       +------------ RecordSet ------------+
//! ```
//!
//! # Example
//!
//! ```no_run
//! use qrc_core::{ScanEngine, ScanRequest};
//!
//! let request = ScanRequest::new("/path/to/project", vec!["resources.qrc".into()], "*.png;*.svg");
//! let report = ScanEngine::new(request)?.run();
//! for record in &report.records {
//!     println!("{:?} {:?}", record.classification(), record.manifest_path);
//! }
//! # Ok::<(), qrc_core::Error>(())
//! ```

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod record;
pub mod scanner;
pub mod walker;

pub use config::CheckerConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use engine::{ScanEngine, ScanReport, ScanRequest, ScanSummary};
pub use error::{Error, ManifestError, Result};
pub use manifest::{ManifestEntry, ManifestParser, parse_manifests};
pub use record::{Classification, RecordSet, ReferenceLocation, ResourceRecord};
pub use scanner::{Reference, TokenScheme, extract_references, scan_references};
pub use walker::{FileClassifier, FileRole, PatternSet, WalkedFiles, walk_filesystem};
