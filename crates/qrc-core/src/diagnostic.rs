//! Non-fatal conditions collected during a scan

use qrc_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

/// How serious a diagnostic is for the person reading the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// What kind of condition was recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A manifest file could not be opened; it contributed nothing
    ManifestUnreadable,
    /// A manifest was structurally invalid; parsing stopped at the error
    ManifestMalformed,
    /// A source or markup file could not be read; it contributed no references
    TextFileUnreadable,
    /// A directory below the root could not be listed
    WalkError,
    /// The same disk file was declared more than once
    DuplicateDeclaration,
    /// The same resource path was declared for different disk files
    ManifestPathConflict,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::ManifestUnreadable | Self::ManifestMalformed => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// A recovered condition, tied to the file it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: NormalizedPath,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: NormalizedPath, message: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Log the diagnostic and append it to `sink`.
    pub fn emit(self, sink: &mut Vec<Diagnostic>) {
        tracing::warn!(kind = ?self.kind, path = %self.path, "{}", self.message);
        sink.push(self);
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
