//! Error types for qrc-core
//!
//! [`Error`] covers precondition failures only: anything that goes wrong
//! once a scan is under way is recovered and reported as a
//! [`Diagnostic`](crate::Diagnostic) instead.

use std::path::PathBuf;

/// Result type for qrc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that prevent a scan from starting
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No project root was configured
    #[error("No project root directory given")]
    RootNotSet,

    /// The project root does not exist
    #[error("Project root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The project root exists but is not a directory
    #[error("Project root is not a directory: {path}")]
    RootNotADirectory { path: PathBuf },

    /// No manifest files were selected
    #[error("No resource manifests selected")]
    NoManifests,

    /// A file-type filter entry is not a valid glob
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from qrc-fs
    #[error(transparent)]
    Fs(#[from] qrc_fs::Error),
}

/// Structural problems found while reading a `.qrc` manifest.
///
/// Each one aborts the manifest it was found in; entries read before the
/// failure point are kept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestError {
    /// The XML itself is not well formed
    #[error("line {line}: XML error: {message}")]
    Xml { line: usize, message: String },

    /// The document has no `<RCC>` root element
    #[error("missing <RCC> root element")]
    MissingRoot,

    /// An element appeared where it is not allowed
    #[error("line {line}: unexpected element <{element}> inside <{parent}>")]
    UnexpectedElement {
        line: usize,
        element: String,
        parent: String,
    },

    /// A `<qresource>` element lacks its `prefix` attribute
    #[error("line {line}: <qresource> is missing the required 'prefix' attribute")]
    MissingPrefix { line: usize },

    /// A `<file>` element has no path text
    #[error("line {line}: <file> element is empty")]
    EmptyFile { line: usize },

    /// The document ended inside an open element
    #[error("line {line}: unexpected end of document inside <{element}>")]
    UnexpectedEof { line: usize, element: String },
}
