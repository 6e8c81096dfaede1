//! Resource-path reference extraction from source and markup text
//!
//! Two token schemes are recognised:
//!
//! ```text
//! Source:  setIcon(QIcon(":/icons/open.png"));     "  :  ...  "
//! Markup:  <normaloff>:/icons/open.png</normaloff> >  :  ...  <
//! ```
//!
//! A reference starts right after the opening delimiter pair and ends at the
//! closing delimiter on the same line. The leading `:` belongs to the
//! extracted path, so it compares directly against manifest resource paths.

use qrc_fs::{NormalizedPath, io};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::record::{Attribution, RecordSet, ReferenceLocation};
use crate::walker::{FileRole, WalkedFiles};

/// How resource references are delimited in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenScheme {
    /// C++ string literal: `":` ... unescaped `"`
    Source,
    /// XML element text: `>:` ... `<`
    Markup,
}

impl TokenScheme {
    /// The scheme used for files of `role`, if they are scanned at all.
    pub fn for_role(role: FileRole) -> Option<Self> {
        match role {
            FileRole::Source => Some(Self::Source),
            FileRole::Markup => Some(Self::Markup),
            FileRole::Resource => None,
        }
    }

    fn opening(self) -> &'static str {
        match self {
            Self::Source => "\":",
            Self::Markup => ">:",
        }
    }

    /// Byte offset of the closing delimiter in `rest`.
    fn closing(self, rest: &str) -> Option<usize> {
        match self {
            Self::Markup => rest.find('<'),
            Self::Source => {
                let mut escaped = false;
                for (i, b) in rest.bytes().enumerate() {
                    match b {
                        _ if escaped => escaped = false,
                        b'\\' => escaped = true,
                        b'"' => return Some(i),
                        _ => {}
                    }
                }
                None
            }
        }
    }
}

/// One extracted resource path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The resource path including its leading `:`
    pub path: String,
    /// 1-based line number
    pub line: usize,
}

/// Extract every reference on a single line, in order.
pub fn extract_from_line(line: &str, scheme: TokenScheme) -> Vec<String> {
    let opening = scheme.opening();
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find(opening) {
        let start = cursor + offset + opening.len();
        let Some(length) = scheme.closing(&line[start..]) else {
            break;
        };
        // `":"` alone is not a resource path.
        if length > 0 {
            found.push(format!(":{}", &line[start..start + length]));
        }
        // Resume just after the closing delimiter.
        cursor = start + length + 1;
    }

    found
}

/// Extract every reference in `content` with its line number.
pub fn extract_references(content: &str, scheme: TokenScheme) -> Vec<Reference> {
    content
        .lines()
        .enumerate()
        .flat_map(|(index, line)| {
            extract_from_line(line, scheme)
                .into_iter()
                .map(move |path| Reference {
                    path,
                    line: index + 1,
                })
        })
        .collect()
}

/// Per-file scanning counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounts {
    pub references: usize,
    pub dangling: usize,
}

impl std::ops::AddAssign for ScanCounts {
    fn add_assign(&mut self, other: Self) {
        self.references += other.references;
        self.dangling += other.dangling;
    }
}

/// Scan one text file and attribute its references in `records`.
///
/// An unreadable file contributes nothing and is reported as a warning.
pub fn scan_file(
    path: &NormalizedPath,
    scheme: TokenScheme,
    records: &mut RecordSet,
    diagnostics: &mut Vec<Diagnostic>,
) -> ScanCounts {
    let content = match io::read_text_lossy(path) {
        Ok(content) => content,
        Err(e) => {
            Diagnostic::new(
                DiagnosticKind::TextFileUnreadable,
                path.clone(),
                format!("Cannot read file: {e}"),
            )
            .emit(diagnostics);
            return ScanCounts::default();
        }
    };

    let mut counts = ScanCounts::default();
    for reference in extract_references(&content, scheme) {
        counts.references += 1;
        let location = ReferenceLocation::new(path.clone(), reference.line);
        if let Attribution::Dangling(_) = records.reference(&reference.path, location) {
            tracing::debug!(file = %path, line = reference.line, path = %reference.path, "Dangling reference");
            counts.dangling += 1;
        }
    }
    counts
}

/// Scan all walked source files, then all markup files.
pub fn scan_references(
    files: &WalkedFiles,
    records: &mut RecordSet,
    diagnostics: &mut Vec<Diagnostic>,
) -> ScanCounts {
    let mut counts = ScanCounts::default();
    for path in &files.source_files {
        counts += scan_file(path, TokenScheme::Source, records, diagnostics);
    }
    for path in &files.markup_files {
        counts += scan_file(path, TokenScheme::Markup, records, diagnostics);
    }
    tracing::info!(
        files = files.source_files.len() + files.markup_files.len(),
        references = counts.references,
        dangling = counts.dangling,
        "Reference phase complete"
    );
    counts
}
