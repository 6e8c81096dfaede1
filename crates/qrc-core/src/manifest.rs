//! `.qrc` manifest parsing
//!
//! A manifest is an XML document of the form:
//!
//! ```xml
//! <RCC>
//!     <qresource prefix="/icons">
//!         <file>images/logo.png</file>
//!     </qresource>
//! </RCC>
//! ```
//!
//! Every `<file>` yields one [`ManifestEntry`] whose resource path is
//! `:` + prefix (normalized to end in `/`) + the file text. Parsing stops at
//! the first structural error; entries read before it are still returned.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use qrc_fs::{NormalizedPath, io};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::ManifestError;
use crate::record::{Declaration, RecordSet};

const ROOT_ELEMENT: &str = "RCC";
const RESOURCE_ELEMENT: &str = "qresource";
const FILE_ELEMENT: &str = "file";
const PREFIX_ATTRIBUTE: &str = "prefix";

/// One `<file>` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Namespace prefix, always ending in `/`
    pub prefix: String,
    /// Path relative to the manifest's directory, as written
    pub file: String,
    /// 1-based line of the `<file>` element
    pub line: usize,
}

impl ManifestEntry {
    /// The canonical resource path, e.g. `:/icons/images/logo.png`.
    pub fn resource_path(&self) -> String {
        format!(":{}{}", self.prefix, self.file)
    }
}

/// Entries read from one manifest, plus the error that stopped parsing
#[derive(Debug, Default)]
pub struct ParsedManifest {
    pub entries: Vec<ManifestEntry>,
    pub error: Option<ManifestError>,
}

/// Append `/` unless the prefix already ends with one.
pub fn normalize_prefix(prefix: &str) -> String {
    let mut normalized = prefix.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

enum State {
    Document,
    Rcc,
    Resource { prefix: String },
    File { prefix: String, text: String, line: usize },
    Closed,
}

impl State {
    fn element(&self) -> &'static str {
        match self {
            Self::Document | Self::Closed => "document",
            Self::Rcc => ROOT_ELEMENT,
            Self::Resource { .. } => RESOURCE_ELEMENT,
            Self::File { .. } => FILE_ELEMENT,
        }
    }
}

/// Parse manifest XML text.
pub fn parse_manifest_str(content: &str) -> ParsedManifest {
    let mut parsed = ParsedManifest::default();
    if let Err(error) = parse_into(content, &mut parsed.entries) {
        parsed.error = Some(error);
    }
    parsed
}

fn parse_into(content: &str, entries: &mut Vec<ManifestEntry>) -> Result<(), ManifestError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut lines = LineTracker::new(content);
    let mut state = State::Document;

    loop {
        let event = reader.read_event();
        // Position just past the event, i.e. on the line its tag ends on.
        let line = lines.line_at(reader.buffer_position() as usize);
        let event = event.map_err(|e| ManifestError::Xml {
            line,
            message: e.to_string(),
        })?;

        state = match (state, event) {
            (State::Document, Event::Start(e)) if is(&e, ROOT_ELEMENT) => State::Rcc,
            (State::Document, Event::Empty(e)) if is(&e, ROOT_ELEMENT) => State::Closed,

            (State::Rcc, Event::Start(e)) if is(&e, RESOURCE_ELEMENT) => State::Resource {
                prefix: read_prefix(&e, line)?,
            },
            (State::Rcc, Event::Empty(e)) if is(&e, RESOURCE_ELEMENT) => {
                read_prefix(&e, line)?;
                State::Rcc
            }
            (State::Rcc, Event::End(_)) => State::Closed,

            (State::Resource { prefix }, Event::Start(e)) if is(&e, FILE_ELEMENT) => State::File {
                prefix,
                text: String::new(),
                line,
            },
            (State::Resource { .. }, Event::Empty(e)) if is(&e, FILE_ELEMENT) => {
                return Err(ManifestError::EmptyFile { line });
            }
            (State::Resource { .. }, Event::End(_)) => State::Rcc,

            (State::File { prefix, mut text, line }, Event::Text(t)) => {
                let unescaped = t.unescape().map_err(|e| ManifestError::Xml {
                    line,
                    message: e.to_string(),
                })?;
                text.push_str(&unescaped);
                State::File { prefix, text, line }
            }
            (State::File { prefix, mut text, line }, Event::CData(t)) => {
                text.push_str(&String::from_utf8_lossy(&t));
                State::File { prefix, text, line }
            }
            (State::File { prefix, text, line }, Event::End(_)) => {
                let file = text.trim();
                if file.is_empty() {
                    return Err(ManifestError::EmptyFile { line });
                }
                tracing::debug!(prefix = %prefix, file, line, "Manifest entry");
                entries.push(ManifestEntry {
                    file: file.to_string(),
                    line,
                    prefix: prefix.clone(),
                });
                State::Resource { prefix }
            }

            (current, Event::Start(e) | Event::Empty(e)) => {
                return Err(ManifestError::UnexpectedElement {
                    line,
                    element: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    parent: current.element().to_string(),
                });
            }

            (State::Document, Event::Eof) => return Err(ManifestError::MissingRoot),
            (State::Closed, Event::Eof) => return Ok(()),
            (current, Event::Eof) => {
                return Err(ManifestError::UnexpectedEof {
                    line,
                    element: current.element().to_string(),
                });
            }

            // Declarations, doctype, comments, processing instructions and
            // stray text between elements carry no entries.
            (current, _) => current,
        };
    }
}

fn is(element: &BytesStart<'_>, name: &str) -> bool {
    element.name().as_ref() == name.as_bytes()
}

fn read_prefix(element: &BytesStart<'_>, line: usize) -> Result<String, ManifestError> {
    let attribute = element
        .try_get_attribute(PREFIX_ATTRIBUTE)
        .map_err(|e| ManifestError::Xml {
            line,
            message: e.to_string(),
        })?
        .ok_or(ManifestError::MissingPrefix { line })?;
    let value = attribute.unescape_value().map_err(|e| ManifestError::Xml {
        line,
        message: e.to_string(),
    })?;
    Ok(normalize_prefix(&value))
}

/// Incremental byte-offset to line-number mapping for forward-only reads.
struct LineTracker<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineTracker<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            bytes: content.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    /// 1-based line containing byte `offset`. Offsets must not decrease.
    fn line_at(&mut self, offset: usize) -> usize {
        let end = offset.min(self.bytes.len());
        if end > self.offset {
            self.line += self.bytes[self.offset..end]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.offset = end;
        }
        self.line
    }
}

/// Parses manifests into a [`RecordSet`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestParser;

impl ManifestParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the manifest at `path` and add its entries to `records`.
    ///
    /// `index` is the manifest's position in the caller's manifest list.
    /// Unreadable or malformed manifests produce a diagnostic; entries read
    /// before a structural error are still added. Returns the number of
    /// entries read.
    pub fn parse(
        &self,
        path: &NormalizedPath,
        index: usize,
        records: &mut RecordSet,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> usize {
        let content = match io::read_text(path) {
            Ok(content) => content,
            Err(e) => {
                Diagnostic::new(
                    DiagnosticKind::ManifestUnreadable,
                    path.clone(),
                    format!("Cannot open manifest: {e}"),
                )
                .emit(diagnostics);
                return 0;
            }
        };

        let base = manifest_dir(path);
        let parsed = parse_manifest_str(&content);

        for entry in &parsed.entries {
            let resource_path = entry.resource_path();
            let disk_path = NormalizedPath::new(&entry.file).absolute(&base);
            let exists = disk_path.exists();

            match records.declare(resource_path.clone(), disk_path.clone(), exists, index) {
                Declaration::Created(_) | Declaration::Merged(_) => {}
                Declaration::Duplicate(_) => Diagnostic::new(
                    DiagnosticKind::DuplicateDeclaration,
                    path.clone(),
                    format!(
                        "line {}: {} is declared more than once",
                        entry.line, resource_path
                    ),
                )
                .emit(diagnostics),
                Declaration::Aliased { existing, .. } => Diagnostic::new(
                    DiagnosticKind::DuplicateDeclaration,
                    path.clone(),
                    format!(
                        "line {}: {} is already declared as {}",
                        entry.line, disk_path, existing
                    ),
                )
                .emit(diagnostics),
                Declaration::Conflict { other, .. } => Diagnostic::new(
                    DiagnosticKind::ManifestPathConflict,
                    path.clone(),
                    format!(
                        "line {}: {} also names {}",
                        entry.line,
                        resource_path,
                        other.as_ref().map(NormalizedPath::as_str).unwrap_or("<no file>")
                    ),
                )
                .emit(diagnostics),
            }
        }

        if let Some(error) = parsed.error {
            Diagnostic::new(
                DiagnosticKind::ManifestMalformed,
                path.clone(),
                format!("Malformed manifest: {error}"),
            )
            .emit(diagnostics);
        }

        tracing::debug!(manifest = %path, entries = parsed.entries.len(), "Parsed manifest");
        parsed.entries.len()
    }
}

/// Directory that manifest entries are relative to.
///
/// Canonicalized so entries compare equal to paths found by the walker,
/// which starts from the canonical project root.
fn manifest_dir(path: &NormalizedPath) -> NormalizedPath {
    let parent = path.parent().unwrap_or_else(|| NormalizedPath::new("."));
    NormalizedPath::canonical(&parent).unwrap_or_else(|_| parent.clean())
}

/// Parse every manifest in order into `records`.
pub fn parse_manifests(
    manifests: &[NormalizedPath],
    records: &mut RecordSet,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let parser = ManifestParser::new();
    let total: usize = manifests
        .iter()
        .enumerate()
        .map(|(index, path)| parser.parse(path, index, records, diagnostics))
        .sum();
    tracing::info!(manifests = manifests.len(), entries = total, "Manifest phase complete");
}
