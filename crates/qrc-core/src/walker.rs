//! Project tree enumeration and file-role classification

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use qrc_fs::NormalizedPath;
use walkdir::WalkDir;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{Error, Result};
use crate::record::{Observation, RecordSet};

/// Default filter for files scanned with the quoted-literal scheme
pub const DEFAULT_SOURCE_PATTERNS: &str = "*.cpp;*.cxx;*.cc;*.c;*.h;*.hpp;*.hxx";
/// Default filter for Qt Designer forms
pub const DEFAULT_MARKUP_PATTERNS: &str = "*.ui";
/// Default resource filter
pub const DEFAULT_RESOURCE_PATTERNS: &str = "*.png;*.jpg";

/// What a walked file is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// Scanned for `":/..."` string literals
    Source,
    /// Scanned for `>:/...<` element text
    Markup,
    /// Checked against declared resources
    Resource,
}

/// A semicolon-separated list of case-insensitive globs, e.g. `*.jpg;*.png`
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PatternSet {
    /// Compile a filter string.
    ///
    /// Blank segments are ignored. Patterns without a `/` match at any depth.
    pub fn parse(filter: &str) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::new();

        for raw in filter.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let glob = GlobBuilder::new(&normalize_glob_pattern(raw))
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::InvalidPattern {
                    pattern: raw.to_string(),
                    message: e.kind().to_string(),
                })?;
            builder.add(glob);
            patterns.push(raw.to_string());
        }

        let set = builder.build().map_err(|e| Error::InvalidPattern {
            pattern: filter.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { patterns, set })
    }

    /// The patterns as given, without normalization
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Match a path relative to the project root.
    pub fn is_match(&self, relative: &str) -> bool {
        self.set.is_match(relative.trim_start_matches('/'))
    }
}

/// Rewrite a user glob for matching against root-relative paths.
///
/// - Leading slashes are stripped
/// - Patterns without a path separator get a `**/` prefix
fn normalize_glob_pattern(raw: &str) -> String {
    let pattern = raw.trim().trim_start_matches('/').replace('\\', "/");
    if !pattern.contains('/') {
        format!("**/{}", pattern)
    } else {
        pattern
    }
}

/// Assigns each walked file exactly one [`FileRole`]
#[derive(Debug, Clone)]
pub struct FileClassifier {
    source: PatternSet,
    markup: PatternSet,
    resource: PatternSet,
}

impl FileClassifier {
    pub fn new(source: PatternSet, markup: PatternSet, resource: PatternSet) -> Self {
        Self {
            source,
            markup,
            resource,
        }
    }

    /// Build a classifier from three filter strings.
    pub fn from_patterns(source: &str, markup: &str, resource: &str) -> Result<Self> {
        Ok(Self::new(
            PatternSet::parse(source)?,
            PatternSet::parse(markup)?,
            PatternSet::parse(resource)?,
        ))
    }

    pub fn resource_patterns(&self) -> &PatternSet {
        &self.resource
    }

    /// Source wins over markup, markup over resource.
    pub fn classify(&self, relative: &str) -> Option<FileRole> {
        if self.source.is_match(relative) {
            Some(FileRole::Source)
        } else if self.markup.is_match(relative) {
            Some(FileRole::Markup)
        } else if self.resource.is_match(relative) {
            Some(FileRole::Resource)
        } else {
            None
        }
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::from_patterns(
            DEFAULT_SOURCE_PATTERNS,
            DEFAULT_MARKUP_PATTERNS,
            DEFAULT_RESOURCE_PATTERNS,
        )
        .expect("default patterns are valid globs")
    }
}

/// Text files found by the walk, to be scanned for references
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkedFiles {
    pub source_files: Vec<NormalizedPath>,
    pub markup_files: Vec<NormalizedPath>,
    /// Number of resource candidates observed
    pub resource_files: usize,
}

/// Check that `root` is an existing directory and return its canonical form.
pub fn validate_root(root: &Path) -> Result<NormalizedPath> {
    if !root.exists() {
        return Err(Error::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(Error::RootNotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(NormalizedPath::canonical(root)?)
}

/// Enumerate files under `root`, recording resource candidates in `records`.
///
/// `root` must be canonical (see [`validate_root`]) so that paths compare
/// equal to manifest-derived ones. Symlinks are not followed. Unreadable
/// directories are reported and skipped.
pub fn walk_filesystem(
    root: &NormalizedPath,
    classifier: &FileClassifier,
    records: &mut RecordSet,
    diagnostics: &mut Vec<Diagnostic>,
) -> WalkedFiles {
    let mut walked = WalkedFiles::default();
    let mut created = 0usize;

    for entry in WalkDir::new(root.to_native())
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(NormalizedPath::new)
                    .unwrap_or_else(|| root.clone());
                Diagnostic::new(DiagnosticKind::WalkError, path, format!("Cannot read: {e}"))
                    .emit(diagnostics);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = NormalizedPath::new(entry.path()).clean();
        let Some(relative) = path.relative_to(root) else {
            continue;
        };

        match classifier.classify(relative) {
            Some(FileRole::Source) => walked.source_files.push(path),
            Some(FileRole::Markup) => walked.markup_files.push(path),
            Some(FileRole::Resource) => {
                walked.resource_files += 1;
                tracing::debug!(path = %path, "Resource candidate");
                if let Observation::Created(_) = records.observe_file(path) {
                    created += 1;
                }
            }
            None => {}
        }
    }

    tracing::info!(
        root = %root,
        sources = walked.source_files.len(),
        markup = walked.markup_files.len(),
        resources = walked.resource_files,
        undeclared = created,
        "Walk phase complete"
    );
    walked
}
