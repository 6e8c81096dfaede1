//! Resource records and the set they are reconciled into
//!
//! A [`RecordSet`] is the single accumulator every scan phase writes to. It
//! owns the merge rules: manifest declarations and walked files are matched
//! by absolute disk path, references are matched by manifest path.

use std::collections::HashMap;

use qrc_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

/// Where a resource was first referenced from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceLocation {
    pub file: NormalizedPath,
    /// 1-based line number
    pub line: usize,
}

impl ReferenceLocation {
    pub fn new(file: NormalizedPath, line: usize) -> Self {
        Self { file, line }
    }
}

impl std::fmt::Display for ReferenceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Everything known about one logical resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Canonical resource path as declared, e.g. `:/icons/logo.png`
    pub manifest_path: Option<String>,
    /// Absolute path of the backing file
    pub disk_path: Option<NormalizedPath>,
    /// Whether `disk_path` was confirmed to exist during the scan
    pub exists_on_disk: bool,
    /// Position of the declaring manifest in the request's manifest list
    pub manifest_index: Option<usize>,
    /// First text-file occurrence of `manifest_path`
    pub first_reference: Option<ReferenceLocation>,
}

/// Audit verdict for a reconciled record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Not present on disk; the most severe class
    Missing,
    /// On disk but neither declared nor referenced
    Orphan,
    /// Declared and on disk, but never referenced
    Unused,
    /// Referenced and on disk
    Used,
}

impl Classification {
    pub const ALL: [Classification; 4] = [Self::Missing, Self::Orphan, Self::Unused, Self::Used];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Orphan => "orphan",
            Self::Unused => "unused",
            Self::Used => "used",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown classification '{s}'"))
    }
}

impl ResourceRecord {
    pub fn classification(&self) -> Classification {
        if !self.exists_on_disk {
            Classification::Missing
        } else if self.first_reference.is_some() {
            Classification::Used
        } else if self.manifest_path.is_none() {
            Classification::Orphan
        } else {
            Classification::Unused
        }
    }

    /// A reference from code to a path no manifest declares.
    pub fn is_dangling(&self) -> bool {
        !self.exists_on_disk && self.manifest_index.is_none() && self.first_reference.is_some()
    }
}

/// Result of adding a manifest declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A new record was appended
    Created(usize),
    /// An undeclared on-disk record took over the declaration
    Merged(usize),
    /// The disk file was already declared under the same resource path
    Duplicate(usize),
    /// A new record was appended for a disk file already declared under
    /// another resource path
    Aliased { index: usize, existing: String },
    /// A new record was appended, but another record already uses this
    /// resource path for a different disk file
    Conflict { index: usize, other: Option<NormalizedPath> },
}

/// Result of observing a resource file during the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Matched(usize),
    Created(usize),
}

/// Result of attributing one extracted reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    /// At least one record received its first reference
    First,
    /// Every matching record was already referenced
    Repeated,
    /// No record carried the path; a dangling record was appended
    Dangling(usize),
}

/// Insertion-ordered records with lookups by both matching keys
#[derive(Debug, Default)]
pub struct RecordSet {
    records: Vec<ResourceRecord>,
    by_manifest_path: HashMap<String, Vec<usize>>,
    by_disk_path: HashMap<NormalizedPath, Vec<usize>>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResourceRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<ResourceRecord> {
        self.records
    }

    pub fn find_by_disk_path(&self, disk_path: &NormalizedPath) -> &[usize] {
        self.by_disk_path
            .get(disk_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find_by_manifest_path(&self, manifest_path: &str) -> &[usize] {
        self.by_manifest_path
            .get(manifest_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn push(&mut self, record: ResourceRecord) -> usize {
        let index = self.records.len();
        if let Some(path) = &record.manifest_path {
            self.by_manifest_path
                .entry(path.clone())
                .or_default()
                .push(index);
        }
        if let Some(path) = &record.disk_path {
            self.by_disk_path.entry(path.clone()).or_default().push(index);
        }
        self.records.push(record);
        index
    }

    /// Add a resource declared by manifest number `manifest_index`.
    ///
    /// Every declaration of a distinct resource path gets its own record.
    /// An undeclared on-disk record for the same file is taken over instead,
    /// and re-declaring an existing resource path for the same file is a
    /// no-op.
    pub fn declare(
        &mut self,
        manifest_path: String,
        disk_path: NormalizedPath,
        exists_on_disk: bool,
        manifest_index: usize,
    ) -> Declaration {
        let same_file = self.find_by_disk_path(&disk_path).to_vec();

        if let Some(&index) = same_file
            .iter()
            .find(|&&i| self.records[i].manifest_path.as_deref() == Some(manifest_path.as_str()))
        {
            self.records[index].exists_on_disk |= exists_on_disk;
            return Declaration::Duplicate(index);
        }

        if let Some(&index) = same_file
            .iter()
            .find(|&&i| self.records[i].manifest_path.is_none())
        {
            let record = &mut self.records[index];
            record.exists_on_disk |= exists_on_disk;
            record.manifest_path = Some(manifest_path.clone());
            record.manifest_index = Some(manifest_index);
            self.by_manifest_path
                .entry(manifest_path)
                .or_default()
                .push(index);
            return Declaration::Merged(index);
        }

        let existing = same_file
            .first()
            .and_then(|&i| self.records[i].manifest_path.clone());
        let other = self
            .find_by_manifest_path(&manifest_path)
            .first()
            .map(|&i| self.records[i].disk_path.clone());

        let index = self.push(ResourceRecord {
            manifest_path: Some(manifest_path),
            disk_path: Some(disk_path),
            exists_on_disk,
            manifest_index: Some(manifest_index),
            first_reference: None,
        });

        match (existing, other) {
            (Some(existing), _) => Declaration::Aliased { index, existing },
            (None, Some(other)) => Declaration::Conflict { index, other },
            (None, None) => Declaration::Created(index),
        }
    }

    /// Record that a resource-candidate file exists at `disk_path`.
    ///
    /// Every record backed by the file is marked present.
    pub fn observe_file(&mut self, disk_path: NormalizedPath) -> Observation {
        let indices = self.find_by_disk_path(&disk_path).to_vec();
        if let Some(&first) = indices.first() {
            for index in indices {
                self.records[index].exists_on_disk = true;
            }
            return Observation::Matched(first);
        }
        Observation::Created(self.push(ResourceRecord {
            manifest_path: None,
            disk_path: Some(disk_path),
            exists_on_disk: true,
            manifest_index: None,
            first_reference: None,
        }))
    }

    /// Attribute a reference to `manifest_path` found at `location`.
    ///
    /// Every record carrying the path keeps the first location it receives.
    pub fn reference(&mut self, manifest_path: &str, location: ReferenceLocation) -> Attribution {
        let indices = self.find_by_manifest_path(manifest_path).to_vec();
        if indices.is_empty() {
            let index = self.push(ResourceRecord {
                manifest_path: Some(manifest_path.to_string()),
                disk_path: None,
                exists_on_disk: false,
                manifest_index: None,
                first_reference: Some(location),
            });
            return Attribution::Dangling(index);
        }

        let mut attribution = Attribution::Repeated;
        for index in indices {
            let record = &mut self.records[index];
            if record.first_reference.is_none() {
                record.first_reference = Some(location.clone());
                attribution = Attribution::First;
            }
        }
        attribution
    }
}
