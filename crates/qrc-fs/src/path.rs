//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Record matching compares these by exact string equality, so every path
/// that takes part in a comparison should first go through [`clean`] or
/// [`absolute`] to remove `.`/`..` segments and duplicate separators.
///
/// [`clean`]: NormalizedPath::clean
/// [`absolute`]: NormalizedPath::absolute
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Resolve an existing directory to its canonical absolute form.
    ///
    /// Uses `dunce` so Windows results carry no `\\?\` verbatim prefix.
    pub fn canonical(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resolved = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::new(resolved).clean())
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the base, mirroring [`Path::join`].
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if !split_root(&segment_normalized).0.is_empty() {
            return Self {
                inner: segment_normalized,
            };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Whether the path starts at a filesystem root (`/`, `//`, or `C:/`).
    pub fn is_absolute(&self) -> bool {
        let (root, _) = split_root(&self.inner);
        root.ends_with('/')
    }

    /// Lexically normalize the path.
    ///
    /// Drops empty and `.` segments and folds `..` into its parent. A `..`
    /// directly under the root is discarded; leading `..` segments of a
    /// relative path are kept. No filesystem access takes place.
    pub fn clean(&self) -> Self {
        let (root, rest) = split_root(&self.inner);
        let mut parts: Vec<&str> = Vec::new();

        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(last) if *last != ".." => {
                        parts.pop();
                    }
                    _ if root.is_empty() => parts.push(".."),
                    _ => {}
                },
                other => parts.push(other),
            }
        }

        let body = parts.join("/");
        let inner = if root.is_empty() && body.is_empty() {
            ".".to_string()
        } else {
            format!("{root}{body}")
        };
        Self { inner }
    }

    /// Resolve against `base` when relative, then [`clean`](Self::clean).
    pub fn absolute(&self, base: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clean()
        } else {
            base.join(&self.inner).clean()
        }
    }

    /// The remainder of this path below `base`, if it lies inside it.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<&str> {
        let base = base.inner.trim_end_matches('/');
        let rest = self.inner.strip_prefix(base)?;
        if base.is_empty() {
            return Some(rest.trim_start_matches('/'));
        }
        rest.strip_prefix('/')
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => {
                let head = &trimmed[..idx];
                // Keep the separator of a drive root such as `C:/`.
                let inner = if head.len() == 2 && head.ends_with(':') {
                    format!("{head}/")
                } else {
                    head.to_string()
                };
                Some(Self { inner })
            }
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next()
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Split a normalized path into its root (`""`, `/`, `//`, `C:`, `C:/`) and
/// the remainder.
fn split_root(path: &str) -> (&str, &str) {
    if path.starts_with("//") {
        return path.split_at(2);
    }
    if path.starts_with('/') {
        return path.split_at(1);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.get(2) == Some(&b'/') {
            return path.split_at(3);
        }
        return path.split_at(2);
    }
    ("", path)
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<NormalizedPath> for String {
    fn from(p: NormalizedPath) -> Self {
        p.inner
    }
}
