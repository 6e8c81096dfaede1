//! Checker configuration
//!
//! A configuration file names the project root, the manifests to audit and
//! the file-type filters. Any of `.toml`, `.json` or `.yaml` is accepted:
//!
//! ```toml
//! root = "."
//! manifests = ["resources/app.qrc", "resources/icons.qrc"]
//! resource_patterns = "*.png;*.svg"
//! ```
//!
//! Relative paths inside the file are resolved against the file's own
//! directory. Command-line values are layered on top with [`merge`].
//!
//! [`merge`]: CheckerConfig::merge

use std::path::{Path, PathBuf};

use qrc_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::engine::ScanRequest;
use crate::error::{Error, Result};
use crate::walker::{DEFAULT_MARKUP_PATTERNS, DEFAULT_RESOURCE_PATTERNS, DEFAULT_SOURCE_PATTERNS};

/// Scan inputs as read from a file or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Project base directory
    pub root: Option<PathBuf>,
    /// Manifest files; relative entries are taken from `root`
    pub manifests: Vec<PathBuf>,
    /// Resource filter, e.g. `*.png;*.jpg`
    pub resource_patterns: Option<String>,
    /// Source-file filter
    pub source_patterns: Option<String>,
    /// Markup-file filter
    pub markup_patterns: Option<String>,
}

impl CheckerConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let normalized = NormalizedPath::new(path);
        let mut config: CheckerConfig = ConfigStore::new().load(&normalized)?;

        if let Some(base) = path.parent() {
            if let Some(root) = &config.root {
                if root.is_relative() {
                    config.root = Some(base.join(root));
                }
            }
        }
        tracing::debug!(path = %normalized, "Loaded checker configuration");
        Ok(config)
    }

    /// Overlay `other` onto this configuration.
    ///
    /// Set values in `other` win; a non-empty manifest list replaces this one.
    pub fn merge(&mut self, other: CheckerConfig) {
        if other.root.is_some() {
            self.root = other.root;
        }
        if !other.manifests.is_empty() {
            self.manifests = other.manifests;
        }
        if other.resource_patterns.is_some() {
            self.resource_patterns = other.resource_patterns;
        }
        if other.source_patterns.is_some() {
            self.source_patterns = other.source_patterns;
        }
        if other.markup_patterns.is_some() {
            self.markup_patterns = other.markup_patterns;
        }
    }

    /// Turn the configuration into a scan request, filling in defaults.
    pub fn into_request(self) -> Result<ScanRequest> {
        let root = self.root.ok_or(Error::RootNotSet)?;
        Ok(ScanRequest {
            root,
            manifests: self.manifests,
            resource_patterns: self
                .resource_patterns
                .unwrap_or_else(|| DEFAULT_RESOURCE_PATTERNS.to_string()),
            source_patterns: self
                .source_patterns
                .unwrap_or_else(|| DEFAULT_SOURCE_PATTERNS.to_string()),
            markup_patterns: self
                .markup_patterns
                .unwrap_or_else(|| DEFAULT_MARKUP_PATTERNS.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_load_resolves_root_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("checker.toml");
        std::fs::write(
            &path,
            "root = \"project\"\nmanifests = [\"app.qrc\"]\nresource_patterns = \"*.svg\"\n",
        )
        .unwrap();

        let config = CheckerConfig::load(&path).unwrap();
        assert_eq!(config.root, Some(temp.path().join("project")));
        assert_eq!(config.manifests, vec![PathBuf::from("app.qrc")]);
        assert_eq!(config.resource_patterns.as_deref(), Some("*.svg"));
        assert_eq!(config.source_patterns, None);
    }

    #[test]
    fn test_merge_prefers_set_values() {
        let mut base = CheckerConfig {
            root: Some("/a".into()),
            manifests: vec!["one.qrc".into()],
            resource_patterns: Some("*.png".into()),
            ..Default::default()
        };
        base.merge(CheckerConfig {
            resource_patterns: Some("*.svg".into()),
            ..Default::default()
        });

        assert_eq!(base.root, Some(PathBuf::from("/a")));
        assert_eq!(base.manifests, vec![PathBuf::from("one.qrc")]);
        assert_eq!(base.resource_patterns.as_deref(), Some("*.svg"));
    }

    #[test]
    fn test_into_request_applies_defaults() {
        let request = CheckerConfig {
            root: Some("/project".into()),
            manifests: vec!["app.qrc".into()],
            ..Default::default()
        }
        .into_request()
        .unwrap();

        assert_eq!(request.resource_patterns, DEFAULT_RESOURCE_PATTERNS);
        assert_eq!(request.source_patterns, DEFAULT_SOURCE_PATTERNS);
        assert_eq!(request.markup_patterns, DEFAULT_MARKUP_PATTERNS);
    }

    #[test]
    fn test_into_request_requires_root() {
        let result = CheckerConfig::default().into_request();
        assert!(matches!(result, Err(Error::RootNotSet)));
    }
}
