//! [`TestProject`] builder for checker test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with helpers for laying out manifests,
/// resource files, sources and forms.
///
/// # Example
///
/// ```rust,no_run
/// use qrc_test_utils::{TestProject, qrc};
///
/// let project = TestProject::new();
/// project.resource("icons/logo.png");
/// project.file("resources.qrc", &qrc(&[("/", &["icons/logo.png"])]));
/// project.file("src/main.cpp", r#"QIcon(":/icons/logo.png");"#);
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestProject::file: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestProject::file: failed to write {}: {e}", path.display()));
        path
    }

    /// Create a small binary placeholder, e.g. an image, at `relative`.
    pub fn resource(&self, relative: &str) -> PathBuf {
        self.file(relative, "\u{89}PNG")
    }

    /// Create several placeholder resources.
    pub fn resources(&self, relatives: &[&str]) {
        for relative in relatives {
            self.resource(relative);
        }
    }
}

/// Render a `.qrc` document with one `<qresource>` per `(prefix, files)` pair.
pub fn qrc(groups: &[(&str, &[&str])]) -> String {
    let mut xml = String::from("<!DOCTYPE RCC>\n<RCC version=\"1.0\">\n");
    for (prefix, files) in groups {
        xml.push_str(&format!("    <qresource prefix=\"{prefix}\">\n"));
        for file in *files {
            xml.push_str(&format!("        <file>{file}</file>\n"));
        }
        xml.push_str("    </qresource>\n");
    }
    xml.push_str("</RCC>\n");
    xml
}
