//! [`TestMirror`] builder for mirror-tree test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a `public/` mirror root and a `reports/`
/// directory, with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::TestMirror;
///
/// let mirror = TestMirror::new()
///     .page("/", "<html></html>")
///     .page("/about/", "<img src=\"/img/a.png\">");
/// mirror.assert_file_exists("about/index.html");
/// ```
pub struct TestMirror {
    temp_dir: TempDir,
}

impl Default for TestMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMirror {
    /// Create an empty mirror root.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("public")).unwrap();
        Self { temp_dir }
    }

    /// Directory that holds `public/` and `reports/`.
    pub fn workspace(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The mirror root.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("public")
    }

    /// The report directory (not created until something writes to it).
    pub fn reports(&self) -> PathBuf {
        self.temp_dir.path().join("reports")
    }

    /// Write a page at the mirror file its site path maps to.
    pub fn page(self, site_path: &str, html: &str) -> Self {
        let path = mirror_fs::SitePath::parse(site_path)
            .unwrap_or_else(|e| panic!("TestMirror::page: bad site path {site_path}: {e}"));
        self.file(&path.relative_file(), html.as_bytes())
    }

    /// Write a file at a mirror-relative path.
    pub fn file(self, rel: &str, content: &[u8]) -> Self {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestMirror::file: failed to write {rel}: {e}"));
        self
    }

    /// Read a mirror file as text.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel))
            .unwrap_or_else(|e| panic!("TestMirror::read: failed to read {rel}: {e}"))
    }

    /// Assert a mirror-relative file exists.
    pub fn assert_file_exists(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(path.is_file(), "expected mirror file {} to exist", path.display());
    }

    /// Assert a mirror-relative file does not exist.
    pub fn assert_file_absent(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(!path.exists(), "expected mirror file {} to be absent", path.display());
    }
}
