//! Well-known names inside the mirror and the report directory.

use std::path::Path;

/// Fixed file and directory names inside the mirror root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorPath {
    /// The directory index document every page resolves to
    IndexFile,
    /// Scratch directory for download listings
    DownloadReports,
    /// Listing of sitemap pages absent from the mirror
    MissingPagesList,
}

impl MirrorPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IndexFile => "index.html",
            Self::DownloadReports => "_download_reports",
            Self::MissingPagesList => "missing_pages.txt",
        }
    }
}

impl AsRef<Path> for MirrorPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for MirrorPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Artifacts written to the report directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFile {
    /// Structured report of the latest validation run
    LatestJson,
    /// Markdown rendering of the latest validation run
    LatestMarkdown,
    /// Snapshot of the latest report taken before a sync
    BeforeSyncJson,
    /// Before/after comparison summary
    CompareMarkdown,
}

impl ReportFile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LatestJson => "validation_report.json",
            Self::LatestMarkdown => "validation_report.md",
            Self::BeforeSyncJson => "validation_report.before_sync.json",
            Self::CompareMarkdown => "validation_compare.md",
        }
    }
}

impl AsRef<Path> for ReportFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for ReportFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
