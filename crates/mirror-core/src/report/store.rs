//! Report files inside the report directory

use std::path::{Path, PathBuf};

use mirror_fs::ReportFile;
use mirror_fs::io::{read_text, write_text};
use tracing::info;

use super::model::Report;
use super::render::render_markdown;
use crate::{Error, Result};

/// Reads and writes the report files of one mirror.
///
/// ```text
/// reports/
///   validation_report.json              latest report
///   validation_report.md                latest report, rendered
///   validation_report.before_sync.json  snapshot taken before a sync
///   validation_compare.md               before/after comparison
/// ```
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of one of the report files.
    pub fn path(&self, file: ReportFile) -> PathBuf {
        self.dir.join(file)
    }

    /// Write `report` as the latest JSON report and its Markdown rendering.
    ///
    /// Returns the paths written, JSON first.
    pub fn save(&self, report: &Report) -> Result<(PathBuf, PathBuf)> {
        let json_path = self.path(ReportFile::LatestJson);
        let md_path = self.path(ReportFile::LatestMarkdown);

        write_text(&json_path, &serde_json::to_string_pretty(report)?)?;
        write_text(&md_path, &render_markdown(report))?;

        info!("Wrote report {}", json_path.display());
        Ok((json_path, md_path))
    }

    /// Load the latest report.
    pub fn load_latest(&self) -> Result<Report> {
        self.load(ReportFile::LatestJson)
    }

    /// Load the snapshot taken before the last sync.
    pub fn load_before_sync(&self) -> Result<Report> {
        self.load(ReportFile::BeforeSyncJson)
    }

    /// Load a JSON report file.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReportNotFound` if the file is absent and
    /// `Error::ReportParse` if it is not a report.
    pub fn load(&self, file: ReportFile) -> Result<Report> {
        let path = self.path(file);
        if !path.is_file() {
            return Err(Error::ReportNotFound { path });
        }
        let content = read_text(&path)?;
        serde_json::from_str(&content).map_err(|e| Error::ReportParse {
            path,
            message: e.to_string(),
        })
    }

    /// Copy the latest report to the before-sync snapshot.
    ///
    /// The latest report must parse; a snapshot of a broken report would only
    /// fail later, at comparison time.
    pub fn snapshot_before_sync(&self) -> Result<PathBuf> {
        let report = self.load_latest()?;
        let path = self.path(ReportFile::BeforeSyncJson);
        write_text(&path, &serde_json::to_string_pretty(&report)?)?;
        info!("Snapshot saved to {}", path.display());
        Ok(path)
    }

    /// Write a rendered comparison summary.
    pub fn save_comparison(&self, markdown: &str) -> Result<PathBuf> {
        let path = self.path(ReportFile::CompareMarkdown);
        write_text(&path, markdown)?;
        info!("Wrote comparison {}", path.display());
        Ok(path)
    }
}
