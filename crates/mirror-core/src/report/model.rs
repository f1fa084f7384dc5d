//! Report data model
//!
//! Field names and order match the JSON layout consumed by earlier tooling,
//! so reports written by either side load in the other.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scan::ResourceKind;

/// A resource (or page) that failed its availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIssue {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Absolute URL that was checked
    pub url: String,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Validation result for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Site path, e.g. `/about/`
    pub path: String,
    /// Page URL on the page server
    pub url: String,
    #[serde(default)]
    pub status: Option<u16>,
    pub ok: bool,
    #[serde(default)]
    pub missing_resources: Vec<ResourceIssue>,
    /// References skipped because they point at an ignored third-party host
    #[serde(default)]
    pub external_ignored: usize,
    /// Local references whose availability was checked
    #[serde(default)]
    pub checked_resources: usize,
}

impl PageRecord {
    /// A record for a page that has not been checked yet.
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            status: None,
            ok: false,
            missing_resources: Vec::new(),
            external_ignored: 0,
            checked_resources: 0,
        }
    }
}

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Mirror root that was validated
    pub base_dir: PathBuf,
    /// Page server the pages were requested from
    pub base_url: String,
    /// Unix timestamp, seconds
    pub generated_at: i64,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

impl Report {
    pub fn new(base_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            base_url: base_url.into(),
            generated_at: chrono::Utc::now().timestamp(),
            pages: Vec::new(),
        }
    }

    /// Distinct URLs of every missing resource, excluding page-level issues.
    pub fn missing_resources(&self) -> BTreeSet<String> {
        self.issues()
            .filter(|issue| issue.kind != ResourceKind::Page)
            .map(|issue| issue.url.clone())
            .collect()
    }

    /// Number of issues across all pages, page-level issues included.
    pub fn total_missing(&self) -> usize {
        self.pages.iter().map(|p| p.missing_resources.len()).sum()
    }

    /// Number of pages that failed their own check.
    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|p| !p.ok).count()
    }

    fn issues(&self) -> impl Iterator<Item = &ResourceIssue> {
        self.pages.iter().flat_map(|p| p.missing_resources.iter())
    }
}
