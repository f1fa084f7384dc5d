//! Results of a sync run

use std::fmt;

/// What happened to one sync target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Fetched from the origin and written
    Downloaded,
    /// Already present locally, left untouched
    Exists,
    /// Could not be fetched or written
    Failed,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Downloaded => "downloaded",
            Self::Exists => "exists",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result for one sync target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncItem {
    pub status: SyncStatus,
    /// Remote URL, or the site path when nothing was fetched
    pub url: String,
    /// Local path for downloaded and existing files, error text for failures
    pub detail: String,
    /// `sha256:<hex>` of the bytes written, downloads only
    pub checksum: Option<String>,
}

impl SyncItem {
    pub fn downloaded(url: impl Into<String>, local: impl Into<String>, checksum: String) -> Self {
        Self {
            status: SyncStatus::Downloaded,
            url: url.into(),
            detail: local.into(),
            checksum: Some(checksum),
        }
    }

    pub fn exists(url: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            status: SyncStatus::Exists,
            url: url.into(),
            detail: local.into(),
            checksum: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: SyncStatus::Failed,
            url: url.into(),
            detail: error.into(),
            checksum: None,
        }
    }
}

impl fmt::Display for SyncItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            SyncStatus::Downloaded => write!(f, "downloaded: {} -> {}", self.url, self.detail),
            SyncStatus::Exists => write!(f, "exists: {}", self.detail),
            SyncStatus::Failed => write!(f, "failed: {} :: {}", self.url, self.detail),
        }
    }
}

/// Tally of a sync run. The three counts always sum to `items.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub downloaded: usize,
    pub exists: usize,
    pub failed: usize,
    pub items: Vec<SyncItem>,
}

impl SyncOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, item: SyncItem) {
        match item.status {
            SyncStatus::Downloaded => self.downloaded += 1,
            SyncStatus::Exists => self.exists += 1,
            SyncStatus::Failed => self.failed += 1,
        }
        self.items.push(item);
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Items with the given status, in processing order.
    pub fn with_status(&self, status: SyncStatus) -> impl Iterator<Item = &SyncItem> {
        self.items.iter().filter(move |item| item.status == status)
    }

    /// `downloaded=N, exists=N, failed=N`
    pub fn summary(&self) -> String {
        format!(
            "downloaded={}, exists={}, failed={}",
            self.downloaded, self.exists, self.failed
        )
    }
}
