//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
///
/// Per-page and per-resource failures never surface here; they are recorded
/// in reports and sync outcomes instead. These variants are the run-level
/// preconditions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A report required as input is absent
    #[error("Report not found at {path}")]
    ReportNotFound { path: PathBuf },

    /// A report exists but cannot be decoded
    #[error("Failed to read report at {path}: {message}")]
    ReportParse { path: PathBuf, message: String },

    /// The root sitemap could not be retrieved
    #[error("Failed to fetch sitemap {url}: {message}")]
    SitemapUnavailable { url: String, message: String },

    /// A URL could not be parsed or joined
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Configuration is present but unusable
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Network error from mirror-net
    #[error(transparent)]
    Net(#[from] mirror_net::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: source.to_string(),
        }
    }
}
