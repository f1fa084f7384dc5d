//! Fetcher trait for HTTP access

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Status codes at or above this value are client or server errors.
pub const ERROR_STATUS_THRESHOLD: u16 = 400;

/// A complete HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is below the error threshold.
    pub fn is_success(&self) -> bool {
        self.status < ERROR_STATUS_THRESHOLD
    }

    /// Body decoded as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Consume the response, failing on error statuses.
    pub fn into_body(self, url: &Url) -> Result<Vec<u8>> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(Error::Status {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Request timeouts, in seconds.
///
/// Probes are cheap and get the shortest budget; downloads and sitemap
/// retrieval the longest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Existence probes (HEAD)
    pub probe_secs: u64,
    /// Full page fetches during validation (GET)
    pub fetch_secs: u64,
    /// Downloads from the origin, including sitemaps
    pub download_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            probe_secs: 10,
            fetch_secs: 15,
            download_secs: 20,
        }
    }
}

impl Timeouts {
    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_secs)
    }

    pub fn fetch(&self) -> Duration {
        Duration::from_secs(self.fetch_secs)
    }

    pub fn download(&self) -> Duration {
        Duration::from_secs(self.download_secs)
    }
}

/// Trait for blocking HTTP access.
///
/// Implementations return `Err` only when no response was obtained; any
/// status code, including 4xx/5xx, is a successful `head`/`get`.
pub trait Fetcher {
    /// Issue a lightweight existence probe and return its status.
    fn head(&self, url: &Url) -> Result<u16>;

    /// Fetch the full response regardless of status.
    fn get(&self, url: &Url) -> Result<Response>;

    /// Fetch a body that must come back with a success status.
    fn download(&self, url: &Url) -> Result<Vec<u8>> {
        self.get(url)?.into_body(url)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn head(&self, url: &Url) -> Result<u16> {
        (**self).head(url)
    }

    fn get(&self, url: &Url) -> Result<Response> {
        (**self).get(url)
    }

    fn download(&self, url: &Url) -> Result<Vec<u8>> {
        (**self).download(url)
    }
}
