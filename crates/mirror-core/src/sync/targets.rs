//! Sync target collection
//!
//! Each function turns one source of gaps into [`SyncRequest`]s. Only the
//! origin-page harvest reads from the network, and it never writes into the
//! mirrored pages; downloading is left to the [`Reconciler`](super::Reconciler).

use std::collections::BTreeSet;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use mirror_fs::io::{read_text_lossy, write_atomic, write_text};
use mirror_fs::walk::{TEXT_ASSET_EXTENSIONS, text_assets};
use mirror_fs::{MirrorPath, SitePath};
use mirror_net::Fetcher;
use tracing::{debug, info, warn};
use url::Url;

use crate::report::Report;
use crate::scan::extract_chunk_paths;
use crate::{MirrorConfig, Result};

/// One path to bring into the mirror.
///
/// Without an explicit remote the file is fetched from the same path on the
/// origin.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyncRequest {
    /// Site path, expected to start with `/`
    pub path: String,
    pub remote: Option<Url>,
}

impl SyncRequest {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            remote: None,
        }
    }

    pub fn with_remote(path: impl Into<String>, remote: Url) -> Self {
        Self {
            path: path.into(),
            remote: Some(remote),
        }
    }
}

/// Requests for every missing resource in `report` that the page server
/// itself failed to deliver.
///
/// URLs on other origins cannot be mapped into the mirror and are dropped,
/// as are query strings.
pub fn requests_from_report(report: &Report, config: &MirrorConfig) -> BTreeSet<SyncRequest> {
    let server = config.base_url.origin();
    let mut requests = BTreeSet::new();

    for raw in report.missing_resources() {
        let url = match Url::parse(&raw) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping unparsable report URL {}: {}", raw, e);
                continue;
            }
        };
        if url.origin() != server {
            debug!("Skipping {}: not served by {}", url, config.base_url);
            continue;
        }
        requests.insert(SyncRequest::path(url.path()));
    }

    info!("Collected {} sync targets from report", requests.len());
    requests
}

/// Requests for every bundle path referenced by HTML, JS or CSS files in the
/// mirror.
///
/// Unreadable files are logged and skipped.
pub fn requests_from_chunk_scan(root: &Path) -> BTreeSet<SyncRequest> {
    let mut paths = BTreeSet::new();
    let files = text_assets(root, TEXT_ASSET_EXTENSIONS);

    for file in &files {
        match read_text_lossy(file) {
            Ok(text) => paths.extend(extract_chunk_paths(&text)),
            Err(e) => warn!("Skip {}: {}", file.display(), e),
        }
    }

    info!(
        "Found {} chunk references in {} files",
        paths.len(),
        files.len()
    );
    paths.into_iter().map(SyncRequest::path).collect()
}

/// Requests for every bundle path referenced by the live origin's copy of
/// `pages`.
///
/// Each fetched page is kept as `_download_reports/remote_<slug>.html` for
/// inspection; the mirrored pages themselves are never overwritten. Pages
/// that cannot be fetched are logged and skipped.
pub fn requests_from_origin_pages(
    fetcher: &dyn Fetcher,
    config: &MirrorConfig,
    pages: &[SitePath],
) -> BTreeSet<SyncRequest> {
    let copies = config.site_root.join(MirrorPath::DownloadReports);
    let mut paths = BTreeSet::new();

    for page in pages {
        let url = match config.remote_url(page) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skip origin page {}: {}", page, e);
                continue;
            }
        };
        let response = match fetcher.get(&url) {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                warn!("Fetch HTML failed for {}: HTTP {}", url, response.status);
                continue;
            }
            Err(e) => {
                warn!("Fetch HTML failed for {}: {}", url, e.detail());
                continue;
            }
        };

        let copy = copies.join(format!("remote_{}.html", page_slug(page)));
        if let Err(e) = write_atomic(&copy, &response.body) {
            warn!("Could not keep a copy of {}: {}", url, e);
        }
        let found = extract_chunk_paths(&response.text());
        debug!("{}: {} chunk references", url, found.len());
        paths.extend(found);
    }

    info!(
        "Found {} chunk references in {} origin pages",
        paths.len(),
        pages.len()
    );
    paths.into_iter().map(SyncRequest::path).collect()
}

/// File-name-safe label for a page, `home` for the root.
fn page_slug(page: &SitePath) -> String {
    let trimmed = page.decoded().trim_matches('/');
    if trimmed.is_empty() {
        "home".to_string()
    } else {
        trimmed.replace('/', "_")
    }
}

/// Requests for an explicit list of site paths.
pub fn requests_from_paths<S: AsRef<str>>(paths: &[S]) -> BTreeSet<SyncRequest> {
    paths
        .iter()
        .map(|p| SyncRequest::path(p.as_ref().trim()))
        .collect()
}

/// A sitemap page with no local copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPage {
    pub url: Url,
    pub local: PathBuf,
}

impl MissingPage {
    /// Request fetching the page URL itself, query included.
    pub fn request(&self) -> SyncRequest {
        SyncRequest::with_remote(self.url.path(), self.url.clone())
    }
}

/// Sitemap pages whose mapped file is absent under `config.site_root`.
pub fn missing_pages(urls: &[Url], config: &MirrorConfig) -> Vec<MissingPage> {
    let mut missing = Vec::new();
    for url in urls {
        let path = match SitePath::parse(url.path()) {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping sitemap page {}: {}", url, e);
                continue;
            }
        };
        let local = path.local_path(&config.site_root);
        if !local.exists() {
            missing.push(MissingPage {
                url: url.clone(),
                local,
            });
        }
    }
    info!("{} of {} sitemap pages missing locally", missing.len(), urls.len());
    missing
}

/// Write `<url> => <local path>` lines to the missing-pages listing inside
/// the mirror. Returns the listing's path.
pub fn write_missing_pages_list(root: &Path, pages: &[MissingPage]) -> Result<PathBuf> {
    let path = root
        .join(MirrorPath::DownloadReports)
        .join(MirrorPath::MissingPagesList);

    let mut content = String::new();
    for page in pages {
        let _ = writeln!(content, "{} => {}", page.url, page.local.display());
    }
    write_text(&path, &content)?;
    Ok(path)
}
