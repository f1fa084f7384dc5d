//! Mirror configuration
//!
//! A [`MirrorConfig`] is passed explicitly to every pipeline component. It is
//! loaded from `mirror.toml` (or `.json`); every field except `origin` has a
//! default:
//!
//! ```toml
//! origin = "https://example.com"
//! base_url = "http://localhost:5504/"
//! site_root = "public"
//! report_dir = "reports"
//! ignored_hosts = ["googletagmanager.com"]
//! origin_pages = ["/", "/about/"]
//!
//! [timeouts]
//! probe_secs = 10
//! ```

use std::path::{Path, PathBuf};

use mirror_fs::{ConfigStore, SitePath};
use mirror_net::Timeouts;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "mirror.toml";

/// Third-party hosts whose references are counted but never checked.
pub const DEFAULT_IGNORED_HOSTS: &[&str] = &[
    "googletagmanager.com",
    "google-analytics.com",
    "analytics.google.com",
    "google.com/ccm",
    "clarity.ms",
    "px.ads.linkedin.com",
    "licdn.com",
    "amplitude.com",
];

fn default_site_root() -> PathBuf {
    PathBuf::from("public")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:5504/").expect("static page server url")
}

fn default_sitemap_path() -> String {
    "/sitemap.xml".to_string()
}

fn default_ignored_hosts() -> Vec<String> {
    DEFAULT_IGNORED_HOSTS.iter().map(|h| h.to_string()).collect()
}

fn default_origin_pages() -> Vec<String> {
    vec!["/".to_string()]
}

fn default_max_sitemap_depth() -> usize {
    8
}

fn default_user_agent() -> String {
    format!("site-mirror/{}", env!("CARGO_PKG_VERSION"))
}

/// Configuration for one mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Live site the mirror is copied from
    pub origin: Url,

    /// Page server that serves the mirror for validation
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Mirror root directory
    #[serde(default = "default_site_root")]
    pub site_root: PathBuf,

    /// Directory for validation reports
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Path of the root sitemap on the origin
    #[serde(default = "default_sitemap_path")]
    pub sitemap_path: String,

    /// Substrings marking third-party references that are never checked
    #[serde(default = "default_ignored_hosts")]
    pub ignored_hosts: Vec<String>,

    /// Origin pages whose live HTML is harvested for bundle chunks
    #[serde(default = "default_origin_pages")]
    pub origin_pages: Vec<String>,

    #[serde(default)]
    pub timeouts: Timeouts,

    /// Maximum nesting of sitemap indexes below the root sitemap
    #[serde(default = "default_max_sitemap_depth")]
    pub max_sitemap_depth: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl MirrorConfig {
    /// Create a configuration with defaults for everything but the locations.
    pub fn new(site_root: impl Into<PathBuf>, base_url: Url, origin: Url) -> Self {
        let site_root = site_root.into();
        let report_dir = site_root
            .parent()
            .map(|p| p.join(default_report_dir()))
            .unwrap_or_else(default_report_dir);
        Self {
            origin: with_trailing_slash(origin),
            base_url: with_trailing_slash(base_url),
            site_root,
            report_dir,
            sitemap_path: default_sitemap_path(),
            ignored_hosts: default_ignored_hosts(),
            origin_pages: default_origin_pages(),
            timeouts: Timeouts::default(),
            max_sitemap_depth: default_max_sitemap_depth(),
            user_agent: default_user_agent(),
        }
    }

    /// Set the report directory.
    pub fn with_report_dir(mut self, report_dir: impl Into<PathBuf>) -> Self {
        self.report_dir = report_dir.into();
        self
    }

    /// Load configuration from a TOML or JSON file.
    ///
    /// Relative `site_root` and `report_dir` resolve against the directory
    /// containing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is absent, unparsable, or names a
    /// non-HTTP origin or page server.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = ConfigStore::new().load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        if config.site_root.is_relative() {
            config.site_root = base.join(&config.site_root);
        }
        if config.report_dir.is_relative() {
            config.report_dir = base.join(&config.report_dir);
        }
        config.origin = with_trailing_slash(config.origin);
        config.base_url = with_trailing_slash(config.base_url);
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("origin", &self.origin), ("base_url", &self.base_url)] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::Config {
                    message: format!("{name} must be an http(s) URL, got {url}"),
                });
            }
        }
        Ok(())
    }

    /// URL of the root sitemap on the origin.
    pub fn sitemap_url(&self) -> Result<Url> {
        self.origin
            .join(&self.sitemap_path)
            .map_err(|e| Error::invalid_url(&self.sitemap_path, e))
    }

    /// URL of a site path on the origin.
    pub fn remote_url(&self, path: &SitePath) -> Result<Url> {
        self.origin
            .join(path.as_str())
            .map_err(|e| Error::invalid_url(path.as_str(), e))
    }

    /// URL of a site path on the page server.
    ///
    /// Joined relative to `base_url`, so a page server mounted below its host
    /// root keeps its prefix.
    pub fn page_url(&self, path: &SitePath) -> Result<Url> {
        let relative = path.as_str().trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|e| Error::invalid_url(path.as_str(), e))
    }
}

/// Ensure a URL's path ends in `/` so joins append rather than replace.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
