//! Sitemap resolution
//!
//! Expands a root sitemap through any nesting of `<sitemapindex>` documents
//! into a flat, deduplicated list of page URLs on the site's own origin.
//!
//! Resolution degrades rather than fails:
//! - a sub-sitemap that cannot be fetched is logged and skipped
//! - a document with an unknown root element contributes every `<loc>`
//! - a document that is not well-formed XML is pattern-scanned for `<loc>`
//!
//! Only the root sitemap is required; without it there is nothing to resolve.

use std::collections::HashSet;
use std::sync::LazyLock;

use mirror_net::Fetcher;
use regex::Regex;
use tracing::{debug, info, warn};
use url::Url;

use crate::{Error, MirrorConfig, Result};

/// `<loc>` elements in documents that do not parse, namespace prefix allowed.
static LOC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:[A-Za-z0-9_.-]+:)?loc\b[^>]*>(.*?)</(?:[A-Za-z0-9_.-]+:)?loc\s*>")
        .expect("Invalid loc regex")
});

/// A parsed sitemap document, classified by its root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// `<sitemapindex>`: locations of further sitemaps
    Index(Vec<String>),
    /// `<urlset>`: page locations
    UrlSet(Vec<String>),
    /// Unknown schema or malformed XML: every `<loc>` found
    Unknown(Vec<String>),
}

impl SitemapDocument {
    /// Parse and classify a sitemap document.
    ///
    /// The root element is matched on its local name, case-insensitively,
    /// so `<sm:sitemapindex>` and `<URLSET>` are recognised.
    pub fn parse(xml: &str) -> Self {
        let xml = xml.trim_start_matches('\u{feff}');
        let doc = match roxmltree::Document::parse(xml) {
            Ok(doc) => doc,
            Err(e) => {
                debug!("Sitemap is not well-formed XML ({}), scanning for <loc>", e);
                return Self::Unknown(scan_locs(xml));
            }
        };

        let root = doc.root_element();
        let root_name = root.tag_name().name();

        if root_name.eq_ignore_ascii_case("sitemapindex") {
            Self::Index(child_locs(root, "sitemap"))
        } else if root_name.eq_ignore_ascii_case("urlset") {
            Self::UrlSet(child_locs(root, "url"))
        } else {
            let locs = root
                .descendants()
                .filter(|n| n.is_element() && is_named(*n, "loc"))
                .filter_map(loc_text)
                .collect();
            Self::Unknown(locs)
        }
    }
}

fn is_named(node: roxmltree::Node<'_, '_>, name: &str) -> bool {
    node.tag_name().name().eq_ignore_ascii_case(name)
}

fn loc_text(node: roxmltree::Node<'_, '_>) -> Option<String> {
    let text = node.text()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// `<entry><loc>` values for every direct `entry` child of the root.
fn child_locs(root: roxmltree::Node<'_, '_>, entry: &str) -> Vec<String> {
    root.children()
        .filter(|n| n.is_element() && is_named(*n, entry))
        .filter_map(|n| {
            n.children()
                .find(|c| c.is_element() && is_named(*c, "loc"))
                .and_then(loc_text)
        })
        .collect()
}

fn scan_locs(xml: &str) -> Vec<String> {
    LOC_REGEX
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape_xml(m.as_str().trim()))
        .filter(|s| !s.is_empty())
        .collect()
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Resolves a sitemap tree into page URLs.
pub struct SitemapResolver<'a> {
    fetcher: &'a dyn Fetcher,
    origin: &'a Url,
    max_depth: usize,
}

impl<'a> SitemapResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, config: &'a MirrorConfig) -> Self {
        Self {
            fetcher,
            origin: &config.origin,
            max_depth: config.max_sitemap_depth,
        }
    }

    /// Resolve the tree rooted at `root` into same-origin page URLs.
    ///
    /// URLs are returned in first-seen order without duplicates.
    ///
    /// # Errors
    ///
    /// Returns `Error::SitemapUnavailable` if the root sitemap cannot be
    /// downloaded. Failures below the root are logged and skipped.
    pub fn resolve(&self, root: &Url) -> Result<Vec<Url>> {
        let body = self
            .fetcher
            .download(root)
            .map_err(|e| Error::SitemapUnavailable {
                url: root.to_string(),
                message: e.detail(),
            })?;

        let mut visited = HashSet::from([root.to_string()]);
        let mut locs = Vec::new();
        self.expand(&String::from_utf8_lossy(&body), 0, &mut visited, &mut locs);

        let mut seen = HashSet::new();
        let mut urls = Vec::new();
        for loc in locs {
            let url = match Url::parse(&loc) {
                Ok(url) => url,
                Err(e) => {
                    debug!("Dropping unparsable sitemap location {}: {}", loc, e);
                    continue;
                }
            };
            if url.origin() != self.origin.origin() {
                debug!("Dropping cross-origin sitemap location {}", url);
                continue;
            }
            if seen.insert(url.to_string()) {
                urls.push(url);
            }
        }

        info!("Resolved {} page URLs from {}", urls.len(), root);
        Ok(urls)
    }

    fn expand(
        &self,
        xml: &str,
        depth: usize,
        visited: &mut HashSet<String>,
        out: &mut Vec<String>,
    ) {
        let children = match SitemapDocument::parse(xml) {
            SitemapDocument::UrlSet(locs) | SitemapDocument::Unknown(locs) => {
                out.extend(locs);
                return;
            }
            SitemapDocument::Index(children) => children,
        };

        if depth >= self.max_depth {
            warn!(
                "Sitemap nesting exceeds depth {}, skipping {} sub-sitemaps",
                self.max_depth,
                children.len()
            );
            return;
        }

        for child in children {
            let url = match Url::parse(&child) {
                Ok(url) => url,
                Err(e) => {
                    warn!("Skipping invalid sub-sitemap location {}: {}", child, e);
                    continue;
                }
            };
            if !visited.insert(url.to_string()) {
                debug!("Sub-sitemap {} already visited", url);
                continue;
            }
            match self.fetcher.download(&url) {
                Ok(body) => {
                    debug!("Expanding sub-sitemap {}", url);
                    self.expand(&String::from_utf8_lossy(&body), depth + 1, visited, out);
                }
                Err(e) => warn!("Failed to fetch sub-sitemap {}: {}", url, e.detail()),
            }
        }
    }
}
