//! The validation pass
//!
//! Every page on disk is requested from the page server. Pages that answer
//! successfully are downloaded and scanned, and each local reference is
//! checked in turn. Failures are recorded in the report, never raised.

use std::collections::HashMap;

use mirror_fs::SitePath;
use mirror_fs::walk::index_pages;
use mirror_net::Fetcher;
use tracing::{debug, info, warn};
use url::Url;

use super::model::{PageRecord, Report, ResourceIssue};
use crate::check::{Availability, check_url};
use crate::scan::{Locality, ResourceKind, classify, extract_references};
use crate::{MirrorConfig, Result};

/// Builds a [`Report`] for the mirror described by a [`MirrorConfig`].
///
/// Availability results are memoized per absolute URL, so a stylesheet shared
/// by every page is requested once per run. Each reference still counts
/// toward its page's `checked_resources`.
pub struct ReportBuilder<'a> {
    config: &'a MirrorConfig,
    fetcher: &'a dyn Fetcher,
    checked: HashMap<String, Availability>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a MirrorConfig, fetcher: &'a dyn Fetcher) -> Self {
        Self {
            config,
            fetcher,
            checked: HashMap::new(),
        }
    }

    /// Validate every page in the mirror.
    ///
    /// # Errors
    ///
    /// Only fails if a page path cannot be joined onto `base_url`.
    pub fn build(mut self) -> Result<Report> {
        let mut report = Report::new(&self.config.site_root, self.config.base_url.as_str());
        let pages = index_pages(&self.config.site_root);
        info!(
            "Validating {} pages from {} against {}",
            pages.len(),
            self.config.site_root.display(),
            self.config.base_url
        );

        for path in &pages {
            let record = self.check_page(path)?;
            if !record.ok {
                warn!("Page {} is not ok (status {:?})", record.path, record.status);
            }
            report.pages.push(record);
        }

        info!(
            "Validation finished: {} pages, {} missing resources",
            report.pages.len(),
            report.total_missing()
        );
        Ok(report)
    }

    fn check_page(&mut self, path: &SitePath) -> Result<PageRecord> {
        let page_url = self.config.page_url(path)?;
        let mut record = PageRecord::new(path.as_str(), page_url.as_str());

        let availability = self.check(&page_url);
        record.status = availability.status;
        record.ok = availability.is_ok();
        if !record.ok {
            return Ok(record);
        }

        let html = match self
            .fetcher
            .get(&page_url)
            .and_then(|response| response.into_body(&page_url))
        {
            Ok(body) => String::from_utf8_lossy(&body).into_owned(),
            Err(e) => {
                record.ok = false;
                record.status = None;
                record.missing_resources.push(ResourceIssue {
                    kind: ResourceKind::Page,
                    url: page_url.to_string(),
                    status: None,
                    error: Some(e.detail()),
                });
                return Ok(record);
            }
        };

        let refs = extract_references(&html);
        debug!("{}: {} references", path, refs.len());

        for (kind, raw) in refs.iter() {
            match classify(raw, &self.config.ignored_hosts) {
                Locality::ExternalIgnored => {
                    record.external_ignored += 1;
                    continue;
                }
                Locality::External => continue,
                Locality::Local => {}
            }

            record.checked_resources += 1;
            let url = match page_url.join(raw) {
                Ok(url) => url,
                Err(e) => {
                    record.missing_resources.push(ResourceIssue {
                        kind,
                        url: raw.to_string(),
                        status: None,
                        error: Some(e.to_string()),
                    });
                    continue;
                }
            };

            let availability = self.check(&url);
            if !availability.is_ok() {
                debug!("{}: missing {} {}", path, kind, url);
                record.missing_resources.push(ResourceIssue {
                    kind,
                    url: url.to_string(),
                    status: availability.status,
                    error: availability.error,
                });
            }
        }

        Ok(record)
    }

    fn check(&mut self, url: &Url) -> Availability {
        if let Some(known) = self.checked.get(url.as_str()) {
            return known.clone();
        }
        let availability = check_url(self.fetcher, url);
        self.checked.insert(url.to_string(), availability.clone());
        availability
    }
}
