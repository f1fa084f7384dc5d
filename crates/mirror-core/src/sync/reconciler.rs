//! Fetches absent mirror files from the origin

use std::collections::BTreeSet;
use std::path::Path;

use mirror_fs::SitePath;
use mirror_fs::checksum::compute_checksum;
use mirror_fs::io::write_atomic;
use mirror_net::Fetcher;
use tracing::{debug, info, warn};
use url::Url;

use super::outcome::{SyncItem, SyncOutcome, SyncStatus};
use super::targets::SyncRequest;
use crate::MirrorConfig;

/// Brings the mirror in line with a set of sync requests.
///
/// Targets are processed in sorted order, one at a time. Every target ends in
/// exactly one of downloaded, exists or failed; a failure never stops the
/// batch.
pub struct Reconciler<'a> {
    config: &'a MirrorConfig,
    fetcher: &'a dyn Fetcher,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a MirrorConfig, fetcher: &'a dyn Fetcher) -> Self {
        Self { config, fetcher }
    }

    /// Sync every distinct request.
    pub fn sync(&self, requests: impl IntoIterator<Item = SyncRequest>) -> SyncOutcome {
        let requests: BTreeSet<SyncRequest> = requests.into_iter().collect();
        info!(
            "Syncing {} targets into {}",
            requests.len(),
            self.config.site_root.display()
        );

        let mut outcome = SyncOutcome::new();
        for request in &requests {
            let item = self.sync_one(request);
            match item.status {
                SyncStatus::Failed => warn!("{}", item),
                _ => debug!("{}", item),
            }
            outcome.record(item);
        }

        info!("Sync finished: {}", outcome.summary());
        outcome
    }

    fn sync_one(&self, request: &SyncRequest) -> SyncItem {
        if !request.path.starts_with('/') {
            return SyncItem::failed(&request.path, "not an absolute path");
        }
        let path = match SitePath::parse(&request.path) {
            Ok(path) => path,
            Err(e) => return SyncItem::failed(&request.path, e.to_string()),
        };

        let local = path.local_path(&self.config.site_root);
        if local.exists() {
            return SyncItem::exists(path.as_str(), display(&local));
        }

        let remote = match &request.remote {
            Some(url) => url.clone(),
            None => match self.config.remote_url(&path) {
                Ok(url) => url,
                Err(e) => return SyncItem::failed(&request.path, e.to_string()),
            },
        };

        self.download(&remote, &local)
    }

    fn download(&self, remote: &Url, local: &Path) -> SyncItem {
        let body = match self.fetcher.download(remote) {
            Ok(body) => body,
            Err(e) => return SyncItem::failed(remote.as_str(), e.detail()),
        };
        if let Err(e) = write_atomic(local, &body) {
            return SyncItem::failed(remote.as_str(), e.to_string());
        }
        SyncItem::downloaded(remote.as_str(), display(local), compute_checksum(&body))
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
