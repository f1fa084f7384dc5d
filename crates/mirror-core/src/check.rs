//! URL availability checks
//!
//! A HEAD probe is tried first. Origins that answer probes with 403 or 405
//! but serve the full request get one GET retry, so misconfigured servers do
//! not produce false negatives.

use mirror_net::Fetcher;
use mirror_net::fetcher::ERROR_STATUS_THRESHOLD;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Probe statuses that trigger the GET fallback.
const RETRY_WITH_GET: &[u16] = &[403, 405];

/// Result of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// A response was received at all
    pub reachable: bool,
    /// Status of the last response, absent on transport failure
    pub status: Option<u16>,
    /// Transport error text, verbatim
    pub error: Option<String>,
}

impl Availability {
    /// Reachable with a status below 400.
    ///
    /// A 404 is reachable but not ok.
    pub fn is_ok(&self) -> bool {
        self.reachable && self.status.is_some_and(|s| s < ERROR_STATUS_THRESHOLD)
    }

    fn responded(status: u16) -> Self {
        Self {
            reachable: true,
            status: Some(status),
            error: None,
        }
    }

    fn unreachable(error: &mirror_net::Error) -> Self {
        Self {
            reachable: false,
            status: None,
            error: Some(error.detail()),
        }
    }
}

/// Check whether `url` answers with a successful status.
pub fn check_url(fetcher: &dyn Fetcher, url: &Url) -> Availability {
    let status = match fetcher.head(url) {
        Ok(status) => status,
        Err(e) => return Availability::unreachable(&e),
    };

    if !RETRY_WITH_GET.contains(&status) {
        return Availability::responded(status);
    }

    debug!(url = %url, status, "Probe rejected, retrying with GET");
    match fetcher.get(url) {
        Ok(response) => Availability::responded(response.status),
        Err(e) => Availability::unreachable(&e),
    }
}
