//! reqwest-backed [`Fetcher`]

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::{Error, Fetcher, Response, Result, Timeouts};

/// Blocking HTTP fetcher with per-request timeouts.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeouts: Timeouts,
}

impl HttpFetcher {
    /// Build a fetcher that sends `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Client` if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str, timeouts: Timeouts) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Client {
                message: e.to_string(),
            })?;
        Ok(Self { client, timeouts })
    }

    fn fetch_with(&self, url: &Url, timeout: std::time::Duration) -> Result<Response> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .map_err(|e| Error::transport(url.as_str(), e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| Error::transport(url.as_str(), e.to_string()))?;
        debug!(url = %url, status, bytes = body.len(), "GET");
        Ok(Response::new(status, body.to_vec()))
    }
}

impl Fetcher for HttpFetcher {
    fn head(&self, url: &Url) -> Result<u16> {
        let response = self
            .client
            .head(url.clone())
            .timeout(self.timeouts.probe())
            .send()
            .map_err(|e| Error::transport(url.as_str(), e.to_string()))?;
        let status = response.status().as_u16();
        debug!(url = %url, status, "HEAD");
        Ok(status)
    }

    fn get(&self, url: &Url) -> Result<Response> {
        self.fetch_with(url, self.timeouts.fetch())
    }

    fn download(&self, url: &Url) -> Result<Vec<u8>> {
        self.fetch_with(url, self.timeouts.download())?
            .into_body(url)
    }
}
