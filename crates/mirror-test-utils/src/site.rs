//! In-memory [`Fetcher`] standing in for both the origin and the page server.
//!
//! Routes are matched on the full URL string. Unrouted URLs answer 404, the
//! same as a real server, unless they fall under a directory registered with
//! [`FakeSite::serve_dir`], in which case the mirror file the path maps to is
//! served.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use mirror_fs::SitePath;
use mirror_net::{Error, Fetcher, Response, Result};
use url::Url;

/// HTTP method recorded for each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
}

#[derive(Debug, Clone)]
enum Route {
    Respond {
        status: u16,
        head_status: Option<u16>,
        body: Vec<u8>,
    },
    Fail(String),
}

/// Fake website with a request log.
#[derive(Debug, Default)]
pub struct FakeSite {
    routes: HashMap<String, Route>,
    served: Vec<(String, PathBuf)>,
    requests: RefCell<Vec<(Method, String)>>,
}

fn canonical(url: &str) -> String {
    Url::parse(url)
        .unwrap_or_else(|e| panic!("FakeSite: invalid url {url}: {e}"))
        .to_string()
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `status` and `body` for both HEAD and GET.
    pub fn route(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(
            canonical(url),
            Route::Respond {
                status,
                head_status: None,
                body: body.into(),
            },
        );
        self
    }

    /// Answer HEAD for `url` with a different status than GET.
    ///
    /// Models origins that reject lightweight probes.
    pub fn head_status(mut self, url: &str, status: u16) -> Self {
        let key = canonical(url);
        let route = self.routes.remove(&key).unwrap_or(Route::Respond {
            status: 200,
            head_status: None,
            body: Vec::new(),
        });
        let route = match route {
            Route::Respond { status: get, body, .. } => Route::Respond {
                status: get,
                head_status: Some(status),
                body,
            },
            fail => fail,
        };
        self.routes.insert(key, route);
        self
    }

    /// Fail every request to `url` at the transport level.
    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.routes
            .insert(canonical(url), Route::Fail(message.to_string()));
        self
    }

    /// Serve files from a mirror root for every URL under `base`,
    /// the way the page server does.
    pub fn serve_dir(mut self, base: &str, root: impl Into<PathBuf>) -> Self {
        self.served.push((canonical(base), root.into()));
        self
    }

    /// All requests made so far, in order.
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.requests.borrow().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Forget the request log.
    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    fn lookup(&self, url: &Url) -> Route {
        if let Some(route) = self.routes.get(url.as_str()) {
            return route.clone();
        }
        for (base, root) in &self.served {
            if !url.as_str().starts_with(base.as_str()) {
                continue;
            }
            let file = SitePath::parse(url.path())
                .ok()
                .map(|path| path.local_path(root))
                .and_then(|path| fs::read(path).ok());
            return match file {
                Some(body) => Route::Respond {
                    status: 200,
                    head_status: None,
                    body,
                },
                None => not_found(),
            };
        }
        not_found()
    }
}

fn not_found() -> Route {
    Route::Respond {
        status: 404,
        head_status: None,
        body: b"Not Found".to_vec(),
    }
}

impl Fetcher for FakeSite {
    fn head(&self, url: &Url) -> Result<u16> {
        self.requests
            .borrow_mut()
            .push((Method::Head, url.to_string()));
        match self.lookup(url) {
            Route::Respond {
                status,
                head_status,
                ..
            } => Ok(head_status.unwrap_or(status)),
            Route::Fail(message) => Err(Error::transport(url.as_str(), message)),
        }
    }

    fn get(&self, url: &Url) -> Result<Response> {
        self.requests
            .borrow_mut()
            .push((Method::Get, url.to_string()));
        match self.lookup(url) {
            Route::Respond { status, body, .. } => Ok(Response::new(status, body)),
            Route::Fail(message) => Err(Error::transport(url.as_str(), message)),
        }
    }
}
