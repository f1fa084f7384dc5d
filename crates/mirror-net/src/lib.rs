//! HTTP access layer for the site mirror
//!
//! Every network call in the workspace goes through the [`Fetcher`] trait so
//! the pipeline can run against the live site ([`HttpFetcher`]) or an
//! in-memory fake in tests.

pub mod error;
pub mod fetcher;
pub mod http;

pub use error::{Error, Result};
pub use fetcher::{Fetcher, Response, Timeouts};
pub use http::HttpFetcher;
