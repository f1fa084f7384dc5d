//! Mirror integrity pipeline
//!
//! This crate ties the filesystem and network layers together into the
//! operations run against a static site mirror:
//!
//! - **Validation**: request every mirrored page from the page server and
//!   record the local resources it fails to deliver ([`ReportBuilder`])
//! - **Comparison**: diff the missing resources of two reports ([`ReportDiff`])
//! - **Reconciliation**: fetch absent files from the origin ([`Reconciler`])
//! - **Discovery**: expand the origin's sitemap tree ([`SitemapResolver`])
//!
//! # Architecture
//!
//! ```text
//!                  mirror-cli
//!                      |
//!                 mirror-core
//!                      |
//!            +---------+---------+
//!            |                   |
//!        mirror-fs           mirror-net
//! ```
//!
//! Every component takes a [`MirrorConfig`] and a [`Fetcher`](mirror_net::Fetcher)
//! explicitly, so tests run the whole pipeline against an in-memory site.

pub mod check;
pub mod config;
pub mod diff;
pub mod error;
pub mod report;
pub mod scan;
pub mod sitemap;
pub mod sync;

pub use check::{Availability, check_url};
pub use config::{CONFIG_FILE, DEFAULT_IGNORED_HOSTS, MirrorConfig};
pub use diff::ReportDiff;
pub use error::{Error, Result};
pub use report::{PageRecord, Report, ReportBuilder, ReportStore, ResourceIssue};
pub use scan::{Locality, ResourceKind};
pub use sitemap::{SitemapDocument, SitemapResolver};
pub use sync::{Reconciler, SyncItem, SyncOutcome, SyncRequest, SyncStatus};
