//! Reconciliation of the mirror against the origin
//!
//! A sync takes a set of site paths, skips those already present locally and
//! downloads the rest from the origin. Targets come from several sources:
//!
//! - **report**: missing resources recorded by a validation pass
//! - **chunk scan**: bundle paths referenced anywhere in the mirror
//! - **origin pages**: bundle paths referenced by the live origin's HTML
//! - **sitemap**: pages listed by the origin but absent locally
//! - **explicit**: paths named by the caller
//!
//! Existence is authoritative: a file that exists is never fetched or
//! overwritten, which makes every sync idempotent.

mod outcome;
mod reconciler;
mod targets;

pub use outcome::{SyncItem, SyncOutcome, SyncStatus};
pub use reconciler::Reconciler;
pub use targets::{
    MissingPage, SyncRequest, missing_pages, requests_from_chunk_scan,
    requests_from_origin_pages, requests_from_paths, requests_from_report,
    write_missing_pages_list,
};
