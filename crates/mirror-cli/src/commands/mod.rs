//! Command implementations for mirror-cli
//!
//! Every command takes the configuration and a [`Fetcher`](mirror_net::Fetcher)
//! explicitly, so tests drive them against an in-memory site.

pub mod report;
pub mod sync;

pub use report::{run_compare, run_snapshot, run_validate};
pub use sync::{
    run_fetch_asset, run_fetch_pages, run_sync_chunks, run_sync_origin, run_sync_report,
};
