//! Shared test utilities for the site-mirror workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`site`]: [`FakeSite`], an in-memory [`mirror_net::Fetcher`]
//! - [`mirror`]: [`TestMirror`] builder for a temporary mirror tree

pub mod mirror;
pub mod site;

pub use mirror::TestMirror;
pub use site::{FakeSite, Method};
