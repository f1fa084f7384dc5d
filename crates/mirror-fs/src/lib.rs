//! Filesystem layer for the site mirror
//!
//! Maps site URL paths onto files inside the mirror root, walks the mirror
//! for pages and text assets, and performs atomic writes.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use config::ConfigStore;
pub use constants::{MirrorPath, ReportFile};
pub use error::{Error, Result};
pub use path::SitePath;
