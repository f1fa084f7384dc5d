//! Resource reference scanning
//!
//! Two independent scanners share this module:
//! - **references**: tag-attribute extraction from page markup
//! - **chunks**: bundle and static-media paths anywhere in HTML, JS or CSS
//!
//! Both are pattern based. Malformed markup yields fewer matches, never an
//! error. [`classify`] decides which extracted references get checked.

mod chunks;
mod classify;
mod references;

pub use chunks::extract_chunk_paths;
pub use classify::{Locality, classify};
pub use references::{ResourceRefs, extract_references};

use serde::{Deserialize, Serialize};

/// Kind of a referenced resource, as recorded in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// `<link href>`: stylesheets, preloads, icons
    #[serde(rename = "link", alias = "stylesheet")]
    Link,
    /// `<script src>`
    #[serde(rename = "script")]
    Script,
    /// `<img src>`
    #[serde(rename = "img", alias = "image")]
    Image,
    /// `<source src>` and responsive-image candidates
    #[serde(rename = "source", alias = "media-source")]
    MediaSource,
    /// The page itself, only for synthetic page-level issues
    #[serde(rename = "page")]
    Page,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Script => "script",
            Self::Image => "img",
            Self::MediaSource => "source",
            Self::Page => "page",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
