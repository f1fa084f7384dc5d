//! Site path handling and the URL-path to mirror-file mapping
//!
//! A [`SitePath`] is the path component of a URL on the mirrored site with
//! query and fragment removed. It maps onto exactly one file inside the
//! mirror root:
//!
//! | site path          | mirror file              |
//! |--------------------|--------------------------|
//! | `/`                | `index.html`             |
//! | `/about/`          | `about/index.html`       |
//! | `/about`           | `about/index.html`       |
//! | `/img/logo.png`    | `img/logo.png`           |
//! | `/img/my%20a.png`  | `img/my a.png`           |
//!
//! Trailing-slash and clean-route forms of the same page share one file so
//! repeated syncs stay idempotent. Percent-escapes are decoded before
//! mapping, the same way the page server decodes a request path.

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::{Error, MirrorPath, Result};

/// Bytes escaped when a directory name on disk becomes a URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A site-relative URL path, always starting with `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SitePath {
    /// URL form: no query, no fragment, a leading slash, escapes kept
    inner: String,
    /// Filesystem form: `inner` with percent-escapes decoded
    decoded: String,
}

impl SitePath {
    /// Parse a raw URL path (optionally carrying `?query` and `#fragment`).
    ///
    /// A missing leading slash is added. Paths containing a `..` segment,
    /// before or after percent-decoding, are rejected because they would
    /// resolve outside the mirror root.
    pub fn parse(raw: &str) -> Result<Self> {
        let end = raw.find(['?', '#']).unwrap_or(raw.len());
        let path = raw[..end].trim();

        let inner = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let decoded = percent_decode_str(&inner)
            .decode_utf8()
            .map_err(|_| Error::InvalidEncoding {
                path: raw.to_string(),
            })?
            .into_owned();

        let escapes = |p: &str| p.split(['/', '\\']).any(|segment| segment == "..");
        if escapes(&inner) || escapes(&decoded) {
            return Err(Error::UnsafePath {
                path: raw.to_string(),
            });
        }

        Ok(Self { inner, decoded })
    }

    /// The site root, `/`.
    pub fn root() -> Self {
        Self {
            inner: "/".to_string(),
            decoded: "/".to_string(),
        }
    }

    /// Build the page path for a mirror directory that holds an index document.
    ///
    /// `rel_dir` is relative to the mirror root; the empty path is the root page.
    pub fn from_index_dir(rel_dir: &Path) -> Self {
        let segments: Vec<String> = rel_dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .filter(|s| !s.is_empty() && s != ".")
            .collect();
        if segments.is_empty() {
            return Self::root();
        }
        let encoded: Vec<String> = segments
            .iter()
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect();
        Self {
            inner: format!("/{}/", encoded.join("/")),
            decoded: format!("/{}/", segments.join("/")),
        }
    }

    /// The URL form, percent-escapes intact.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// The decoded form used for filesystem mapping.
    pub fn decoded(&self) -> &str {
        &self.decoded
    }

    /// Whether the path names a directory (ends with `/`).
    pub fn is_directory(&self) -> bool {
        self.decoded.ends_with('/')
    }

    /// The final path segment, empty for directory paths.
    pub fn file_name(&self) -> &str {
        self.decoded.rsplit('/').next().unwrap_or("")
    }

    /// Whether the final segment carries an extension (contains a `.`).
    pub fn has_extension(&self) -> bool {
        self.file_name().contains('.')
    }

    /// The mirror-relative file this path maps to, using forward slashes.
    pub fn relative_file(&self) -> String {
        let trimmed = self.decoded.trim_start_matches('/');
        let index = MirrorPath::IndexFile.as_str();

        if self.is_directory() {
            // "/" and "/about/" both land on an index document
            format!("{trimmed}{index}")
        } else if self.has_extension() {
            trimmed.to_string()
        } else {
            format!("{trimmed}/{index}")
        }
    }

    /// The native path of the mapped file under `root`.
    pub fn local_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.relative_file().split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }
}

impl std::fmt::Display for SitePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl AsRef<str> for SitePath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}
