//! Walks over the mirror tree
//!
//! Both walks return results in a stable sorted order so repeated runs over
//! an unchanged mirror produce identical output.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::{MirrorPath, SitePath};

/// Extensions of mirror files that may embed bundle references.
pub const TEXT_ASSET_EXTENSIONS: &[&str] = &["html", "js", "css"];

/// Enumerate every page held by the mirror.
///
/// The root page `/` is included when the mirror root has an index document;
/// every nested directory holding an index document contributes `/<dir>/`.
pub fn index_pages(root: &Path) -> Vec<SitePath> {
    let index = MirrorPath::IndexFile.as_str();
    let mut pages = BTreeSet::new();

    if root.join(index).is_file() {
        pages.insert(SitePath::root());
    }

    for entry in WalkDir::new(root).min_depth(2).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable mirror entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != index {
            continue;
        }
        let Some(dir) = entry.path().parent() else {
            continue;
        };
        if let Ok(rel) = dir.strip_prefix(root) {
            pages.insert(SitePath::from_index_dir(rel));
        }
    }

    pages.into_iter().collect()
}

/// List mirror files whose extension is in `extensions`, sorted by path.
pub fn text_assets(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable mirror entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                extensions.iter().any(|wanted| ext.eq_ignore_ascii_case(wanted))
            })
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}
