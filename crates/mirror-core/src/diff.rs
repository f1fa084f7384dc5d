//! Before/after comparison of two reports
//!
//! Compares the missing-resource sets of a report taken before a sync with
//! one taken after it. URLs are compared as exact strings.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::report::Report;

/// Entries listed per category in the rendered summary.
pub const LISTING_CAP: usize = 50;

/// Set difference between two missing-resource sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDiff {
    before: BTreeSet<String>,
    after: BTreeSet<String>,
    resolved: BTreeSet<String>,
    new_missing: BTreeSet<String>,
}

impl ReportDiff {
    /// Compare the missing resources of two reports.
    pub fn between(before: &Report, after: &Report) -> Self {
        Self::from_sets(before.missing_resources(), after.missing_resources())
    }

    pub fn from_sets(before: BTreeSet<String>, after: BTreeSet<String>) -> Self {
        let resolved = before.difference(&after).cloned().collect();
        let new_missing = after.difference(&before).cloned().collect();
        Self {
            before,
            after,
            resolved,
            new_missing,
        }
    }

    pub fn before(&self) -> &BTreeSet<String> {
        &self.before
    }

    pub fn after(&self) -> &BTreeSet<String> {
        &self.after
    }

    /// Missing before, present after.
    pub fn resolved(&self) -> &BTreeSet<String> {
        &self.resolved
    }

    /// Everything missing after the sync, new or not.
    pub fn still_missing(&self) -> &BTreeSet<String> {
        &self.after
    }

    /// Missing after, but not before.
    pub fn new_missing(&self) -> &BTreeSet<String> {
        &self.new_missing
    }

    /// Render the comparison summary.
    ///
    /// Counts are always the full set sizes; listings stop at
    /// [`LISTING_CAP`] entries and empty categories are omitted.
    pub fn render_markdown(&self) -> String {
        let mut out = String::from("Validation Compare Summary\n\n");
        let _ = writeln!(out, "Before missing count: {}", self.before.len());
        let _ = writeln!(out, "After missing count: {}", self.after.len());
        let _ = writeln!(out, "Resolved count: {}", self.resolved.len());
        let _ = writeln!(out, "New missing count: {}", self.new_missing.len());
        out.push('\n');

        listing(&mut out, "Resolved resources:", &self.resolved);
        listing(&mut out, "Still missing resources:", &self.after);
        listing(&mut out, "Newly missing resources:", &self.new_missing);
        out
    }
}

fn listing(out: &mut String, title: &str, urls: &BTreeSet<String>) {
    if urls.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}");
    for url in urls.iter().take(LISTING_CAP) {
        let _ = writeln!(out, "- {url}");
    }
    if urls.len() > LISTING_CAP {
        let _ = writeln!(out, "- ... and {} more", urls.len() - LISTING_CAP);
    }
    out.push('\n');
}
