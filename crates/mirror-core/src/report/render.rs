//! Markdown rendering of a [`Report`]

use std::fmt::Write;

use super::model::Report;

/// Issues listed per page; the JSON report always holds all of them.
pub const MARKDOWN_ISSUE_CAP: usize = 10;

/// Render the human-readable summary of a report.
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Base URL: {}", report.base_url);
    let _ = writeln!(out, "Pages checked: {}", report.pages.len());
    let _ = writeln!(out, "Total missing local resources: {}", report.total_missing());
    out.push('\n');

    for page in &report.pages {
        let status = page
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "ERR".to_string());
        let _ = writeln!(
            out,
            "- {} ({}), checked {} resources, ignored external {}",
            page.path, status, page.checked_resources, page.external_ignored
        );
        for issue in page.missing_resources.iter().take(MARKDOWN_ISSUE_CAP) {
            let _ = writeln!(
                out,
                "  - missing {}: {} (status={}, err={})",
                issue.kind,
                issue.url,
                issue.status.map(|s| s.to_string()).as_deref().unwrap_or("-"),
                issue.error.as_deref().unwrap_or("-")
            );
        }
    }

    out
}
