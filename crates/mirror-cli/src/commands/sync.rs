//! Sync command implementations
//!
//! Each command collects targets from one source and hands them to the
//! reconciler. Per-target failures are reported, never fatal.

use colored::Colorize;
use url::Url;

use mirror_core::sync::{
    missing_pages, requests_from_chunk_scan, requests_from_origin_pages, requests_from_paths,
    requests_from_report, write_missing_pages_list,
};
use mirror_core::{MirrorConfig, Reconciler, ReportStore, SitemapResolver, SyncOutcome, SyncStatus};
use mirror_fs::SitePath;
use mirror_net::Fetcher;

use crate::error::{CliError, Result};

/// Run the sync-report command
///
/// Fetches every resource the latest report marks missing.
pub fn run_sync_report(config: &MirrorConfig, fetcher: &dyn Fetcher) -> Result<SyncOutcome> {
    let report = ReportStore::new(&config.report_dir).load_latest()?;
    let targets = requests_from_report(&report, config);
    println!(
        "{} Missing resource URLs to attempt: {}",
        "=>".blue().bold(),
        targets.len()
    );

    let outcome = Reconciler::new(config, fetcher).sync(targets);
    print_outcome(&outcome);
    Ok(outcome)
}

/// Run the sync-chunks command
pub fn run_sync_chunks(config: &MirrorConfig, fetcher: &dyn Fetcher) -> Result<SyncOutcome> {
    println!(
        "{} Scanning for chunk references in {}",
        "=>".blue().bold(),
        config.site_root.display()
    );
    let targets = requests_from_chunk_scan(&config.site_root);
    println!("   Total chunk references found: {}", targets.len());

    let outcome = Reconciler::new(config, fetcher).sync(targets);
    print_outcome(&outcome);
    Ok(outcome)
}

/// Run the sync-origin command
///
/// Harvests chunk references from the live origin's HTML for `pages`, or
/// the configured `origin_pages` when none are given.
pub fn run_sync_origin(
    config: &MirrorConfig,
    fetcher: &dyn Fetcher,
    pages: &[String],
) -> Result<SyncOutcome> {
    let pages = if pages.is_empty() {
        config.origin_pages.as_slice()
    } else {
        pages
    };
    let pages = pages
        .iter()
        .map(|page| SitePath::parse(page))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    println!(
        "{} Fetching {} origin pages from {}",
        "=>".blue().bold(),
        pages.len(),
        config.origin
    );
    let targets = requests_from_origin_pages(fetcher, config, &pages);
    println!("   Total unique assets referenced: {}", targets.len());

    let outcome = Reconciler::new(config, fetcher).sync(targets);
    print_outcome(&outcome);
    Ok(outcome)
}

/// Run the fetch-pages command
///
/// Resolves the sitemap, lists the pages absent from the mirror and fetches
/// them. An unreachable root sitemap aborts the run.
pub fn run_fetch_pages(
    config: &MirrorConfig,
    fetcher: &dyn Fetcher,
    sitemap: Option<&str>,
) -> Result<SyncOutcome> {
    let root = match sitemap {
        Some(raw) => Url::parse(raw)
            .map_err(|e| CliError::user(format!("Invalid sitemap URL {raw}: {e}")))?,
        None => config.sitemap_url()?,
    };
    println!("{} Resolving sitemap {}", "=>".blue().bold(), root);

    let urls = SitemapResolver::new(fetcher, config).resolve(&root)?;
    println!("   Total URLs in sitemap: {}", urls.len());

    let missing = missing_pages(&urls, config);
    let listing = write_missing_pages_list(&config.site_root, &missing)?;
    println!(
        "   Missing pages: {} (listing: {})",
        missing.len(),
        listing.display()
    );

    let outcome = Reconciler::new(config, fetcher).sync(missing.iter().map(|page| page.request()));
    print_outcome(&outcome);
    Ok(outcome)
}

/// Run the fetch-asset command
pub fn run_fetch_asset(
    config: &MirrorConfig,
    fetcher: &dyn Fetcher,
    paths: &[String],
) -> Result<SyncOutcome> {
    let outcome = Reconciler::new(config, fetcher).sync(requests_from_paths(paths));
    print_outcome(&outcome);
    Ok(outcome)
}

fn print_outcome(outcome: &SyncOutcome) {
    for item in &outcome.items {
        let line = item.to_string();
        match item.status {
            SyncStatus::Downloaded => println!("{}", line.green()),
            SyncStatus::Exists => println!("{}", line.dimmed()),
            SyncStatus::Failed => println!("{}", line.red()),
        }
    }
    let done = if outcome.failed == 0 {
        "DONE".green().bold()
    } else {
        "DONE".yellow().bold()
    };
    println!("{} {}", done, outcome.summary());
}
