//! Validate, snapshot and compare command implementations

use colored::Colorize;

use mirror_core::{MirrorConfig, ReportBuilder, ReportDiff, ReportStore};
use mirror_net::Fetcher;

use crate::error::Result;

/// Run the validate command
///
/// Checks every mirrored page and writes the latest report pair.
pub fn run_validate(config: &MirrorConfig, fetcher: &dyn Fetcher) -> Result<()> {
    println!(
        "{} Validating {} against {}",
        "=>".blue().bold(),
        config.site_root.display(),
        config.base_url
    );

    let report = ReportBuilder::new(config, fetcher).build()?;
    let (json, markdown) = ReportStore::new(&config.report_dir).save(&report)?;

    let failed = report.failed_pages();
    let missing = report.missing_resources().len();
    println!("   Pages checked: {}", report.pages.len());
    if failed > 0 {
        println!("   {} {} pages failed", "!".red(), failed);
    }
    if missing == 0 {
        println!("{} No missing local resources.", "OK".green().bold());
    } else {
        println!(
            "{} {} distinct missing resources",
            "MISSING".yellow().bold(),
            missing
        );
    }
    println!("Wrote reports:");
    println!("   - {}", json.display());
    println!("   - {}", markdown.display());
    Ok(())
}

/// Run the snapshot command
pub fn run_snapshot(config: &MirrorConfig) -> Result<()> {
    let path = ReportStore::new(&config.report_dir).snapshot_before_sync()?;
    println!("{} Snapshot saved: {}", "OK".green().bold(), path.display());
    Ok(())
}

/// Run the compare command
///
/// Fails if either the snapshot or the latest report is absent.
pub fn run_compare(config: &MirrorConfig) -> Result<()> {
    let store = ReportStore::new(&config.report_dir);
    let before = store.load_before_sync()?;
    let after = store.load_latest()?;

    let diff = ReportDiff::between(&before, &after);
    let path = store.save_comparison(&diff.render_markdown())?;

    println!("Before missing: {}", diff.before().len());
    println!("After missing:  {}", diff.after().len());
    println!(
        "Resolved:       {}",
        diff.resolved().len().to_string().green()
    );
    println!(
        "New missing:    {}",
        diff.new_missing().len().to_string().red()
    );
    println!("{} Wrote compare summary: {}", "OK".green().bold(), path.display());
    Ok(())
}
