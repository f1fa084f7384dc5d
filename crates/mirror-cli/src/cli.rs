//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Site mirror integrity tools - validate a static mirror and fill its gaps
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the nearest mirror.toml)
    #[arg(short, long, global = true, env = "MIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate every mirrored page against the page server
    ///
    /// Writes validation_report.json and validation_report.md to the
    /// report directory.
    Validate,

    /// Save the latest report as the before-sync snapshot
    Snapshot,

    /// Compare the before-sync snapshot with the latest report
    Compare,

    /// Fetch the missing resources listed in the latest report
    SyncReport,

    /// Fetch bundle chunks referenced anywhere in the mirror
    SyncChunks,

    /// Fetch bundle chunks referenced by the live origin's pages
    ///
    /// Local pages are left untouched; copies of the fetched HTML go to
    /// _download_reports/remote_<page>.html.
    SyncOrigin {
        /// Site paths of origin pages (defaults to origin_pages from config)
        pages: Vec<String>,
    },

    /// Fetch sitemap pages that have no local copy
    FetchPages {
        /// Root sitemap URL (defaults to the origin's sitemap_path)
        #[arg(long)]
        sitemap: Option<String>,
    },

    /// Fetch specific site paths from the origin
    ///
    /// Examples:
    ///   mirror fetch-asset /favicon.ico
    ///   mirror fetch-asset /_next/static/css/app.css /robots.txt
    FetchAsset {
        /// Absolute site paths, e.g. /img/logo.png
        #[arg(required = true)]
        paths: Vec<String>,
    },
}
