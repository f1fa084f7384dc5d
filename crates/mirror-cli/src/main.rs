//! Site mirror CLI
//!
//! Validates a static site mirror through its page server, compares runs and
//! fetches whatever is missing from the live origin.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    let ctx = Context::load(cli.config.as_deref(), &cwd)?;
    execute_command(cli.command, &ctx)
}

fn execute_command(cmd: Commands, ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let fetcher = &ctx.fetcher;

    match cmd {
        Commands::Validate => commands::run_validate(config, fetcher),
        Commands::Snapshot => commands::run_snapshot(config),
        Commands::Compare => commands::run_compare(config),
        Commands::SyncReport => commands::run_sync_report(config, fetcher).map(drop),
        Commands::SyncChunks => commands::run_sync_chunks(config, fetcher).map(drop),
        Commands::SyncOrigin { pages } => {
            commands::run_sync_origin(config, fetcher, &pages).map(drop)
        }
        Commands::FetchPages { sitemap } => {
            commands::run_fetch_pages(config, fetcher, sitemap.as_deref()).map(drop)
        }
        Commands::FetchAsset { paths } => {
            commands::run_fetch_asset(config, fetcher, &paths).map(drop)
        }
    }
}
