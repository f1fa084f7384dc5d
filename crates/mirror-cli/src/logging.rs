//! Tracing subscriber setup
//!
//! Logs go to stderr so command output on stdout stays pipeable. `--verbose`
//! forces `debug`; otherwise `RUST_LOG` applies, defaulting to `info`.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let filter_layer = filter(verbose, std::env::var("RUST_LOG").ok().as_deref())?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn filter(verbose: bool, env: Option<&str>) -> Result<EnvFilter, ParseError> {
    match (verbose, env) {
        (true, _) => EnvFilter::try_new("debug"),
        (false, Some(directives)) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives)
        }
        (false, _) => EnvFilter::try_new("info"),
    }
}
