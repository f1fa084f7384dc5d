//! Configuration discovery
//!
//! Commands work from anywhere inside a mirror workspace: without `--config`
//! the nearest `mirror.toml` in the current directory or its ancestors is
//! used.

use std::path::{Path, PathBuf};

use mirror_core::{CONFIG_FILE, MirrorConfig};
use mirror_net::HttpFetcher;
use tracing::debug;

use crate::error::{CliError, Result};

/// Loaded configuration plus the HTTP client built from it.
pub struct Context {
    pub config: MirrorConfig,
    pub fetcher: HttpFetcher,
}

impl Context {
    /// Load the configuration at `explicit`, or discover one from `cwd`.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => find_config(cwd).ok_or_else(|| {
                CliError::user(format!(
                    "No {CONFIG_FILE} found in {} or its parents (use --config)",
                    cwd.display()
                ))
            })?,
        };
        if !path.is_file() {
            return Err(CliError::user(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        debug!("Using configuration {}", path.display());
        let config = MirrorConfig::load(&path)?;
        let fetcher = HttpFetcher::new(&config.user_agent, config.timeouts)?;
        Ok(Self { config, fetcher })
    }
}

/// Nearest `mirror.toml` at or above `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
