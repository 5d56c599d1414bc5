pub mod resolve;
pub mod routes;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use fsroute::BuildConfig;

/// Rules from `path`, or the app-router preset when none is given
pub fn load_config(path: Option<&Path>) -> Result<BuildConfig> {
    match path {
        Some(path) => BuildConfig::from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display())),
        None => Ok(BuildConfig::app_router()),
    }
}
