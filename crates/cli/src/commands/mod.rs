//! Command implementations.

mod list;
mod replay;
mod validate;

pub use list::run_list;
pub use replay::run_replay;
pub use validate::run_validate;

use anyhow::Result;
use config_loader::{ConfigLoader, FlightLogConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::CliError;

/// Load the configuration, or defaults when no file is given
fn load_config(path: Option<&Path>) -> Result<FlightLogConfig> {
    let Some(path) = path else {
        debug!("No configuration file given, using defaults");
        return Ok(FlightLogConfig::default());
    };

    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()).into());
    }

    let config = ConfigLoader::load_from_path(path)
        .map_err(|e| CliError::config_invalid(e.to_string()))?;
    info!(config = %path.display(), log = %config.log.path.display(), "Configuration loaded");
    Ok(config)
}

/// `--log` wins over the configured path
fn log_path(config: &FlightLogConfig, flag: Option<&PathBuf>) -> PathBuf {
    flag.cloned().unwrap_or_else(|| config.log.path.clone())
}
