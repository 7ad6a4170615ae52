//! Configuration for the son-cli tools.
//!
//! Settings are read from `<config_dir>/son-cli/config.toml` when it exists;
//! environment overrides are applied on top. The tools never write it.

pub mod paths;
pub mod settings;

pub use paths::{config_file, default_workspace_dir};
pub use settings::{AccessConfig, ApiConfig, WorkspaceConfig};

use std::io;
use std::path::Path;

use crate::error::{AccessError, Result};

/// Reads the user's configuration file.
pub fn load_config() -> Result<AccessConfig> {
    load_config_from(&config_file()?)
}

/// Reads configuration from `path`, using defaults for an absent file or
/// absent keys.
pub fn load_config_from(path: &Path) -> Result<AccessConfig> {
    let read_error =
        |reason: String| AccessError::ConfigRead(format!("{}: {reason}", path.display()));

    let config = match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<AccessConfig>(&contents)
            .map_err(|e| read_error(e.to_string()))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            AccessConfig::default()
        }
        Err(e) => return Err(read_error(e.to_string())),
    };

    Ok(config.with_env_overrides())
}
