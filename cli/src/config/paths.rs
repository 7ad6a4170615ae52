//! Platform-specific path utilities for son-cli.

use std::path::PathBuf;

use crate::error::{AccessError, Result};

/// Directory name of the default workspace inside the home directory.
pub const DEFAULT_WORKSPACE_DIR_NAME: &str = ".son-workspace";

/// Get the configuration directory for son-cli.
///
/// - Linux: `~/.config/son-cli`
/// - macOS: `~/Library/Application Support/son-cli`
/// - Windows: `%APPDATA%\son-cli`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| AccessError::Config("Cannot determine config directory".to_string()))?;
    Ok(base.join("son-cli"))
}

/// Get the main configuration file path.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the default workspace root (`~/.son-workspace`).
pub fn default_workspace_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AccessError::Config("Cannot determine home directory".to_string()))?;
    Ok(home.join(DEFAULT_WORKSPACE_DIR_NAME))
}
