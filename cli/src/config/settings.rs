//! Application configuration settings.

use std::path::PathBuf;

use serde::Deserialize;

use crate::config::paths::default_workspace_dir;
use crate::error::Result;

/// Main configuration for son-cli.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Service Platform API settings.
    pub api: ApiConfig,
    /// Workspace lookup settings.
    pub workspace: WorkspaceConfig,
}

/// Service Platform API client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Path prefix of the gatekeeper API, prepended to every endpoint.
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_version: "/api/v2".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Workspace configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Workspace used when `--workspace` is not given.
    pub default_path: Option<PathBuf>,
}

/// Environment variables that can override configuration.
pub mod env {
    pub const WORKSPACE: &str = "SON_WORKSPACE";
    pub const TIMEOUT: &str = "SON_ACCESS_TIMEOUT";
    pub const ACCESS_LOG: &str = "SON_ACCESS_LOG";
    pub const PROFILE_LOG: &str = "SON_PROFILE_LOG";
}

impl AccessConfig {
    /// Apply environment variable overrides to the configuration.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(env::WORKSPACE) {
            if !path.is_empty() {
                self.workspace.default_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(timeout) = std::env::var(env::TIMEOUT) {
            if let Ok(secs) = timeout.parse() {
                self.api.timeout_secs = secs;
            }
        }

        self
    }

    /// Resolve the workspace root: explicit argument, then configuration,
    /// then `~/.son-workspace`.
    pub fn workspace_root(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        match explicit.or_else(|| self.workspace.default_path.clone()) {
            Some(path) => Ok(path),
            None => default_workspace_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_gatekeeper_v2() {
        let config = AccessConfig::default();
        assert_eq!(config.api.api_version, "/api/v2");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.workspace.default_path.is_none());
    }

    #[test]
    fn explicit_workspace_wins() {
        let mut config = AccessConfig::default();
        config.workspace.default_path = Some(PathBuf::from("/configured"));

        let root = config
            .workspace_root(Some(PathBuf::from("/explicit")))
            .unwrap();
        assert_eq!(root, PathBuf::from("/explicit"));

        let root = config.workspace_root(None).unwrap();
        assert_eq!(root, PathBuf::from("/configured"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AccessConfig = toml::from_str("[api]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.api_version, "/api/v2");
    }
}
