//! Workspace data types for son-cli.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::workspace::error::WorkspaceError;

/// A SONATA SDK workspace, as described by its `workspace.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Root directory of the workspace (not part of the descriptor).
    #[serde(skip)]
    pub root: PathBuf,

    /// Descriptor format version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Human readable workspace name.
    pub name: String,

    /// Logging level the SDK tools should use.
    pub log_level: String,

    /// Catalogue servers, kept as written.
    #[serde(default)]
    pub catalogue_servers: Vec<serde_yaml::Value>,

    /// File extension of descriptors created in this workspace.
    #[serde(default = "default_descriptor_extension")]
    pub descriptor_extension: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas_local_master: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas_remote_master: Option<String>,

    /// Directory (relative to the root) holding platform token files.
    #[serde(default = "default_platforms_dir")]
    pub platforms_dir: String,

    #[serde(default = "default_catalogues_dir")]
    pub catalogues_dir: String,

    #[serde(default = "default_configuration_dir")]
    pub configuration_dir: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects_dir: Option<String>,

    /// Configured Service Platforms by ID.
    #[serde(default)]
    pub service_platforms: BTreeMap<String, ServicePlatform>,

    /// ID of the platform used when none is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_service_platform: Option<String>,
}

/// A named remote Service Platform endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlatform {
    /// Base URL of the platform gatekeeper.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub credentials: Credentials,
}

/// Credentials block of a Service Platform entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Token filename, relative to the platforms directory.
    #[serde(default = "default_token_file", alias = "token_file")]
    pub token: String,
}

/// Changes applied by `son-access config`.
#[derive(Debug, Clone, Default)]
pub struct PlatformUpdate {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub default: bool,
}

impl PlatformUpdate {
    /// Whether the update would change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.token.is_none()
            && !self.default
    }
}

fn default_version() -> String {
    "0.05".to_string()
}

fn default_descriptor_extension() -> String {
    "yml".to_string()
}

fn default_platforms_dir() -> String {
    "platforms".to_string()
}

fn default_catalogues_dir() -> String {
    "catalogues".to_string()
}

fn default_configuration_dir() -> String {
    "configuration".to_string()
}

fn default_token_file() -> String {
    "token.txt".to_string()
}

impl Workspace {
    /// Creates an empty workspace description rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: default_version(),
            name: name.into(),
            log_level: "info".to_string(),
            catalogue_servers: Vec::new(),
            descriptor_extension: default_descriptor_extension(),
            schemas_local_master: None,
            schemas_remote_master: None,
            platforms_dir: default_platforms_dir(),
            catalogues_dir: default_catalogues_dir(),
            configuration_dir: default_configuration_dir(),
            projects_dir: None,
            service_platforms: BTreeMap::new(),
            default_service_platform: None,
        }
    }

    /// Absolute path of the platforms directory.
    #[must_use]
    pub fn platforms_path(&self) -> PathBuf {
        self.root.join(&self.platforms_dir)
    }

    /// Path of the token file referenced by a platform entry.
    #[must_use]
    pub fn token_path(&self, platform: &ServicePlatform) -> PathBuf {
        self.platforms_path().join(&platform.credentials.token)
    }

    /// Looks up a Service Platform by ID.
    #[must_use]
    pub fn service_platform(&self, id: &str) -> Option<&ServicePlatform> {
        self.service_platforms.get(id)
    }

    /// Resolves the requested platform, falling back to the default entry.
    pub fn resolve_platform<'a>(
        &'a self,
        id: Option<&'a str>,
    ) -> Result<(&'a str, &'a ServicePlatform), WorkspaceError> {
        let id = id
            .or(self.default_service_platform.as_deref())
            .ok_or(WorkspaceError::NoDefaultPlatform)?;

        self.service_platform(id)
            .map(|platform| (id, platform))
            .ok_or_else(|| WorkspaceError::PlatformNotFound(id.to_string()))
    }

    /// Whether `id` is the default platform.
    #[must_use]
    pub fn is_default(&self, id: &str) -> bool {
        self.default_service_platform.as_deref() == Some(id)
    }

    /// Adds an empty Service Platform entry.
    pub fn add_service_platform(&mut self, id: &str) -> Result<(), WorkspaceError> {
        if self.service_platforms.contains_key(id) {
            return Err(WorkspaceError::PlatformExists(id.to_string()));
        }

        let platform = ServicePlatform {
            url: String::new(),
            credentials: Credentials {
                token: format!("{id}-token.txt"),
                ..Credentials::default()
            },
        };
        self.service_platforms.insert(id.to_string(), platform);

        Ok(())
    }

    /// Applies an update to an existing Service Platform entry.
    pub fn config_service_platform(
        &mut self,
        id: &str,
        update: PlatformUpdate,
    ) -> Result<&ServicePlatform, WorkspaceError> {
        let platform = self
            .service_platforms
            .get_mut(id)
            .ok_or_else(|| WorkspaceError::PlatformNotFound(id.to_string()))?;

        if let Some(url) = update.url {
            platform.url = url;
        }
        if let Some(username) = update.username {
            platform.credentials.username = Some(username);
        }
        if let Some(password) = update.password {
            platform.credentials.password = Some(password);
        }
        if let Some(token) = update.token {
            platform.credentials.token = token;
        }
        if update.default {
            self.default_service_platform = Some(id.to_string());
        }

        self.service_platforms
            .get(id)
            .ok_or_else(|| WorkspaceError::PlatformNotFound(id.to_string()))
    }

    /// Path of the descriptor file for a workspace rooted at `root`.
    #[must_use]
    pub fn descriptor_path(root: &Path) -> PathBuf {
        root.join(crate::workspace::storage::DESCRIPTOR_NAME)
    }
}

impl fmt::Display for ServicePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "url={}", self.url)?;
        if let Some(username) = &self.credentials.username {
            write!(f, " username={username}")?;
        }
        write!(f, " token={}", self.credentials.token)
    }
}
