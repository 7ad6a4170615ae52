//! Workspace-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors specific to workspace operations.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// Workspace root or descriptor does not exist.
    #[error("Invalid workspace: '{}'. Create one with 'son-workspace --init'.", .0.display())]
    NotFound(PathBuf),

    /// Service Platform entry already exists.
    #[error("Couldn't add entry. Service Platform ID='{0}' already exists.")]
    PlatformExists(String),

    /// Service Platform entry was not found.
    #[error("Service Platform ID='{0}' doesn't exist in the workspace configuration.")]
    PlatformNotFound(String),

    /// No platform was requested and the workspace has no default.
    #[error("No Service Platform selected and the workspace has no default. Use --platform or 'son-access config --platform SP_ID --default'.")]
    NoDefaultPlatform,

    /// Failed to serialize/deserialize the workspace descriptor.
    #[error("Workspace descriptor corrupted: {0}")]
    Corrupted(String),
}
