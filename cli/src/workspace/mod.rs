//! Workspace management for son-cli.
//!
//! A workspace is a local directory holding `workspace.yml`, which names the
//! Service Platforms the SDK talks to and which of them is the default.
//! - Load and save the workspace descriptor
//! - Resolve, add and reconfigure Service Platform entries
//! - Locate per-platform token files

pub mod error;
pub mod storage;
pub mod types;

pub use error::WorkspaceError;
pub use storage::DESCRIPTOR_NAME;
pub use types::{Credentials, PlatformUpdate, ServicePlatform, Workspace};
