//! File-backed token storage.
//!
//! Each Service Platform entry names a token file inside the workspace
//! platforms directory. The store reads and writes that one file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::auth::tokens::SessionToken;
use crate::error::{AccessError, Result};
use crate::workspace::{ServicePlatform, Workspace};

/// Token storage for a single Service Platform.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the store for a platform entry of a workspace.
    #[must_use]
    pub fn for_platform(workspace: &Workspace, platform: &ServicePlatform) -> Self {
        Self::new(workspace.token_path(platform))
    }

    /// Path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves a token, replacing any previous one.
    ///
    /// On unix the file is readable by its owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, token: &SessionToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = token.encode()?;
        let mut file = open_private(&self.path)?;
        file.write_all(encoded.as_bytes())?;
        tracing::debug!("Stored token in {}", self.path.display());

        Ok(())
    }

    /// Loads the stored token.
    ///
    /// Returns `None` if no token file exists.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidToken`] if the file does not hold an
    /// encoded token, or an IO error if it cannot be read.
    pub fn load(&self) -> Result<Option<SessionToken>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        SessionToken::decode(&contents)
            .map(Some)
            .ok_or_else(|| AccessError::InvalidToken(self.path.display().to_string()))
    }

    /// Deletes the stored token.
    ///
    /// Returns `true` if a token file was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn delete(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies to newly created files
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}
