//! Workspace descriptor persistence.
//!
//! The descriptor is a YAML file named [`DESCRIPTOR_NAME`] at the workspace
//! root. It is read once per invocation and written back only by explicit
//! [`Workspace::save`] calls.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::workspace::error::WorkspaceError;
use crate::workspace::types::Workspace;

/// Filename of the workspace descriptor.
pub const DESCRIPTOR_NAME: &str = "workspace.yml";

impl Workspace {
    /// Loads the workspace rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotFound`] if the root or its descriptor is
    /// missing, and [`WorkspaceError::Corrupted`] if the descriptor cannot be
    /// parsed or lacks a required key.
    pub fn load(root: &Path) -> Result<Self> {
        let descriptor = Self::descriptor_path(root);

        if !root.is_dir() || !descriptor.is_file() {
            tracing::error!("No workspace descriptor found at {}", descriptor.display());
            return Err(WorkspaceError::NotFound(root.to_path_buf()).into());
        }

        let contents = fs::read_to_string(&descriptor)?;
        let mut workspace: Self = serde_yaml::from_str(&contents)
            .map_err(|e| WorkspaceError::Corrupted(e.to_string()))?;
        workspace.root = root.to_path_buf();

        tracing::debug!(
            "Loaded workspace '{}' from {}",
            workspace.name,
            root.display()
        );

        Ok(workspace)
    }

    /// Writes the descriptor back to the workspace root.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(Self::descriptor_path(&self.root), yaml)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessError;
    use crate::workspace::PlatformUpdate;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_invalid_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let result = Workspace::load(&temp_dir.path().join("absent"));

        assert!(matches!(
            result,
            Err(AccessError::Workspace(WorkspaceError::NotFound(_)))
        ));
    }

    #[test]
    fn missing_descriptor_is_invalid_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let result = Workspace::load(temp_dir.path());

        assert!(matches!(
            result,
            Err(AccessError::Workspace(WorkspaceError::NotFound(_)))
        ));
    }

    #[test]
    fn incomplete_descriptor_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(DESCRIPTOR_NAME),
            "version: '0.01'\nplatforms_dir: platforms\ncatalogues_dir: catalogues\n",
        )
        .unwrap();

        let result = Workspace::load(temp_dir.path());
        assert!(matches!(
            result,
            Err(AccessError::Workspace(WorkspaceError::Corrupted(_)))
        ));
    }

    #[test]
    fn saved_workspace_loads_equal() {
        let temp_dir = TempDir::new().unwrap();
        let mut ws = Workspace::new(temp_dir.path(), "workspace_name");
        ws.add_service_platform("sp1").unwrap();
        ws.config_service_platform(
            "sp1",
            PlatformUpdate {
                url: Some("http://127.0.0.1:32001".to_string()),
                default: true,
                ..PlatformUpdate::default()
            },
        )
        .unwrap();
        ws.save().unwrap();

        let loaded = Workspace::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, ws);
    }
}
