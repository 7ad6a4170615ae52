//! Workspace Service Platform configuration handler.

use crate::client::validate_platform_url;
use crate::error::{AccessError, Result};
use crate::workspace::{PlatformUpdate, Workspace, WorkspaceError};

/// Arguments of `son-access config`.
#[derive(Debug, Clone, Default)]
pub struct ConfigRequest {
    pub platform: Option<String>,
    pub list: bool,
    pub new: bool,
    pub update: PlatformUpdate,
}

/// Handle the `son-access config` command.
///
/// Lists entries with `--list`; otherwise adds (`--new`) or modifies the
/// entry named by `--platform` and saves the workspace descriptor.
///
/// # Errors
///
/// Returns an error if no change was requested, the entry already exists
/// (`--new`) or does not exist (modify), the URL is malformed, or the
/// descriptor cannot be written.
pub fn handle_config(workspace: &mut Workspace, request: ConfigRequest) -> Result<()> {
    if request.list {
        print!("{}", format_platforms(workspace));
        return Ok(());
    }

    let id = request
        .platform
        .ok_or_else(|| AccessError::Usage("One of --platform or --list is required.".to_string()))?;

    if request.update.is_empty() {
        return Err(AccessError::Usage(
            "At least one of the following arguments must be specified: \
             (--url | --username | --password | --token | --default)"
                .to_string(),
        ));
    }

    if let Some(url) = &request.update.url {
        validate_platform_url(url)?;
    }

    if request.new {
        workspace.add_service_platform(&id)?;
        tracing::debug!("Added Service Platform entry '{id}'");
    } else if workspace.service_platform(&id).is_none() {
        return Err(WorkspaceError::PlatformNotFound(id).into());
    }

    let platform = workspace.config_service_platform(&id, request.update)?;
    println!("Service Platform ID='{id}': {platform}");

    workspace.save()?;
    Ok(())
}

/// Renders `[id]: url (default)` lines for every configured platform.
#[must_use]
pub fn format_platforms(workspace: &Workspace) -> String {
    if workspace.service_platforms.is_empty() {
        return "No Service Platforms configured.\n".to_string();
    }

    let mut output = String::new();
    for (id, platform) in &workspace.service_platforms {
        output.push_str(&format!("[{id}]: {}", platform.url));
        if workspace.is_default(id) {
            output.push_str(" (default)");
        }
        output.push('\n');
    }
    output
}
