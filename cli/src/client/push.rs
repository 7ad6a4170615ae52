//! Package submission to a Service Platform.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::client::api::{read_json, PlatformApi};
use crate::client::resource::ResourceType;
use crate::error::{AccessError, Result};

/// Multipart field carrying the package archive.
const PACKAGE_FIELD: &str = "package";

/// Package upload (enables mocking in tests).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushOperations: Send + Sync {
    /// Uploads a package archive in a single authenticated POST.
    async fn upload_package(&self, path: &Path) -> Result<Value>;
}

/// [`PushOperations`] over HTTP.
#[derive(Clone)]
pub struct PushClient {
    api: PlatformApi,
}

impl PushClient {
    #[must_use]
    pub const fn new(api: PlatformApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PushOperations for PushClient {
    async fn upload_package(&self, path: &Path) -> Result<Value> {
        self.api.require_token().await?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| AccessError::Usage(format!("Not a package file: {}", path.display())))?;
        let contents = tokio::fs::read(path).await?;

        let part = Part::bytes(contents)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;
        let form = Form::new().part(PACKAGE_FIELD, part);

        let url = self.api.endpoint(ResourceType::Packages.path())?;
        tracing::info!("Uploading {} to {url}", path.display());

        let response = self.api.client().post(url).multipart(form).send().await?;
        read_json(response).await
    }
}
