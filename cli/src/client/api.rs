//! Shared HTTP plumbing for talking to a Service Platform gatekeeper.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use crate::auth::SessionToken;
use crate::client::middleware::AuthMiddleware;
use crate::config::ApiConfig;
use crate::error::{AccessError, Result};

/// Session token shared between the middleware and the delegates.
pub type SharedToken = Arc<RwLock<Option<SessionToken>>>;

/// Validates a Service Platform base URL.
///
/// The URL must be absolute, use `http` or `https`, and name a host.
///
/// # Errors
///
/// Returns [`AccessError::InvalidPlatformUrl`] describing the problem.
pub fn validate_platform_url(raw: &str) -> Result<Url> {
    let invalid = |reason: &str| AccessError::InvalidPlatformUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }

    Ok(url)
}

/// HTTP client bound to one Service Platform and one session token.
#[derive(Clone)]
pub struct PlatformApi {
    client: ClientWithMiddleware,
    base_url: Url,
    api_version: String,
    token: SharedToken,
}

impl PlatformApi {
    /// Create a new API client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, config: &ApiConfig, token: Option<SessionToken>) -> Result<Self> {
        let inner_client = Client::builder()
            .user_agent(format!("son-cli/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let token: SharedToken = Arc::new(RwLock::new(token));

        let client = ClientBuilder::new(inner_client)
            .with(AuthMiddleware::new(Arc::clone(&token)))
            .build();

        Ok(Self {
            client,
            base_url,
            api_version: config.api_version.clone(),
            token,
        })
    }

    /// Builds the URL of a gatekeeper endpoint, e.g. `/packages`.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL does not parse.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{}{path}", self.api_version))?)
    }

    /// Fails with [`AccessError::NotAuthenticated`] unless a token is held.
    pub async fn require_token(&self) -> Result<()> {
        if self.token.read().await.is_some() {
            Ok(())
        } else {
            Err(AccessError::NotAuthenticated)
        }
    }

    /// Current session token.
    pub async fn token(&self) -> Option<SessionToken> {
        self.token.read().await.clone()
    }

    /// Replaces the session token.
    pub async fn set_token(&self, token: Option<SessionToken>) {
        *self.token.write().await = token;
    }

    /// Get the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }
}

/// Turns a gatekeeper response into parsed JSON.
///
/// Non-success statuses become errors. A success body that is not JSON is
/// returned as a JSON string; an empty body as `null`.
pub async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(AccessError::Unauthorized);
    }

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AccessError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(_) => Ok(Value::String(body)),
    }
}
