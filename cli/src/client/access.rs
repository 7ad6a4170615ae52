//! Session-level client binding a workspace platform to its delegates.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth::{token_from_login_response, SessionToken, TokenStore};
use crate::client::api::{validate_platform_url, PlatformApi};
use crate::client::pull::{PullClient, PullOperations};
use crate::client::push::{PushClient, PushOperations};
use crate::client::resource::{ResourceQuery, ResourceType};
use crate::config::ApiConfig;
use crate::error::{AccessError, Result};
use crate::workspace::Workspace;

const LOGIN_PATH: &str = "/login";
const REGISTER_PATH: &str = "/register";

/// Form body of the gatekeeper login and registration endpoints.
#[derive(Serialize)]
struct CredentialsForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// Authenticated client for one Service Platform.
///
/// Owns the session token and the pull/push delegates bound to the
/// platform URL. Delegates are generic so tests can substitute mocks.
pub struct AccessClient<P = PullClient, U = PushClient> {
    platform_id: String,
    api: PlatformApi,
    token_store: TokenStore,
    pull_client: P,
    push_client: U,
}

impl AccessClient {
    /// Builds a client for `platform`, or the workspace default if `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot be resolved or its URL is
    /// malformed. A token file that does not decode is ignored so that
    /// `client_login` can replace it. No request is made.
    pub fn new(workspace: &Workspace, platform: Option<&str>, config: &ApiConfig) -> Result<Self> {
        let (platform_id, platform) = workspace.resolve_platform(platform)?;
        let base_url = validate_platform_url(&platform.url)?;

        let token_store = TokenStore::for_platform(workspace, platform);
        let token = match token_store.load() {
            Ok(token) => token,
            Err(AccessError::InvalidToken(path)) => {
                tracing::warn!(
                    "Ignoring unreadable token file {path}; run 'son-access auth' to replace it"
                );
                None
            }
            Err(e) => return Err(e),
        };
        if token.is_none() {
            tracing::debug!(
                "No token stored for Service Platform '{platform_id}' at {}",
                token_store.path().display()
            );
        }

        let api = PlatformApi::new(base_url, config, token)?;
        let pull_client = PullClient::new(api.clone());
        let push_client = PushClient::new(api.clone());

        Ok(Self::with_delegates(
            platform_id,
            api,
            token_store,
            pull_client,
            push_client,
        ))
    }
}

impl<P: PullOperations, U: PushOperations> AccessClient<P, U> {
    /// Assembles a client from already constructed parts.
    pub fn with_delegates(
        platform_id: impl Into<String>,
        api: PlatformApi,
        token_store: TokenStore,
        pull_client: P,
        push_client: U,
    ) -> Self {
        Self {
            platform_id: platform_id.into(),
            api,
            token_store,
            pull_client,
            push_client,
        }
    }

    /// ID of the bound Service Platform.
    #[must_use]
    pub fn platform_id(&self) -> &str {
        &self.platform_id
    }

    /// Base URL of the bound Service Platform.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.api.base_url()
    }

    /// Token currently held by the session.
    pub async fn token(&self) -> Option<SessionToken> {
        self.api.token().await
    }

    /// Logs in and stores the issued token.
    ///
    /// Only a 2xx response is accepted as a token; on any other status
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AuthenticationFailed`] on 401/403 or an empty
    /// token, [`AccessError::ApiError`] on other failures.
    pub async fn client_login(&self, username: &str, password: &str) -> Result<SessionToken> {
        let body = self
            .post_credentials(LOGIN_PATH, username, password)
            .await?;

        let token = token_from_login_response(&body).ok_or_else(|| {
            AccessError::AuthenticationFailed("login response carried no token".to_string())
        })?;

        self.token_store.save(&token)?;
        self.api.set_token(Some(token.clone())).await;
        tracing::info!(
            "Access token for '{}' stored in {}",
            self.platform_id,
            self.token_store.path().display()
        );

        Ok(token)
    }

    /// Registers a user and returns the gatekeeper's response body.
    #[deprecated(note = "users register through the SONATA GUI")]
    pub async fn client_register(&self, username: &str, password: &str) -> Result<String> {
        self.post_credentials(REGISTER_PATH, username, password).await
    }

    /// Ends the local session by removing the stored token.
    ///
    /// The gatekeeper offers no logout endpoint, so nothing is sent.
    /// Returns `true` if a token was removed.
    pub async fn client_logout(&self) -> Result<bool> {
        let removed = self.token_store.delete()?;
        self.api.set_token(None).await;
        Ok(removed)
    }

    /// Exchanging the token for a platform session is not defined.
    pub async fn client_authenticate(&self) -> Result<()> {
        Err(AccessError::NotSupported("authenticate"))
    }

    /// Remote token validation is not defined.
    pub async fn check_token_validity(&self) -> Result<bool> {
        Err(AccessError::NotSupported("check token validity"))
    }

    /// Submits a package archive to the platform catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Usage`] if `path` is not a file, otherwise
    /// whatever the upload returns.
    pub async fn push_package(&self, path: &Path) -> Result<Value> {
        if !path.is_file() {
            return Err(AccessError::Usage(format!(
                "Package file not found: {}",
                path.display()
            )));
        }

        self.push_client.upload_package(path).await
    }

    /// Retrieves resources of one type from the platform catalogue.
    pub async fn pull_resource(
        &self,
        resource_type: ResourceType,
        query: &ResourceQuery,
    ) -> Result<Value> {
        match query {
            ResourceQuery::Id(id) => {
                tracing::debug!("Retrieving {} id='{id}'", resource_type.noun());
                match resource_type {
                    ResourceType::Services => self.pull_client.get_ns_by_id(id).await,
                    ResourceType::Functions => self.pull_client.get_vnf_by_id(id).await,
                    ResourceType::Packages => self.pull_client.get_package_by_id(id).await,
                }
            }
            ResourceQuery::Uuid(uuid) => {
                tracing::debug!("Retrieving {} uuid='{uuid}'", resource_type.noun());
                match resource_type {
                    ResourceType::Services => self.pull_client.get_ns_by_uuid(uuid).await,
                    ResourceType::Functions => self.pull_client.get_vnf_by_uuid(uuid).await,
                    ResourceType::Packages => self.pull_client.get_package_by_uuid(uuid).await,
                }
            }
            ResourceQuery::All => {
                tracing::info!("Listing all {resource_type} from '{}'", self.base_url());
                match resource_type {
                    ResourceType::Services => self.pull_client.get_all_nss().await,
                    ResourceType::Functions => self.pull_client.get_all_vnfs().await,
                    ResourceType::Packages => self.pull_client.get_all_packages().await,
                }
            }
        }
    }

    async fn post_credentials(&self, path: &str, username: &str, password: &str) -> Result<String> {
        let url = self.api.endpoint(path)?;
        tracing::debug!("POST {url} as '{username}'");

        let response = self
            .api
            .client()
            .post(url)
            .form(&CredentialsForm { username, password })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if matches!(status.as_u16(), 401 | 403) {
            return Err(AccessError::AuthenticationFailed(body));
        }
        if !status.is_success() {
            return Err(AccessError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}
