//! Read-only catalogue queries against a Service Platform.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::api::{read_json, PlatformApi};
use crate::client::resource::{ResourceId, ResourceType};
use crate::error::{AccessError, Result};

/// Catalogue queries (enables mocking in tests).
///
/// Every method is a single authenticated GET returning the parsed body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullOperations: Send + Sync {
    /// Network service by vendor, name and version.
    async fn get_ns_by_id(&self, id: &ResourceId) -> Result<Value>;

    /// Network service by UUID.
    async fn get_ns_by_uuid(&self, uuid: &str) -> Result<Value>;

    /// All network services.
    async fn get_all_nss(&self) -> Result<Value>;

    /// Function by vendor, name and version.
    async fn get_vnf_by_id(&self, id: &ResourceId) -> Result<Value>;

    /// Function by UUID.
    async fn get_vnf_by_uuid(&self, uuid: &str) -> Result<Value>;

    /// All functions.
    async fn get_all_vnfs(&self) -> Result<Value>;

    /// Package by vendor, name and version.
    async fn get_package_by_id(&self, id: &ResourceId) -> Result<Value>;

    /// Package by UUID.
    async fn get_package_by_uuid(&self, uuid: &str) -> Result<Value>;

    /// All packages.
    async fn get_all_packages(&self) -> Result<Value>;
}

/// [`PullOperations`] over HTTP.
#[derive(Clone)]
pub struct PullClient {
    api: PlatformApi,
}

impl PullClient {
    #[must_use]
    pub const fn new(api: PlatformApi) -> Self {
        Self { api }
    }

    async fn list(&self, resource: ResourceType) -> Result<Value> {
        self.api.require_token().await?;
        let url = self.api.endpoint(resource.path())?;
        tracing::debug!("GET {url}");

        let response = self.api.client().get(url).send().await?;
        read_json(response).await
    }

    async fn by_id(&self, resource: ResourceType, id: &ResourceId) -> Result<Value> {
        self.api.require_token().await?;
        let url = self.api.endpoint(resource.path())?;
        tracing::debug!("GET {url}?{id}");

        let response = self.api.client().get(url).query(id).send().await?;
        read_json(response).await
    }

    async fn by_uuid(&self, resource: ResourceType, uuid: &str) -> Result<Value> {
        self.api.require_token().await?;
        let mut url = self.api.endpoint(resource.path())?;
        url.path_segments_mut()
            .map_err(|()| AccessError::Config("Service Platform URL cannot carry a path".to_string()))?
            .push(uuid);
        tracing::debug!("GET {url}");

        let response = self.api.client().get(url).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl PullOperations for PullClient {
    async fn get_ns_by_id(&self, id: &ResourceId) -> Result<Value> {
        self.by_id(ResourceType::Services, id).await
    }

    async fn get_ns_by_uuid(&self, uuid: &str) -> Result<Value> {
        self.by_uuid(ResourceType::Services, uuid).await
    }

    async fn get_all_nss(&self) -> Result<Value> {
        self.list(ResourceType::Services).await
    }

    async fn get_vnf_by_id(&self, id: &ResourceId) -> Result<Value> {
        self.by_id(ResourceType::Functions, id).await
    }

    async fn get_vnf_by_uuid(&self, uuid: &str) -> Result<Value> {
        self.by_uuid(ResourceType::Functions, uuid).await
    }

    async fn get_all_vnfs(&self) -> Result<Value> {
        self.list(ResourceType::Functions).await
    }

    async fn get_package_by_id(&self, id: &ResourceId) -> Result<Value> {
        self.by_id(ResourceType::Packages, id).await
    }

    async fn get_package_by_uuid(&self, uuid: &str) -> Result<Value> {
        self.by_uuid(ResourceType::Packages, uuid).await
    }

    async fn get_all_packages(&self) -> Result<Value> {
        self.list(ResourceType::Packages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionToken;
    use crate::config::ApiConfig;
    use url::Url;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> PullClient {
        let api = PlatformApi::new(
            Url::parse(&server.uri()).unwrap(),
            &ApiConfig::default(),
            token.map(SessionToken::new),
        )
        .unwrap();
        PullClient::new(api)
    }

    #[tokio::test]
    async fn list_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/services"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"uuid": "1"}, {"uuid": "2"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, Some("abc")).get_all_nss().await.unwrap();
        assert_eq!(result.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn by_uuid_appends_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/api/v2/packages/65b416a6-46c0-4596-a9e9-0a9b04ed34ea",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "uuid": "65b416a6-46c0-4596-a9e9-0a9b04ed34ea"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, Some("abc"))
            .get_package_by_uuid("65b416a6-46c0-4596-a9e9-0a9b04ed34ea")
            .await
            .unwrap();
        assert_eq!(result["uuid"], "65b416a6-46c0-4596-a9e9-0a9b04ed34ea");
    }

    #[tokio::test]
    async fn by_id_sends_vendor_name_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/functions"))
            .and(query_param("vendor", "sonata.eu"))
            .and(query_param("name", "firewall-vnf"))
            .and(query_param("version", "1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let id = ResourceId::new("sonata.eu", "firewall-vnf", "1.0");
        client_for(&server, Some("abc"))
            .get_vnf_by_id(&id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_token_fails_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server, None).get_all_packages().await;
        assert!(matches!(result, Err(AccessError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn error_statuses_are_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/services"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/functions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("expired"));
        assert!(matches!(
            client.get_all_nss().await,
            Err(AccessError::Unauthorized)
        ));
        match client.get_all_vnfs().await {
            Err(AccessError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
