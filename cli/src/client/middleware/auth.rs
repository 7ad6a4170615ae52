//! Bearer token injection for Service Platform requests.

use async_trait::async_trait;
use http::header::{HeaderValue, AUTHORIZATION};
use http::Extensions;
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next, Result};

use crate::client::api::SharedToken;

/// Adds `Authorization: Bearer <token>` while the session holds a token.
///
/// Requests made without a token (login, registration) pass through
/// untouched.
pub struct AuthMiddleware {
    token: SharedToken,
}

impl AuthMiddleware {
    #[must_use]
    pub fn new(token: SharedToken) -> Self {
        Self { token }
    }

    async fn header_value(&self) -> Option<HeaderValue> {
        let guard = self.token.read().await;
        let token = guard.as_ref()?;

        match HeaderValue::from_str(&format!("Bearer {}", token.as_str())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(value)
            }
            Err(_) => {
                tracing::warn!("Stored token contains characters not allowed in a header");
                None
            }
        }
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if let Some(value) = self.header_value().await {
            req.headers_mut().insert(AUTHORIZATION, value);
        }

        let response = next.run(req, extensions).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Service Platform rejected the session token (401)");
        }

        Ok(response)
    }
}
