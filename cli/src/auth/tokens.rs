//! Bearer token type and its on-disk encoding.
//!
//! A token file holds exactly one JSON string literal, e.g. `"eyJhbGciOi..."`.
//! This is the form the gatekeeper login endpoint answers with, so files
//! written by older SDK versions decode unchanged.

use std::fmt;

use serde_json::Value;

use crate::error::Result;

/// Opaque bearer token presented on authenticated requests.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encodes the token as a JSON string literal for storage.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Decodes the contents of a token file.
    ///
    /// Exactly the surrounding quote delimiters are removed; surrounding
    /// whitespace is ignored. Returns `None` for anything that is not a
    /// non-empty JSON string literal.
    #[must_use]
    pub fn decode(contents: &str) -> Option<Self> {
        serde_json::from_str::<String>(contents.trim())
            .ok()
            .filter(|token| !token.is_empty())
            .map(Self)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Extracts the token from a successful login response body.
///
/// Accepts a JSON string literal, a JSON object carrying `token` or
/// `access_token`, or a bare token in plain text.
#[must_use]
pub fn token_from_login_response(body: &str) -> Option<SessionToken> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let token = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(token)) => Some(token),
        Ok(Value::Object(map)) => ["token", "access_token"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => Some(body.to_string()),
    };

    token.filter(|token| !token.is_empty()).map(SessionToken)
}
