//! Error types and result aliases for son-cli.
//!
//! Every fallible operation returns [`Result`]. Messages are shown to the
//! user verbatim by the binaries, so they name the command that fixes the
//! problem where one exists.

use thiserror::Error;

use crate::profile::ProfileError;
use crate::workspace::WorkspaceError;

/// Main error type for son-cli operations.
///
/// Messages are shown verbatim. Errors for which
/// [`requires_reauth`](Self::requires_reauth) holds are followed by
/// [`REAUTH_HINT`](Self::REAUTH_HINT).
#[derive(Error, Debug)]
pub enum AccessError {
    /// No token is stored for the selected Service Platform.
    #[error("Not authenticated with the selected Service Platform.")]
    NotAuthenticated,

    /// The token file exists but does not hold a token.
    #[error("Invalid token file '{0}'.")]
    InvalidToken(String),

    /// Gatekeeper rejected the supplied username and password.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The operation is declared but has no defined behavior yet.
    #[error("Operation '{0}' is not supported by this Service Platform client.")]
    NotSupported(&'static str),

    /// Service Platform URL is malformed.
    #[error("Invalid Service Platform URL '{url}': {reason}")]
    InvalidPlatformUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Service Platform returned a non-success status code.
    #[error("Service Platform request failed ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Service Platform returned 401 Unauthorized.
    #[error("Service Platform returned unauthorized (401). Your token may have expired.")]
    Unauthorized,

    /// Service Platform is unreachable.
    #[error("Service Platform is unavailable. Check the configured URL and your network connection.")]
    ApiUnavailable,

    /// Request timed out.
    #[error("Request timed out. The Service Platform may be slow or unreachable.")]
    Timeout,

    /// Network error during HTTP request.
    #[error("Network error: {0}")]
    Network(String),

    /// Command line arguments are valid syntax but unusable.
    #[error("{0}")]
    Usage(String),

    /// General configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}. Check file permissions and format.")]
    ConfigRead(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON or YAML serialization/deserialization failed.
    #[error("Data serialization error: {0}")]
    Serialization(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Workspace operation error.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Profiling experiment error.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl AccessError {
    /// Printed after errors that a fresh login resolves.
    pub const REAUTH_HINT: &'static str =
        "Run 'son-access auth -u USERNAME -p PASSWORD' to authenticate.";

    /// Checks if this error can be resolved by logging in again.
    #[must_use]
    pub const fn requires_reauth(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated
                | Self::InvalidToken(_)
                | Self::Unauthorized
                | Self::AuthenticationFailed(_)
        )
    }
}

/// Result type alias using [`AccessError`].
pub type Result<T> = std::result::Result<T, AccessError>;

impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {err}"))
    }
}

impl From<serde_yaml::Error> for AccessError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(format!("YAML error: {err}"))
    }
}

impl From<reqwest::Error> for AccessError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ApiUnavailable
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for AccessError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => Self::Network(e.to_string()),
        }
    }
}
