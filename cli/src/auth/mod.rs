//! Authentication state for son-cli.
//!
//! Bearer tokens issued by a Service Platform gatekeeper are kept in one file
//! per platform inside the workspace.

pub mod credentials;
pub mod tokens;

pub use credentials::TokenStore;
pub use tokens::{token_from_login_response, SessionToken};
