//! Service Platform client.
//!
//! - [`AccessClient`] - session-level operations (login, push, pull)
//! - [`PullOperations`] / [`PullClient`] - catalogue queries
//! - [`PushOperations`] / [`PushClient`] - package upload

pub mod access;
pub mod api;
pub mod middleware;
pub mod pull;
pub mod push;
pub mod resource;

pub use access::AccessClient;
pub use api::{validate_platform_url, PlatformApi};
pub use pull::{PullClient, PullOperations};
pub use push::{PushClient, PushOperations};
pub use resource::{ResourceId, ResourceQuery, ResourceType};
