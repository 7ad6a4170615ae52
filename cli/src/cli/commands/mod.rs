//! Command implementations.

pub mod auth;
pub mod config;
pub mod profile;
pub mod resources;

pub use auth::handle_auth;
pub use config::{handle_config, ConfigRequest};
pub use profile::handle_profile;
pub use resources::{handle_list, handle_pull, handle_push};
