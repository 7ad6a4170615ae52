//! SONATA SDK command-line tools.
//!
//! `son-access` authenticates against a Service Platform gatekeeper and
//! pushes or pulls packages and descriptors to and from its catalogue.
//! `son-profile` prepares profiling experiments described by a PED file.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod profile;
pub mod workspace;

use tracing_subscriber::EnvFilter;

pub use error::{AccessError, Result};

/// Installs the global tracing subscriber.
///
/// The filter is read from `env_var`, falling back to `debug` when
/// `verbose` is set and `info` otherwise.
pub fn init_logging(env_var: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(env_var).unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
