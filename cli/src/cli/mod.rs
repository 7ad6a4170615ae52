//! CLI module for son-access and son-profile.

pub mod args;
pub mod commands;

pub use args::{pull_query, Cli, Commands, ProfileCli, ResourceArg};
