//! Command-line argument parsing.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};

use crate::client::{ResourceId, ResourceQuery, ResourceType};

/// SONATA Service Platform access tool.
///
/// Authenticates against a Service Platform gatekeeper and pushes or pulls
/// packages, services and functions to and from its catalogue.
#[derive(Parser, Debug)]
#[command(name = "son-access")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace to use (defaults to the configured workspace or ~/.son-workspace).
    #[arg(short, long = "workspace", value_name = "WORKSPACE_PATH", global = true)]
    pub workspace: Option<PathBuf>,

    /// Service Platform ID to use (defaults to the workspace default).
    #[arg(short = 'p', long = "platform", value_name = "PLATFORM_ID")]
    pub platform: Option<String>,

    /// Enable debug output.
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate a user against the Service Platform.
    Auth {
        /// Username of the Service Platform account.
        #[arg(short, long)]
        username: String,

        /// Password of the Service Platform account.
        #[arg(short, long)]
        password: String,
    },

    /// List all resources of a type available in the catalogue.
    List {
        /// Resource type to list.
        #[arg(value_enum)]
        resource: ResourceArg,
    },

    /// Submit a package to the Service Platform.
    Push {
        /// Path of the package archive.
        package: PathBuf,
    },

    /// Retrieve a single resource from the catalogue.
    #[command(group(ArgGroup::new("selector").required(true).args(["uuid", "id"])))]
    Pull {
        /// Resource type to pull.
        #[arg(value_enum)]
        resource: ResourceArg,

        /// UUID of the resource.
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        uuid: Option<String>,

        /// Vendor, name and version of the resource.
        #[arg(
            long,
            num_args = 3,
            value_names = ["VENDOR", "NAME", "VERSION"],
            value_parser = NonEmptyStringValueParser::new()
        )]
        id: Option<Vec<String>>,
    },

    /// Show or modify the Service Platforms configured in the workspace.
    #[command(group(ArgGroup::new("target").required(true).args(["platform", "list"])))]
    Config {
        /// Service Platform ID to add or modify.
        #[arg(long = "platform", value_name = "SP_ID")]
        platform: Option<String>,

        /// List the configured Service Platforms.
        #[arg(long)]
        list: bool,

        /// Add a new Service Platform entry.
        #[arg(long, requires = "platform")]
        new: bool,

        /// Gatekeeper URL of the Service Platform.
        #[arg(long)]
        url: Option<String>,

        /// Username stored for the Service Platform.
        #[arg(short, long)]
        username: Option<String>,

        /// Password stored for the Service Platform.
        #[arg(short, long)]
        password: Option<String>,

        /// Token filename, relative to the workspace platforms directory.
        #[arg(long)]
        token: Option<String>,

        /// Make this the default Service Platform.
        #[arg(long)]
        default: bool,
    },
}

/// Resource type argument for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceArg {
    Services,
    Functions,
    Packages,
}

impl From<ResourceArg> for ResourceType {
    fn from(arg: ResourceArg) -> Self {
        match arg {
            ResourceArg::Services => Self::Services,
            ResourceArg::Functions => Self::Functions,
            ResourceArg::Packages => Self::Packages,
        }
    }
}

/// Builds the query selected by `pull --uuid` or `pull --id`.
///
/// Returns `None` unless exactly one selector is present.
#[must_use]
pub fn pull_query(uuid: Option<String>, id: Option<Vec<String>>) -> Option<ResourceQuery> {
    match (uuid, id) {
        (Some(uuid), None) => Some(ResourceQuery::Uuid(uuid)),
        (None, Some(id)) => match <[String; 3]>::try_from(id) {
            Ok([vendor, name, version]) => {
                Some(ResourceQuery::Id(ResourceId::new(vendor, name, version)))
            }
            Err(_) => None,
        },
        _ => None,
    }
}

/// SONATA profiling tool.
///
/// Prepares VNF and service profiling experiments described by a PED file.
#[derive(Parser, Debug)]
#[command(name = "son-profile")]
#[command(version, about, long_about = None)]
pub struct ProfileCli {
    /// PED file to be used for the profiling run.
    #[arg(short, long, value_name = "PED_FILE")]
    pub config: PathBuf,

    /// Increase logging level to debug.
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory for generated artifacts (defaults to a temporary directory).
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Skip the profiling package generation step.
    #[arg(long)]
    pub no_generation: bool,
}
