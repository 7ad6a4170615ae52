//! son-access - SONATA Service Platform access tool
//!
//! Authenticates users against a Service Platform and pushes or pulls
//! packages, services and functions to and from its catalogue.

use clap::Parser;

use son_cli::cli::commands::{
    handle_auth, handle_config, handle_list, handle_pull, handle_push, ConfigRequest,
};
use son_cli::cli::{pull_query, Cli, Commands};
use son_cli::client::AccessClient;
use son_cli::config::{load_config, settings::env, AccessConfig};
use son_cli::workspace::{PlatformUpdate, Workspace};
use son_cli::{AccessError, Result};

#[tokio::main]
async fn main() {
    // Parse CLI arguments; every usage error exits 1, help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            std::process::exit(code);
        }
    };

    son_cli::init_logging(env::ACCESS_LOG, cli.debug);

    // Run the command
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if e.requires_reauth() {
            eprintln!("{}", AccessError::REAUTH_HINT);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let root = config.workspace_root(cli.workspace)?;
    let mut workspace = Workspace::load(&root)?;
    let platform = cli.platform.as_deref();

    match cli.command {
        Commands::Auth { username, password } => {
            let client = connect(&workspace, platform, &config)?;
            handle_auth(&client, &username, &password).await
        }
        Commands::List { resource } => {
            let client = connect(&workspace, platform, &config)?;
            handle_list(&client, resource.into()).await
        }
        Commands::Push { package } => {
            let client = connect(&workspace, platform, &config)?;
            handle_push(&client, &package).await
        }
        Commands::Pull { resource, uuid, id } => {
            let query = pull_query(uuid, id).ok_or_else(|| {
                AccessError::Usage("Specify exactly one of --uuid or --id.".to_string())
            })?;
            let client = connect(&workspace, platform, &config)?;
            handle_pull(&client, resource.into(), &query).await
        }
        Commands::Config {
            platform,
            list,
            new,
            url,
            username,
            password,
            token,
            default,
        } => handle_config(
            &mut workspace,
            ConfigRequest {
                platform,
                list,
                new,
                update: PlatformUpdate {
                    url,
                    username,
                    password,
                    token,
                    default,
                },
            },
        ),
    }
}

fn connect(
    workspace: &Workspace,
    platform: Option<&str>,
    config: &AccessConfig,
) -> Result<AccessClient> {
    let client = AccessClient::new(workspace, platform, &config.api)?;
    tracing::debug!(
        "Using Service Platform '{}' at {}",
        client.platform_id(),
        client.base_url()
    );
    Ok(client)
}
