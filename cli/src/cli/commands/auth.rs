//! Authentication command handler.

use crate::client::{AccessClient, PullOperations, PushOperations};
use crate::error::Result;

/// Handle the `son-access auth` command.
pub async fn handle_auth<P, U>(
    client: &AccessClient<P, U>,
    username: &str,
    password: &str,
) -> Result<()>
where
    P: PullOperations,
    U: PushOperations,
{
    println!(
        "Authenticating '{username}' against Service Platform '{}' ({})...",
        client.platform_id(),
        client.base_url()
    );

    let token = client.client_login(username, password).await?;
    tracing::debug!("Received token {token:?}");

    println!("Authentication is successful.");
    Ok(())
}
