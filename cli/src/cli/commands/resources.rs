//! Catalogue command handlers: `list`, `pull` and `push`.

use std::path::Path;

use serde_json::Value;

use crate::client::{AccessClient, PullOperations, PushOperations, ResourceQuery, ResourceType};
use crate::error::Result;

/// Handle the `son-access list` command.
pub async fn handle_list<P, U>(client: &AccessClient<P, U>, resource: ResourceType) -> Result<()>
where
    P: PullOperations,
    U: PushOperations,
{
    let result = client.pull_resource(resource, &ResourceQuery::All).await?;

    if result.as_array().is_some_and(Vec::is_empty) {
        println!("No {resource} found on Service Platform '{}'.", client.platform_id());
        return Ok(());
    }

    print_json(&result)
}

/// Handle the `son-access pull` command.
pub async fn handle_pull<P, U>(
    client: &AccessClient<P, U>,
    resource: ResourceType,
    query: &ResourceQuery,
) -> Result<()>
where
    P: PullOperations,
    U: PushOperations,
{
    let result = client.pull_resource(resource, query).await?;
    print_json(&result)
}

/// Handle the `son-access push` command.
pub async fn handle_push<P, U>(client: &AccessClient<P, U>, package: &Path) -> Result<()>
where
    P: PullOperations,
    U: PushOperations,
{
    println!(
        "Pushing '{}' to Service Platform '{}'...",
        package.display(),
        client.platform_id()
    );

    let result = client.push_package(package).await?;
    print_json(&result)
}

fn print_json(value: &Value) -> Result<()> {
    match value {
        Value::String(text) => println!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}
