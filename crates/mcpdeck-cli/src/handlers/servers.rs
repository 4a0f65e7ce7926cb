//! Server management handlers.

use anyhow::{Result, bail};

use mcpdeck_core::domain::{NewServer, ServerBlob, ServerSpec, UpdateServer, Versioned};
use mcpdeck_core::ops::queries::active_of;

use crate::bootstrap::CliContext;
use crate::presentation::{format_time, print_separator, truncate_string};

/// Add a server, either from a raw blob or from command/args flags.
pub async fn add(
    ctx: &CliContext,
    name: &str,
    value: Option<String>,
    command: Option<String>,
    args: Vec<String>,
    description: Option<String>,
) -> Result<()> {
    let new = match (value, command) {
        (Some(value), _) => NewServer::new(name, value),
        (None, Some(command)) => {
            let mut spec = ServerSpec::new(command, args);
            if let Some(description) = description {
                spec = spec.with_description(description);
            }
            NewServer::from_spec(name, &spec)?
        }
        (None, None) => bail!("provide either --value or --command"),
    };

    let server = ctx.app().store().create_server(new).await?;
    println!("Added server '{}' ({})", server.name, server.id());
    Ok(())
}

/// List active servers.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let snapshot = ctx.app().store().snapshot().await;
    let servers: Vec<_> = active_of(&snapshot.servers).collect();

    if servers.is_empty() {
        println!("No servers defined.");
        println!("Use 'mcpdeck server add <name> --command <cmd>' to add one.");
        return Ok(());
    }

    println!("Found {} server(s):\n", servers.len());
    println!(
        "{:<24} {:<18} {:<3} {:<17} Command",
        "ID", "Name", "Ver", "Updated"
    );
    print_separator(90);

    for server in servers {
        let command = match server.blob() {
            ServerBlob::Parsed(spec) => spec.command,
            ServerBlob::Unparsed(_) => "<unparsable>".to_string(),
        };
        println!(
            "{:<24} {:<18} {:<3} {:<17} {}",
            server.id(),
            truncate_string(&server.name, 17),
            server.envelope.version,
            format_time(server.envelope.updated_at),
            command
        );
    }
    Ok(())
}

/// Update a server's name and/or value.
pub async fn update(
    ctx: &CliContext,
    id: &str,
    name: Option<String>,
    value: Option<String>,
) -> Result<()> {
    if name.is_none() && value.is_none() {
        bail!("nothing to update: pass --name and/or --value");
    }

    let server = ctx
        .app()
        .store()
        .update_server(id, UpdateServer { name, value })
        .await?;
    println!(
        "Updated server '{}' (version {})",
        server.name, server.envelope.version
    );
    Ok(())
}

/// Soft-delete a server.
pub async fn remove(ctx: &CliContext, id: &str) -> Result<()> {
    ctx.app().store().delete_server(id).await?;
    println!("Removed server {id}");
    Ok(())
}
