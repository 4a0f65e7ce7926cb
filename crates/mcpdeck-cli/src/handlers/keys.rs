//! Key management handlers.
//!
//! Key values are never printed back.

use anyhow::Result;

use mcpdeck_core::domain::{NewKey, Versioned};
use mcpdeck_core::ops::queries::active_of;

use crate::bootstrap::CliContext;
use crate::presentation::{format_time, print_separator};

/// Add a key.
pub async fn add(ctx: &CliContext, name: &str, value: &str) -> Result<()> {
    let key = ctx.app().store().create_key(NewKey::new(name, value)).await?;
    println!("Added key '{}' ({})", key.name, key.id());
    Ok(())
}

/// List active keys.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let snapshot = ctx.app().store().snapshot().await;
    let keys: Vec<_> = active_of(&snapshot.keys).collect();

    if keys.is_empty() {
        println!("No keys stored.");
        return Ok(());
    }

    println!("Found {} key(s):\n", keys.len());
    println!("{:<24} {:<20} Added", "ID", "Name");
    print_separator(64);
    for key in keys {
        println!(
            "{:<24} {:<20} {}",
            key.id(),
            key.name,
            format_time(key.envelope.created_at)
        );
    }
    Ok(())
}

/// Soft-delete a key.
pub async fn remove(ctx: &CliContext, id: &str) -> Result<()> {
    ctx.app().store().delete_key(id).await?;
    println!("Removed key {id}");
    Ok(())
}

/// Bind a key to a server as an environment variable.
pub async fn bind(ctx: &CliContext, server_id: &str, key_id: &str, env_name: &str) -> Result<()> {
    ctx.app().store().bind_key(server_id, key_id, env_name).await?;
    println!("Bound key {key_id} to server {server_id} as {env_name}");
    Ok(())
}
