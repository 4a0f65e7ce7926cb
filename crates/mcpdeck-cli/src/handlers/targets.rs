//! Config target management handlers.

use anyhow::Result;

use mcpdeck_core::domain::{NewConfigTarget, UpdateConfigTarget, Versioned};
use mcpdeck_core::ops::queries::{active_category_for, active_of};

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

/// Add a config target.
pub async fn add(ctx: &CliContext, name: &str, config_path: &str) -> Result<()> {
    let target = ctx
        .app()
        .store()
        .create_target(NewConfigTarget::new(name, config_path))
        .await?;
    println!("Added target '{}' ({})", target.name, target.id());
    Ok(())
}

/// List active targets with their active categories.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let snapshot = ctx.app().store().snapshot().await;
    let targets: Vec<_> = active_of(&snapshot.config_targets).collect();

    println!("Found {} target(s):\n", targets.len());
    println!(
        "{:<24} {:<16} {:<9} {:<20} Config path",
        "ID", "Name", "Built-in", "Active category"
    );
    print_separator(110);

    for target in targets {
        let active = active_category_for(&snapshot, target.id())
            .map_or_else(|| "-".to_string(), |category| category.name.clone());
        println!(
            "{:<24} {:<16} {:<9} {:<20} {}",
            target.id(),
            truncate_string(&target.name, 15),
            if target.is_built_in { "yes" } else { "no" },
            truncate_string(&active, 19),
            target.config_path
        );
    }
    Ok(())
}

/// Update a target. Built-in targets reject this.
pub async fn update(
    ctx: &CliContext,
    id: &str,
    name: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let target = ctx
        .app()
        .store()
        .update_target(id, UpdateConfigTarget { name, config_path })
        .await?;
    println!(
        "Updated target '{}' (version {})",
        target.name, target.envelope.version
    );
    Ok(())
}

/// Soft-delete a target. Built-in targets reject this.
pub async fn remove(ctx: &CliContext, id: &str) -> Result<()> {
    ctx.app().store().delete_target(id).await?;
    println!("Removed target {id}");
    Ok(())
}
