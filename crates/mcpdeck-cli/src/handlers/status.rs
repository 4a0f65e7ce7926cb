//! Status, target selection and store reset handlers.

use std::io::Write;

use anyhow::Result;

use mcpdeck_core::domain::{TargetScope, Versioned};
use mcpdeck_core::ops::queries::{active_of, categories_for_target, category_servers};

use crate::bootstrap::CliContext;
use crate::presentation::format_time;

/// Show every target with its categories and active selection — the
/// same projection a tray menu renders.
pub async fn status(ctx: &CliContext) -> Result<()> {
    let snapshot = ctx.app().store().snapshot().await;

    println!("Store: {}", ctx.store_path.display());
    println!(
        "Last updated: {}",
        format_time(snapshot.metadata.last_updated)
    );
    if let Some(selected) = &snapshot.selected_target {
        println!("Selected target: {selected}");
    }
    println!();

    for target in active_of(&snapshot.config_targets) {
        let active_id = snapshot
            .active_categories
            .get(target.id())
            .and_then(Option::as_deref);

        println!("{} ({})", target.name, target.id());
        println!("  path: {}", target.config_path);

        let scope = TargetScope::Target(target.id().to_string());
        let categories = categories_for_target(&snapshot, &scope);
        if categories.is_empty() {
            println!("  (no categories)");
        }
        for category in categories {
            let marker = if Some(category.id()) == active_id {
                "*"
            } else {
                " "
            };
            let servers = category_servers(&snapshot, category.id()).len();
            println!(
                "  {marker} {} ({} server(s), scope {})",
                category.name,
                servers,
                category.target.as_str()
            );
        }
        println!();
    }
    Ok(())
}

/// Persist the default target filter.
pub async fn select(ctx: &CliContext, target: &str) -> Result<()> {
    let value = if target == "all" {
        None
    } else {
        Some(target.to_string())
    };
    ctx.app().store().set_selected_target(value).await?;
    println!("Selected target set to '{target}'");
    Ok(())
}

/// Replace the store with a fresh default document.
pub async fn reset(ctx: &CliContext, yes: bool) -> Result<()> {
    if !yes {
        print!("This deletes every server, category and key. Continue? [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.app().store().reset().await?;
    println!("Store reset to defaults.");
    Ok(())
}
