//! Category management handlers.

use anyhow::Result;

use mcpdeck_core::domain::{NewCategory, TargetScope, UpdateCategory, Versioned};
use mcpdeck_core::ops::queries::{categories_for_target, category_servers};

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

use super::{parse_icon, parse_scope};

/// Create a category.
pub async fn create(
    ctx: &CliContext,
    name: &str,
    description: String,
    icon: &str,
    target: &str,
) -> Result<()> {
    let new = NewCategory::new(name)
        .with_description(description)
        .with_icon(parse_icon(icon)?)
        .with_target(parse_scope(target));

    let category = ctx.app().store().create_category(new).await?;
    println!("Created category '{}' ({})", category.name, category.id());
    Ok(())
}

/// List active categories under a target filter. With no explicit
/// filter, the store's selected target applies.
pub async fn list(ctx: &CliContext, target: Option<String>) -> Result<()> {
    let snapshot = ctx.app().store().snapshot().await;
    let filter = match target.or_else(|| snapshot.selected_target.clone()) {
        Some(raw) => parse_scope(&raw),
        None => TargetScope::All,
    };

    let categories = categories_for_target(&snapshot, &filter);
    if categories.is_empty() {
        println!("No categories for target '{filter}'.");
        return Ok(());
    }

    println!("Found {} categor(ies) for '{filter}':\n", categories.len());
    println!(
        "{:<24} {:<20} {:<10} {:<8} {:<8} Description",
        "ID", "Name", "Icon", "Target", "Servers"
    );
    print_separator(100);

    for category in categories {
        let servers = category_servers(&snapshot, category.id()).len();
        println!(
            "{:<24} {:<20} {:<10} {:<8} {:<8} {}",
            category.id(),
            truncate_string(&category.name, 19),
            category.icon,
            truncate_string(category.target.as_str(), 7),
            servers,
            truncate_string(&category.description, 40)
        );
    }
    Ok(())
}

/// Update a category.
pub async fn update(
    ctx: &CliContext,
    id: &str,
    name: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    target: Option<String>,
) -> Result<()> {
    let updates = UpdateCategory {
        name,
        description,
        icon: icon.as_deref().map(parse_icon).transpose()?,
        target: target.as_deref().map(parse_scope),
        is_active: None,
    };

    let category = ctx.app().store().update_category(id, updates).await?;
    println!(
        "Updated category '{}' (version {})",
        category.name, category.envelope.version
    );
    Ok(())
}

/// Soft-delete a category.
pub async fn remove(ctx: &CliContext, id: &str) -> Result<()> {
    ctx.app().store().delete_category(id).await?;
    println!("Removed category {id}");
    Ok(())
}

/// List a category's servers in materialization order.
pub async fn servers(ctx: &CliContext, id: &str) -> Result<()> {
    let snapshot = ctx.app().store().snapshot().await;
    let servers = category_servers(&snapshot, id);

    if servers.is_empty() {
        println!("Category has no enabled servers.");
        return Ok(());
    }

    println!("{} server(s), in merge order:\n", servers.len());
    for (position, server) in servers.iter().enumerate() {
        println!("{:>3}. {} ({})", position + 1, server.name, server.id());
    }
    Ok(())
}

/// Attach a server to a category.
pub async fn attach(
    ctx: &CliContext,
    category_id: &str,
    server_id: &str,
    order: i64,
) -> Result<()> {
    ctx.app()
        .store()
        .attach_server(category_id, server_id, order)
        .await?;
    println!("Attached server {server_id} to category {category_id} (order {order})");
    Ok(())
}

/// Detach a server from a category.
pub async fn detach(ctx: &CliContext, category_id: &str, server_id: &str) -> Result<()> {
    ctx.app()
        .store()
        .detach_server(category_id, server_id)
        .await?;
    println!("Detached server {server_id} from category {category_id}");

    // Point out when the pair is still attached through a duplicate
    // relation.
    let snapshot = ctx.app().store().snapshot().await;
    let remaining = category_servers(&snapshot, category_id)
        .iter()
        .filter(|server| server.id() == server_id)
        .count();
    if remaining > 0 {
        println!("Note: {remaining} more relation(s) for this pair remain attached.");
    }
    Ok(())
}
