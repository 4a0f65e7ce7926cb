//! Activation, preview and import handlers.

use std::io::Read;

use anyhow::{Context, Result, bail};

use mcpdeck_core::domain::CLAUDE_TARGET_ID;
use mcpdeck_core::services::{ImportRequest, RestartOutcome, RestartSpec};

use crate::bootstrap::CliContext;

use super::{parse_icon, parse_scope};

/// Build the restart spec from the CLI flags, defaulting the process
/// name for the built-in claude target.
fn restart_spec(
    target: &str,
    process_name: Option<String>,
    app_path: Option<String>,
) -> Result<RestartSpec> {
    let process_name = match process_name {
        Some(name) => name,
        None if target == CLAUDE_TARGET_ID => "claude.exe".to_string(),
        None => bail!("--restart needs --process-name for target '{target}'"),
    };
    let app_path = app_path.context("--restart needs --app-path")?;
    Ok(RestartSpec::new(process_name, app_path))
}

/// Activate a category for a target.
pub async fn activate(
    ctx: &CliContext,
    category_id: &str,
    target: &str,
    restart: bool,
    process_name: Option<String>,
    app_path: Option<String>,
) -> Result<()> {
    let spec = if restart {
        Some(restart_spec(target, process_name, app_path)?)
    } else {
        None
    };

    let outcome = ctx
        .app()
        .activation()
        .activate(category_id, target, spec.as_ref())
        .await?;

    println!(
        "Activated category {category_id} for '{target}': {} server(s) written to {}",
        outcome.server_count, outcome.path
    );

    match outcome.restart {
        None => {}
        Some(RestartOutcome::NotRunning) => {
            println!("Tool was not running; no restart needed.");
        }
        Some(RestartOutcome::Restarted { pid }) => match pid {
            Some(pid) => println!("Tool restarted (pid {pid})."),
            None => println!("Tool restarted."),
        },
        Some(RestartOutcome::Failed { reason }) => {
            // The switch itself already succeeded.
            println!("Warning: restart failed: {reason}");
        }
    }
    Ok(())
}

/// Print the materialized document without writing it.
pub async fn preview(ctx: &CliContext, category_id: &str, target: &str) -> Result<()> {
    let (path, content) = ctx.app().activation().preview(category_id, target).await?;
    println!("Would write to {path}:\n");
    print!("{content}");
    Ok(())
}

/// Import a category from a config document (file or stdin).
pub async fn import(
    ctx: &CliContext,
    category_name: &str,
    file: Option<String>,
    target: &str,
    icon: &str,
    description: String,
) -> Result<()> {
    let config_text = match file {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading config document from stdin")?;
            text
        }
    };

    let report = ctx
        .app()
        .import()
        .import_category(ImportRequest {
            category_name: category_name.to_string(),
            description,
            icon: parse_icon(icon)?,
            target: parse_scope(target),
            config_text,
        })
        .await?;

    println!(
        "Imported category '{}' ({}): {} server(s) created, {} reused",
        report.category.name,
        report.category.envelope.id,
        report.created_servers.len(),
        report.reused_servers.len()
    );
    for name in &report.created_servers {
        println!("  + {name}");
    }
    for name in &report.reused_servers {
        println!("  = {name} (existing)");
    }
    Ok(())
}
