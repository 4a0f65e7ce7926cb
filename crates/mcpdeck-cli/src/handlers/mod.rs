//! Command handlers that delegate to AppCore.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that parse CLI-specific input, call AppCore methods
//!   and format output for the terminal
//!
//! Handlers do NOT access repositories directly or contain business
//! logic.

pub mod activation;
pub mod categories;
pub mod keys;
pub mod servers;
pub mod status;
pub mod targets;

use anyhow::{Result, bail};
use mcpdeck_core::domain::{CategoryIcon, TargetScope};

/// Parse an icon name strictly, listing the closed set on failure.
pub(crate) fn parse_icon(name: &str) -> Result<CategoryIcon> {
    match CategoryIcon::from_name(name) {
        Some(icon) => Ok(icon),
        None => bail!("unknown icon {name:?} (expected Code, Database, Globe, Layers or Settings)"),
    }
}

/// Parse a target scope argument ("all" or a target id).
pub(crate) fn parse_scope(raw: &str) -> TargetScope {
    TargetScope::from(raw.to_string())
}
