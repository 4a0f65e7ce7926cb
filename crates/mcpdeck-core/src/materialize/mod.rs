//! Config materialization: relational store data to the external tool's
//! denormalized JSON document.
//!
//! The pipeline runs Validating → Assembling → Writing. Validation and
//! document assembly live here as pure functions; the write itself goes
//! through the `ConfigIo` port and is orchestrated by the activation
//! service.

pub mod document;

use thiserror::Error;

use crate::domain::{Category, Store, Versioned};
use crate::paths::expand_placeholders;

pub use document::{assemble, render};

/// Errors on the Validating and Writing exits of the pipeline.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The category is missing or soft-deleted.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// The target is unknown, deleted, or has an empty config path.
    #[error("No config path is configured for target: {0}")]
    TargetPathNotConfigured(String),

    /// The external config file could not be written. The store is left
    /// unmodified when this happens.
    #[error("Failed to write config to {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Resolve the category to materialize.
pub fn require_category<'a>(
    store: &'a Store,
    category_id: &str,
) -> Result<&'a Category, MaterializeError> {
    store
        .categories
        .get(category_id)
        .filter(|category| category.is_active())
        .ok_or_else(|| MaterializeError::CategoryNotFound(category_id.to_string()))
}

/// Resolve and expand the destination path for a target.
///
/// Environment placeholders are expanded at this moment, not when the
/// path was saved; unresolvable tokens expand to the empty string.
pub fn resolve_output_path(store: &Store, target_id: &str) -> Result<String, MaterializeError> {
    let target = store
        .config_targets
        .get(target_id)
        .filter(|target| target.is_active())
        .ok_or_else(|| MaterializeError::TargetPathNotConfigured(target_id.to_string()))?;

    if target.config_path.trim().is_empty() {
        return Err(MaterializeError::TargetPathNotConfigured(
            target_id.to_string(),
        ));
    }

    Ok(expand_placeholders(&target.config_path))
}
