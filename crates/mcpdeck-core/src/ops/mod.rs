//! Pure operations over a store snapshot.
//!
//! Mutations take the current store by reference and return a new store
//! (plus the affected entity) — the caller's snapshot is untouched on
//! error. Queries are total projections that never fail.

pub mod mutations;
pub mod queries;

use thiserror::Error;

use crate::domain::EntityKind;

/// Errors produced by store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or empty. Surfaced verbatim, never
    /// retried.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The referenced entity is absent (or no longer active, for
    /// operations that require an active entity).
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Attempted mutation of a built-in config target.
    #[error("Built-in config target cannot be modified: {0}")]
    Immutable(String),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub use mutations::{
    attach_key_to_server, attach_server_to_category, create_category, create_config_target,
    create_key, create_server, detach_key_from_server, detach_server_from_category,
    set_active_category, set_selected_target, soft_delete_category, soft_delete_config_target,
    soft_delete_key, soft_delete_server, update_category, update_config_target, update_relation,
    update_server,
};
pub use queries::{
    active_category_for, active_of, categories_for_target, category_servers, server_env_for,
};
