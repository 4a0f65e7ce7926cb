//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (persistence, filesystem, processes).
//!
//! # Structure
//!
//! - `envelope` - Shared entity envelope (id, version, soft delete)
//! - `server` - MCP server definitions and the parsed blob forms
//! - `category` - Categories, icons and target scopes
//! - `target` - Config targets and the built-in seeds
//! - `relation` - Category-server and server-key join entities
//! - `key` - Stored credential values
//! - `store` - The aggregate document

pub mod category;
pub mod envelope;
pub mod key;
pub mod relation;
pub mod server;
pub mod store;
pub mod target;

// Re-export the commonly used types at the domain level for convenience
pub use category::{Category, CategoryIcon, NewCategory, TargetScope, UpdateCategory};
pub use envelope::{EntityKind, Envelope, Versioned, generate_id};
pub use key::{NewKey, SecretKey};
pub use relation::{CategoryServerRelation, ServerKeyRelation};
pub use server::{NewServer, Server, ServerBlob, ServerSpec, UpdateServer};
pub use store::{STORE_SCHEMA_VERSION, Store, StoreMetadata};
pub use target::{
    CLAUDE_DEFAULT_CONFIG_PATH, CLAUDE_TARGET_ID, CURSOR_DEFAULT_CONFIG_PATH, CURSOR_TARGET_ID,
    ConfigTarget, NewConfigTarget, UpdateConfigTarget,
};
