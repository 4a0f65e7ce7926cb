//! The store aggregate: one document holding every entity map.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::key::SecretKey;
use super::relation::{CategoryServerRelation, ServerKeyRelation};
use super::server::Server;
use super::target::{
    CLAUDE_DEFAULT_CONFIG_PATH, CLAUDE_TARGET_ID, CURSOR_DEFAULT_CONFIG_PATH, CURSOR_TARGET_ID,
    ConfigTarget,
};

/// Document schema version written into `metadata.version`.
pub const STORE_SCHEMA_VERSION: &str = "1.0.0";

/// Store-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMetadata {
    pub version: String,
    pub last_updated: DateTime<Utc>,
}

impl StoreMetadata {
    /// Record that some mutation was accepted.
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

impl Default for StoreMetadata {
    fn default() -> Self {
        Self {
            version: STORE_SCHEMA_VERSION.to_string(),
            last_updated: Utc::now(),
        }
    }
}

/// The aggregate root. One whole document per read-modify-write cycle:
/// mutations never patch fields in place on disk.
///
/// All maps are keyed by entity id. `BTreeMap` keeps iteration (and the
/// persisted document) deterministic; ids begin with a millisecond
/// timestamp, so id order is effectively insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default)]
    pub servers: BTreeMap<String, Server>,
    #[serde(default)]
    pub categories: BTreeMap<String, Category>,
    #[serde(default)]
    pub config_targets: BTreeMap<String, ConfigTarget>,
    #[serde(default)]
    pub category_server_relations: BTreeMap<String, CategoryServerRelation>,
    #[serde(default)]
    pub server_key_relations: BTreeMap<String, ServerKeyRelation>,
    #[serde(default)]
    pub keys: BTreeMap<String, SecretKey>,
    /// Active category per target id. `None` (or a dangling id) means
    /// "no active category" — consumers must not error on either.
    #[serde(default)]
    pub active_categories: BTreeMap<String, Option<String>>,
    /// Last target filter chosen in the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_target: Option<String>,
    /// Legacy per-target path overrides, carried for document
    /// compatibility. Target resolution uses `config_targets`.
    #[serde(default)]
    pub config_paths: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: StoreMetadata,
}

impl Store {
    /// A fresh store pre-seeded with the two built-in config targets.
    pub fn with_defaults() -> Self {
        let claude = ConfigTarget::built_in(CLAUDE_TARGET_ID, "Claude Desktop", CLAUDE_DEFAULT_CONFIG_PATH);
        let cursor = ConfigTarget::built_in(CURSOR_TARGET_ID, "Cursor", CURSOR_DEFAULT_CONFIG_PATH);

        let mut config_targets = BTreeMap::new();
        config_targets.insert(claude.envelope.id.clone(), claude);
        config_targets.insert(cursor.envelope.id.clone(), cursor);

        Self {
            config_targets,
            ..Self::default()
        }
    }
}
