//! Canonical store-change events.
//!
//! Emitted by the store service after each committed mutation so UIs and
//! tray-style projections can refresh without polling.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "category_activated", "target": "claude", "categoryId": "1712..." }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{Category, ConfigTarget, Server, Versioned};

/// Lightweight server representation for event payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSummary {
    pub id: String,
    pub name: String,
}

impl ServerSummary {
    pub fn of(server: &Server) -> Self {
        Self {
            id: server.id().to_string(),
            name: server.name.clone(),
        }
    }
}

/// Lightweight category representation for event payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub target: String,
}

impl CategorySummary {
    pub fn of(category: &Category) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name.clone(),
            target: category.target.as_str().to_string(),
        }
    }
}

/// Lightweight config-target representation for event payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSummary {
    pub id: String,
    pub name: String,
}

impl TargetSummary {
    pub fn of(target: &ConfigTarget) -> Self {
        Self {
            id: target.id().to_string(),
            name: target.name.clone(),
        }
    }
}

/// Store-change events for all adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    ServerCreated {
        server: ServerSummary,
    },
    ServerUpdated {
        server: ServerSummary,
    },
    ServerDeleted {
        #[serde(rename = "serverId")]
        server_id: String,
    },
    CategoryCreated {
        category: CategorySummary,
    },
    CategoryUpdated {
        category: CategorySummary,
    },
    CategoryDeleted {
        #[serde(rename = "categoryId")]
        category_id: String,
    },
    TargetCreated {
        target: TargetSummary,
    },
    TargetUpdated {
        target: TargetSummary,
    },
    TargetDeleted {
        #[serde(rename = "targetId")]
        target_id: String,
    },
    /// The active category for a target changed (or was cleared).
    CategoryActivated {
        target: String,
        #[serde(rename = "categoryId")]
        category_id: Option<String>,
    },
    /// The whole store was replaced with a fresh default document.
    StoreReset,
}
