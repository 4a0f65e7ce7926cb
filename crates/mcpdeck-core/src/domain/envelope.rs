//! Shared entity envelope: identity, versioning and soft deletion.
//!
//! Every entity in the store carries the same envelope fields. Mutations
//! never remove an entity; they bump `version` and, for deletion, flip the
//! soft-delete flag so historical relations stay addressable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a collision-resistant entity id.
///
/// Millisecond timestamp followed by a short random suffix. Unique within
/// one store document; generated client-side, never by the persistence
/// layer.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    format!("{millis}{}", &random[..9])
}

/// Common fields shared by all store entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Opaque unique id within the store.
    pub id: String,
    /// Strictly increasing mutation counter, starting at 1.
    pub version: u32,
    /// Soft-delete flag. Document key kept as `delYn` for compatibility
    /// with stores written by earlier releases.
    #[serde(rename = "delYn")]
    pub deleted: bool,
    /// When the entity was created.
    pub created_at: DateTime<Utc>,
    /// When the entity was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Envelope {
    /// Stamp a fresh envelope with a generated id.
    pub fn stamp() -> Self {
        Self::with_id(generate_id())
    }

    /// Stamp a fresh envelope with a fixed id (built-in entities).
    pub fn with_id(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            version: 1,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record one accepted mutation.
    pub fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Mark the entity logically deleted. Counts as a mutation.
    pub fn retire(&mut self) {
        self.deleted = true;
        self.touch();
    }
}

/// Uniform access to the envelope, so operations can stay generic over
/// entity kinds where that helps.
pub trait Versioned {
    fn envelope(&self) -> &Envelope;
    fn envelope_mut(&mut self) -> &mut Envelope;

    fn id(&self) -> &str {
        &self.envelope().id
    }

    fn is_deleted(&self) -> bool {
        self.envelope().deleted
    }

    fn is_active(&self) -> bool {
        !self.envelope().deleted
    }
}

/// Entity kinds, used for error reporting and event payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Server,
    Category,
    ConfigTarget,
    CategoryServerRelation,
    ServerKeyRelation,
    Key,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Server => "server",
            Self::Category => "category",
            Self::ConfigTarget => "config target",
            Self::CategoryServerRelation => "category-server relation",
            Self::ServerKeyRelation => "server-key relation",
            Self::Key => "key",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_starts_at_version_one() {
        let envelope = Envelope::stamp();
        assert_eq!(envelope.version, 1);
        assert!(!envelope.deleted);
        assert_eq!(envelope.created_at, envelope.updated_at);
    }

    #[test]
    fn test_touch_bumps_version() {
        let mut envelope = Envelope::with_id("fixed");
        envelope.touch();
        envelope.touch();
        assert_eq!(envelope.version, 3);
        assert!(envelope.updated_at >= envelope.created_at);
    }

    #[test]
    fn test_retire_sets_deleted_and_bumps() {
        let mut envelope = Envelope::stamp();
        envelope.retire();
        assert!(envelope.deleted);
        assert_eq!(envelope.version, 2);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: std::collections::BTreeSet<String> = (0..100).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_envelope_serializes_del_yn() {
        let envelope = Envelope::with_id("e1");
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"delYn\":false"));
        assert!(json.contains("\"createdAt\""));
    }
}
