//! Join entities: category membership and key bindings.

use serde::{Deserialize, Serialize};

use super::envelope::{Envelope, Versioned};

/// Links one category to one server.
///
/// `order` drives presentation and merge order during materialization.
/// `is_enabled` excludes a relation from materialization without
/// detaching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryServerRelation {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub category_id: String,
    pub server_id: String,
    pub order: i64,
    pub is_enabled: bool,
}

impl CategoryServerRelation {
    pub fn new(category_id: impl Into<String>, server_id: impl Into<String>, order: i64) -> Self {
        Self {
            envelope: Envelope::stamp(),
            category_id: category_id.into(),
            server_id: server_id.into(),
            order,
            is_enabled: true,
        }
    }
}

impl Versioned for CategoryServerRelation {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

/// Links a server to a stored key, under the environment-variable name
/// the key's value should be injected as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerKeyRelation {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub server_id: String,
    pub key_id: String,
    /// Environment variable name (e.g. `SUPABASE_URL`).
    pub key_name: String,
}

impl ServerKeyRelation {
    pub fn new(
        server_id: impl Into<String>,
        key_id: impl Into<String>,
        key_name: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::stamp(),
            server_id: server_id.into(),
            key_id: key_id.into(),
            key_name: key_name.into(),
        }
    }
}

impl Versioned for ServerKeyRelation {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}
