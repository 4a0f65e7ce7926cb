//! Stored credential values referenced by server-key relations.

use serde::{Deserialize, Serialize};

use super::envelope::{Envelope, Versioned};

/// A named secret value.
///
/// In memory the value is plaintext. The persistence layer base64-encodes
/// it in the on-disk document — encoding, not encryption; at-rest
/// protection (OS keychain) is a follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretKey {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub name: String,
    pub value: String,
}

impl Versioned for SecretKey {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

/// A key to be inserted into the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewKey {
    pub name: String,
    pub value: String,
}

impl NewKey {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
