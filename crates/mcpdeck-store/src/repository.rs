//! JSON-file implementation of the store repository.
//!
//! The whole store lives in one `store.json` document. Saves go through
//! a temp file plus rename so readers never observe a half-written
//! document. Key values are base64-encoded on the way to disk — this is
//! encoding, NOT encryption; proper at-rest protection (OS keychain) is
//! a follow-up task.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, warn};

use mcpdeck_core::domain::Store;
use mcpdeck_core::ports::{RepositoryError, StoreRepository};

/// JSON-file store repository.
pub struct JsonStoreRepository {
    path: PathBuf,
}

impl JsonStoreRepository {
    /// Create a repository persisting to the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper functions
// ─────────────────────────────────────────────────────────────────────────────

/// Encode a key value to base64 for the on-disk document.
fn encode_key_value(value: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
}

/// Decode a base64-encoded key value.
fn decode_key_value(encoded: &str) -> Result<String, RepositoryError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| RepositoryError::Serialization(format!("Failed to decode key value: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|e| RepositoryError::Serialization(format!("Invalid UTF-8 in key value: {e}")))
}

/// Encode every key value for persistence.
fn encode_keys(store: &Store) -> Store {
    let mut encoded = store.clone();
    for key in encoded.keys.values_mut() {
        key.value = encode_key_value(&key.value);
    }
    encoded
}

/// Decode every key value after load. A value that fails to decode is
/// kept as-is so one bad entry cannot take the whole store down.
fn decode_keys(store: &mut Store) {
    for key in store.keys.values_mut() {
        match decode_key_value(&key.value) {
            Ok(value) => key.value = value,
            Err(error) => {
                warn!(key = %key.name, %error, "Keeping undecodable key value as-is");
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl StoreRepository for JsonStoreRepository {
    async fn load(&self) -> Result<Store, RepositoryError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No store document, starting fresh");
                return Ok(Store::with_defaults());
            }
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };

        match serde_json::from_str::<Store>(&raw) {
            Ok(mut store) => {
                decode_keys(&mut store);
                Ok(store)
            }
            Err(error) => {
                // A corrupt document must not prevent startup.
                warn!(path = %self.path.display(), %error, "Store document unreadable, starting fresh");
                Ok(Store::with_defaults())
            }
        }
    }

    async fn save(&self, store: &Store) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        }

        let encoded = encode_keys(store);
        let json = serde_json::to_string_pretty(&encoded)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        // Temp file + rename: the previous document stays intact until
        // the new one is fully on disk.
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json.as_bytes())
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }
}
