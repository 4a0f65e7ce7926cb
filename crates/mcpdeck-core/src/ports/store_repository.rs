//! Store repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::Store;

/// Whole-document persistence for the store.
///
/// The store is the unit of persistence: every mutation loads or holds
/// the whole document and saves the whole document back. There is no
/// field-level access and no partial write.
///
/// # Design Rules
///
/// - `load` never fails on an absent document: it returns a fresh
///   default store instead
/// - A corrupt document is also a default store (logged), never a
///   refusal to start
/// - `save` replaces the prior document atomically from the caller's
///   point of view
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Load the persisted store, or a default store when none exists.
    async fn load(&self) -> Result<Store, RepositoryError>;

    /// Persist the entire document, replacing any prior version.
    async fn save(&self, store: &Store) -> Result<(), RepositoryError>;
}
