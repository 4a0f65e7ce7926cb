//! Composition utilities for building `AppCore` with file backends.
//!
//! This module is focused purely on construction and contains no domain
//! logic.

use std::path::Path;
use std::sync::Arc;

use mcpdeck_core::ports::{CoreError, ProcessControl, StoreEventEmitter, StoreRepository};
use mcpdeck_core::services::{AppCore, StoreService};

use crate::config_io::FsConfigIo;
use crate::repository::JsonStoreRepository;

/// Factory for wiring the application with file-backed adapters.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a store repository persisting to the given document path.
    pub fn store_repository(store_path: &Path) -> Arc<JsonStoreRepository> {
        Arc::new(JsonStoreRepository::new(store_path))
    }

    /// Build a complete `AppCore` from a store path, process control
    /// implementation and event emitter.
    ///
    /// This is the recommended single-step way for adapters to obtain a
    /// fully composed core:
    ///
    /// ```ignore
    /// let store_path = setup_store()?;
    /// let core = CoreFactory::build_app_core(
    ///     &store_path,
    ///     Arc::new(ShellProcessControl::new()),
    ///     Arc::new(NoopStoreEvents::new()),
    /// ).await?;
    /// ```
    pub async fn build_app_core(
        store_path: &Path,
        process: Arc<dyn ProcessControl>,
        events: Arc<dyn StoreEventEmitter>,
    ) -> Result<AppCore, CoreError> {
        let repo: Arc<dyn StoreRepository> = Self::store_repository(store_path);
        let store = Arc::new(StoreService::init(repo, events).await?);
        Ok(AppCore::new(store, Arc::new(FsConfigIo::new()), process))
    }
}
