//! `AppCore` - the primary application facade.
//!
//! Adapters (CLI, tray, future GUI) receive an `AppCore` instance built
//! at their composition root and use it to access all functionality.

use std::sync::Arc;

use crate::ports::{ConfigIo, ProcessControl};

use super::{ActivationService, ImportService, StoreService};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(StoreService::init(repo, events).await?);
/// let core = AppCore::new(store, config_io, process);
///
/// let snapshot = core.store().snapshot().await;
/// core.activation().activate(&category_id, "claude", None).await?;
/// ```
pub struct AppCore {
    store: Arc<StoreService>,
    activation: ActivationService,
    import: ImportService,
}

impl AppCore {
    /// Wire the facade from an initialized store service and the
    /// infrastructure ports.
    pub fn new(
        store: Arc<StoreService>,
        config_io: Arc<dyn ConfigIo>,
        process: Arc<dyn ProcessControl>,
    ) -> Self {
        Self {
            activation: ActivationService::new(store.clone(), config_io, process),
            import: ImportService::new(store.clone()),
            store,
        }
    }

    /// Access the store service.
    pub fn store(&self) -> &StoreService {
        &self.store
    }

    /// Access the activation service.
    pub const fn activation(&self) -> &ActivationService {
        &self.activation
    }

    /// Access the import service.
    pub const fn import(&self) -> &ImportService {
        &self.import
    }
}
