//! Event emitter trait for store-change broadcasting.
//!
//! Implementations handle transport details (channels, IPC, logging).

use crate::events::StoreEvent;

/// Trait for emitting store events.
///
/// # Implementations
///
/// - [`NoopStoreEvents`] - for tests and one-shot CLI invocations
/// - Adapter-specific implementations (IPC bridges, tray refreshers)
pub trait StoreEventEmitter: Send + Sync {
    /// Emit a store event. Must not block.
    fn emit(&self, event: StoreEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn StoreEventEmitter>;
}

/// A no-op event emitter that discards everything.
#[derive(Debug, Clone, Default)]
pub struct NoopStoreEvents;

impl NoopStoreEvents {
    pub const fn new() -> Self {
        Self
    }
}

impl StoreEventEmitter for NoopStoreEvents {
    fn emit(&self, _event: StoreEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn StoreEventEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_noop_emitter_accepts_events() {
        let emitter: Arc<dyn StoreEventEmitter> = Arc::new(NoopStoreEvents::new());
        emitter.emit(StoreEvent::StoreReset);
        let _boxed = emitter.clone_box();
    }
}
