//! File-backed persistence adapters for mcpdeck.
//!
//! Implements the core's `StoreRepository` port as one whole JSON
//! document on disk, and the `ConfigIo` port as plain filesystem text
//! I/O for the materialized external config files.

pub mod config_io;
pub mod factory;
pub mod repository;
pub mod setup;

// Re-export for convenient access
pub use config_io::FsConfigIo;
pub use factory::CoreFactory;
pub use repository::JsonStoreRepository;
pub use setup::setup_store;
