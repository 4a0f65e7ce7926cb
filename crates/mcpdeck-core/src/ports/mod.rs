//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No filesystem or process implementation details in signatures
//! - Repository traits stay whole-document: load and save, nothing else
//! - Intent-based methods for process control (find/kill/launch)

pub mod config_io;
pub mod event_emitter;
pub mod process_control;
pub mod store_repository;

use thiserror::Error;

pub use config_io::ConfigIo;
pub use event_emitter::{NoopStoreEvents, StoreEventEmitter};
pub use process_control::{NoopProcessControl, ProcessControl};
pub use store_repository::StoreRepository;

use crate::materialize::MaterializeError;
use crate::ops::StoreError;
use crate::paths::PathError;

/// Domain-facing errors for persistence operations.
///
/// Abstracts away storage implementation details (filesystem, encoding)
/// so services handle failures uniformly.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Domain-facing errors for process control operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Process lookup failed.
    #[error("Process lookup failed: {0}")]
    QueryFailed(String),

    /// Failed to kill the process.
    #[error("Failed to kill process: {0}")]
    KillFailed(String),

    /// Failed to launch the application.
    #[error("Failed to launch: {0}")]
    LaunchFailed(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own surfaces (CLI exit codes, UI toasts).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Persistence operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Store mutation rejected.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Materialization precondition or write failed.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    /// Process operation failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Path resolution failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
