//! Core domain, store operations and port definitions for mcpdeck.
//!
//! mcpdeck maintains named collections ("categories") of MCP server
//! definitions and switches which collection is active for external
//! tools by writing each tool's JSON config file. This crate holds the
//! pure center of that system: the entity model with its uniform
//! versioning and soft-delete discipline, the mutation and query
//! operations over the store document, the config materializer, and the
//! trait ports infrastructure adapters implement.

pub mod domain;
pub mod events;
pub mod materialize;
pub mod ops;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    CLAUDE_TARGET_ID, CURSOR_TARGET_ID, Category, CategoryIcon, CategoryServerRelation,
    ConfigTarget, EntityKind, Envelope, NewCategory, NewConfigTarget, NewKey, NewServer,
    SecretKey, Server, ServerBlob, ServerKeyRelation, ServerSpec, Store, StoreMetadata,
    TargetScope, UpdateCategory, UpdateConfigTarget, UpdateServer, Versioned,
};
pub use events::{CategorySummary, ServerSummary, StoreEvent, TargetSummary};
pub use materialize::MaterializeError;
pub use ops::StoreError;
pub use paths::{PathError, data_root, ensure_directory, expand_placeholders, store_path};
pub use ports::{
    ConfigIo, CoreError, NoopProcessControl, NoopStoreEvents, ProcessControl, ProcessError,
    RepositoryError, StoreEventEmitter, StoreRepository,
};
pub use services::{
    ActivationOutcome, ActivationService, AppCore, AttachmentChange, BatchReport, ImportReport,
    ImportRequest, ImportService, RestartOutcome, RestartSpec, StoreService,
};
