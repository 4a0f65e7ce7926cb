//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and the pure
//! store operations. They are the only place that holds mutable state:
//! one `StoreService` owns the current store document.

mod activation;
mod app_core;
mod import;
mod store_service;

pub use activation::{
    ActivationOutcome, ActivationService, RESTART_SETTLE_DELAY, RestartOutcome, RestartSpec,
};
pub use app_core::AppCore;
pub use import::{ImportReport, ImportRequest, ImportService};
pub use store_service::{AttachmentChange, BatchOutcome, BatchReport, StoreService};
