//! Process control trait definition.
//!
//! Consumed only by the optional restart hook after a successful
//! category activation. Failures here are reported as warnings and never
//! fail the activation itself.

use std::path::Path;

use async_trait::async_trait;

use super::ProcessError;

/// OS process control for the external desktop tools.
///
/// # Design Rules
///
/// - Express **intent**, not implementation detail
/// - Implementations must not block on launched children: launches are
///   detached, fire-and-forget
#[async_trait]
pub trait ProcessControl: Send + Sync {
    /// Whether a process with the given image name is currently running.
    async fn find(&self, process_name: &str) -> Result<bool, ProcessError>;

    /// Kill all processes with the given image name.
    async fn kill(&self, process_name: &str) -> Result<(), ProcessError>;

    /// Launch an application detached. Returns the child pid when the
    /// platform reports one.
    async fn launch(&self, path: &Path, args: &[String]) -> Result<Option<u32>, ProcessError>;
}

/// A process control that sees no processes and launches nothing.
///
/// For tests and contexts where the restart side effect is unavailable.
#[derive(Debug, Clone, Default)]
pub struct NoopProcessControl;

impl NoopProcessControl {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessControl for NoopProcessControl {
    async fn find(&self, _process_name: &str) -> Result<bool, ProcessError> {
        Ok(false)
    }

    async fn kill(&self, _process_name: &str) -> Result<(), ProcessError> {
        Ok(())
    }

    async fn launch(&self, _path: &Path, _args: &[String]) -> Result<Option<u32>, ProcessError> {
        Ok(None)
    }
}
