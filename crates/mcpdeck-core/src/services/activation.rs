//! Activation service: the materialization pipeline plus the optional
//! restart side effect.
//!
//! Sequencing matters: the external config file is written first, and
//! only then is the activation committed to the store. A failed write
//! must never leave a category marked active whose config does not
//! exist on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::materialize::{MaterializeError, assemble, render, require_category, resolve_output_path};
use crate::ops::queries::category_servers;
use crate::ports::{ConfigIo, CoreError, ProcessControl};

use super::StoreService;

/// Fixed wait between kill and relaunch, giving the OS time to tear the
/// process down. A deliberate simple delay, not a poll-until-exited
/// loop.
pub const RESTART_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// How to restart an external tool after activation.
#[derive(Debug, Clone)]
pub struct RestartSpec {
    /// Process image name to find and kill (e.g. `claude.exe`).
    pub process_name: String,
    /// Executable to relaunch.
    pub app_path: PathBuf,
    /// Arguments for the relaunch.
    pub args: Vec<String>,
}

impl RestartSpec {
    pub fn new(process_name: impl Into<String>, app_path: impl Into<PathBuf>) -> Self {
        Self {
            process_name: process_name.into(),
            app_path: app_path.into(),
            args: Vec::new(),
        }
    }
}

/// What happened to the optional restart side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartOutcome {
    /// The tool was not running; nothing to restart.
    NotRunning,
    /// Kill + relaunch completed.
    Restarted { pid: Option<u32> },
    /// Something went wrong. Reported as a warning only — the category
    /// switch itself has already succeeded.
    Failed { reason: String },
}

/// Result of a successful activation.
#[derive(Debug)]
pub struct ActivationOutcome {
    /// Expanded path the config was written to.
    pub path: String,
    /// How many servers the materialized document contains entries for.
    pub server_count: usize,
    /// Restart result, when a restart was requested.
    pub restart: Option<RestartOutcome>,
}

/// Orchestrates Validating → Assembling → Writing → activation commit.
pub struct ActivationService {
    store: Arc<StoreService>,
    config_io: Arc<dyn ConfigIo>,
    process: Arc<dyn ProcessControl>,
}

impl ActivationService {
    pub fn new(
        store: Arc<StoreService>,
        config_io: Arc<dyn ConfigIo>,
        process: Arc<dyn ProcessControl>,
    ) -> Self {
        Self {
            store,
            config_io,
            process,
        }
    }

    /// Materialize without writing: returns the expanded destination
    /// path and the rendered document.
    pub async fn preview(
        &self,
        category_id: &str,
        target_id: &str,
    ) -> Result<(String, String), CoreError> {
        let snapshot = self.store.snapshot().await;
        require_category(&snapshot, category_id)?;
        let path = resolve_output_path(&snapshot, target_id)?;
        let content = render(&assemble(&snapshot, category_id));
        Ok((path, content))
    }

    /// Switch the target to a category: write its config file, commit
    /// the activation, then optionally restart the tool.
    pub async fn activate(
        &self,
        category_id: &str,
        target_id: &str,
        restart: Option<&RestartSpec>,
    ) -> Result<ActivationOutcome, CoreError> {
        let snapshot = self.store.snapshot().await;

        let category_name = require_category(&snapshot, category_id)?.name.clone();
        let path = resolve_output_path(&snapshot, target_id)?;
        let server_count = category_servers(&snapshot, category_id).len();
        let content = render(&assemble(&snapshot, category_id));

        self.config_io
            .write_text(Path::new(&path), &content)
            .await
            .map_err(|e| MaterializeError::WriteFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        self.store
            .set_active_category(target_id, Some(category_id.to_string()))
            .await?;
        info!(category = %category_name, target = target_id, %path, server_count, "Activated category");

        let restart = match restart {
            Some(spec) => Some(self.restart_tool(spec).await),
            None => None,
        };

        Ok(ActivationOutcome {
            path,
            server_count,
            restart,
        })
    }

    /// Kill, settle, relaunch. Only restarts a tool that is actually
    /// running; never fails the surrounding operation.
    pub async fn restart_tool(&self, spec: &RestartSpec) -> RestartOutcome {
        match self.process.find(&spec.process_name).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(process = %spec.process_name, "Tool not running, skipping restart");
                return RestartOutcome::NotRunning;
            }
            Err(error) => {
                warn!(process = %spec.process_name, %error, "Process lookup failed");
                return RestartOutcome::Failed {
                    reason: error.to_string(),
                };
            }
        }

        // A failed kill does not abort the relaunch attempt.
        if let Err(error) = self.process.kill(&spec.process_name).await {
            warn!(process = %spec.process_name, %error, "Failed to kill tool");
        }

        tokio::time::sleep(RESTART_SETTLE_DELAY).await;

        match self.process.launch(&spec.app_path, &spec.args).await {
            Ok(pid) => {
                info!(process = %spec.process_name, ?pid, "Tool relaunched");
                RestartOutcome::Restarted { pid }
            }
            Err(error) => {
                warn!(process = %spec.process_name, %error, "Failed to relaunch tool");
                RestartOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }
}
