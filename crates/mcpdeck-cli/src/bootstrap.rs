//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Store repository and config file I/O (via mcpdeck-store)
//! - Process control (via mcpdeck-runtime)
//! - Core services (via mcpdeck-core)
//!
//! Command handlers receive the fully-composed AppCore and delegate
//! work to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use mcpdeck_core::paths::{STORE_FILE_NAME, ensure_directory};
use mcpdeck_core::ports::NoopStoreEvents;
use mcpdeck_core::services::AppCore;
use mcpdeck_runtime::ShellProcessControl;
use mcpdeck_store::{CoreFactory, setup_store};

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Path of the persisted store document.
    pub store_path: PathBuf,
}

impl CliContext {
    /// Access the AppCore.
    pub fn app(&self) -> &AppCore {
        &self.app
    }
}

/// Build the CLI context.
///
/// `data_dir` overrides the resolved data root (the `--data-dir` flag /
/// `MCPDECK_DATA_DIR`); otherwise the platform default is used.
pub async fn bootstrap(data_dir: Option<&str>) -> Result<CliContext> {
    let store_path = match data_dir {
        Some(dir) => {
            let root = PathBuf::from(dir);
            ensure_directory(&root)?;
            root.join(STORE_FILE_NAME)
        }
        None => setup_store()?,
    };
    debug!(path = %store_path.display(), "Using store document");

    let app = CoreFactory::build_app_core(
        &store_path,
        Arc::new(ShellProcessControl::new()),
        Arc::new(NoopStoreEvents::new()),
    )
    .await?;

    Ok(CliContext { app, store_path })
}
