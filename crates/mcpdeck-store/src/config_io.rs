//! Filesystem implementation of the config file gateway.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use mcpdeck_core::ports::{ConfigIo, RepositoryError};

/// Plain filesystem text I/O for materialized config files.
#[derive(Debug, Clone, Default)]
pub struct FsConfigIo;

impl FsConfigIo {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConfigIo for FsConfigIo {
    async fn read_text(&self, path: &Path) -> Result<String, RepositoryError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepositoryError::Storage(format!("{}: {e}", path.display())))
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), RepositoryError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(format!("{}: {e}", parent.display())))?;
        }

        tokio::fs::write(path, content.as_bytes())
            .await
            .map_err(|e| RepositoryError::Storage(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "Wrote config file");
        Ok(())
    }
}
