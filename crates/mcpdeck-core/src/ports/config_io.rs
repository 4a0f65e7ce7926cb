//! Raw text file I/O for the materialized external config files.

use std::path::Path;

use async_trait::async_trait;

use super::RepositoryError;

/// Text file gateway used by the materializer.
#[async_trait]
pub trait ConfigIo: Send + Sync {
    /// Read a text file.
    async fn read_text(&self, path: &Path) -> Result<String, RepositoryError>;

    /// Write a text file, creating missing parent directories.
    async fn write_text(&self, path: &Path, content: &str) -> Result<(), RepositoryError>;
}
