//! Data directory setup.

use std::path::PathBuf;

use tracing::debug;

use mcpdeck_core::paths::{PathError, data_root, ensure_directory, store_path};

/// Resolve the store document path, creating the data directory if
/// missing. Call once at adapter startup.
pub fn setup_store() -> Result<PathBuf, PathError> {
    let root = data_root()?;
    ensure_directory(&root)?;
    let path = store_path()?;
    debug!(path = %path.display(), "Store document path resolved");
    Ok(path)
}
