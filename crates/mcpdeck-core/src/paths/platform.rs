//! Data-root resolution and directory helpers.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable that overrides the data root. Used by tests and
/// portable installs that keep their data next to the executable.
pub const DATA_DIR_ENV: &str = "MCPDECK_DATA_DIR";

/// File name of the persisted store document inside the data root.
pub const STORE_FILE_NAME: &str = "store.json";

/// Root directory for application data (store document, logs).
///
/// `MCPDECK_DATA_DIR` wins when set; otherwise the platform data dir
/// plus `mcpdeck`.
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    dirs::data_dir()
        .map(|dir| dir.join("mcpdeck"))
        .ok_or(PathError::NoDataDir)
}

/// Path of the persisted store document.
pub fn store_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(STORE_FILE_NAME))
}

/// Create a directory (and parents) if missing; reject a non-directory
/// squatting on the path.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
