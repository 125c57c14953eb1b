use crate::error::{FetchError, Result};
use std::path::Path;

/// Create `path` and any missing parents. Returns `true` when the directory
/// had to be created.
pub fn ensure_dir_exists(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path).map_err(|e| FetchError::Filesystem {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(true)
}

/// Remove a file if it is there. A missing file is not an error.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FetchError::Filesystem {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Best-effort removal on an error path, where the original error is the one
/// returned. A file that cannot be removed is reported on stderr.
pub fn discard_file(path: &Path) -> bool {
    match remove_file_if_exists(path) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("[WARN] Could not remove leftover file: {e}");
            false
        }
    }
}
