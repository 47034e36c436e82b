//! Persistence of raw scanner output.

use std::path::Path;

use crate::scanner::ScanError;

/// Writes `contents` to `path` verbatim, replacing any previous file.
pub async fn persist(path: &Path, contents: &str) -> Result<(), ScanError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ScanError::Persist {
            path: path.to_path_buf(),
            source,
        })
}
