//! Filesystem helpers shared by the collaborators.

use shortscript_error::{ShortscriptResult, StorageError, StorageErrorKind};
use std::path::Path;

/// Create the parent directory of `path` if needed.
pub(crate) async fn ensure_parent(path: &Path) -> ShortscriptResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }
    Ok(())
}

/// Replace `path` with `data`: write a temp file first, then rename.
pub(crate) async fn write_atomic(path: &Path, data: &[u8]) -> ShortscriptResult<()> {
    ensure_parent(path).await?;

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
    })?;
    Ok(())
}

/// Read a file as text; a missing file reads as `None`.
pub(crate) async fn read_optional(path: &Path) -> ShortscriptResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()),
    }
}
