use serde::{de::DeserializeOwned, Serialize};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Read a JSON array from `path`. Missing, unreadable or corrupt files read
/// as an empty collection.
pub(crate) async fn load_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Collection file absent; treating as empty");
            return Vec::new();
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                error = %error,
                "Failed to read collection file; treating as empty"
            );
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(error) => {
            warn!(
                path = %path.display(),
                error = %error,
                "Failed to parse collection file; treating as empty"
            );
            Vec::new()
        }
    }
}

/// Write the whole collection to a temp file, flush it to disk, then rename
/// it over `path`.
pub(crate) async fn persist_atomic<T: Serialize>(path: &Path, items: &[T]) -> StoreResult<()> {
    ensure_parent_dir(path).await?;

    let payload = serde_json::to_vec_pretty(items)?;
    let temp_path = temp_path_for(path);

    let mut file = tokio::fs::File::create(&temp_path)
        .await
        .map_err(|e| StoreError::write(&temp_path, e))?;
    file.write_all(&payload)
        .await
        .map_err(|e| StoreError::write(&temp_path, e))?;
    file.sync_all()
        .await
        .map_err(|e| StoreError::write(&temp_path, e))?;
    drop(file);

    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| StoreError::write(path, e))?;
    Ok(())
}

pub(crate) async fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::write(parent, e))?;
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("collection"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let items: Vec<String> = load_or_empty(&dir.path().join("absent.json")).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "{not json").await.unwrap();
        let items: Vec<String> = load_or_empty(&path).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_persist_creates_parent_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("items.json");
        persist_atomic(&path, &["a".to_string(), "b".to_string()]).await.unwrap();

        let items: Vec<String> = load_or_empty(&path).await;
        assert_eq!(items, vec!["a", "b"]);
        assert!(!temp_path_for(&path).exists());
    }
}
