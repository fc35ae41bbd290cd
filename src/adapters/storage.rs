use crate::core::walk::list_files;
use crate::core::Storage;
use crate::utils::error::{RecompressError, Result};
use std::path::{Path, PathBuf};

/// Local filesystem. Paths are used as given, relative to the working directory.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let dir = dir.to_path_buf();
        tokio::task::spawn_blocking(move || list_files(&dir).collect::<Result<Vec<_>>>()).await?
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|source| RecompressError::DeleteError {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|source| RecompressError::ReadError {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let write_error = |source| RecompressError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        tokio::fs::write(path, data).await.map_err(write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_intermediate_directories() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();
        let target = temp.path().join("races/2024/horseA.avif");

        storage.write_file(&target, b"avif").await.unwrap();

        assert_eq!(storage.read_file(&target).await.unwrap(), b"avif");
        assert_eq!(storage.list_files(temp.path()).await.unwrap(), vec![target]);
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_a_delete_error() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();
        let missing = temp.path().join("gone.avif");

        let err = storage.remove_file(&missing).await.unwrap_err();

        match err {
            RecompressError::DeleteError { path, .. } => assert_eq!(path, missing),
            other => panic!("expected delete error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_missing_file_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let err = LocalStorage::new()
            .read_file(&temp.path().join("nope.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, RecompressError::ReadError { .. }));
    }

    #[tokio::test]
    async fn test_list_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let err = LocalStorage::new()
            .list_files(&temp.path().join("missing"))
            .await
            .unwrap_err();

        assert!(matches!(err, RecompressError::EnumerationError { .. }));
    }
}
