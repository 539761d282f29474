//! Filesystem-based audio storage implementation.
//!
//! Objects are stored under a base directory at their full object name, so
//! the on-disk layout matches the storage-path schema:
//! `{base}/users/{uid}/clients/{clientId}/sessions/{filename}`.

use crate::{AudioStore, PrefixDeletion, TempAudio};
use anamnesis_error::{AnamnesisResult, StorageError, StorageErrorKind};
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Filesystem storage backend.
///
/// Writes are atomic (temp file + rename). `fetch` copies the object into
/// the OS temp directory and hands back an RAII guard that removes the copy
/// on drop.
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> AnamnesisResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem audio store");
        Ok(Self { base_path })
    }

    /// Resolve an object name to a path under the base directory.
    ///
    /// Rejects absolute names and any name containing parent-directory
    /// components, so object names cannot escape the base.
    fn resolve(&self, object_name: &str) -> AnamnesisResult<PathBuf> {
        let relative = Path::new(object_name);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if object_name.is_empty() || escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(
                object_name.to_string(),
            ))
            .into());
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait::async_trait]
impl AudioStore for FileSystemStore {
    #[tracing::instrument(skip(self, data), fields(object = %object_name, size = data.len()))]
    async fn put(&self, object_name: &str, data: &[u8]) -> AnamnesisResult<()> {
        let path = self.resolve(object_name)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to a uniquely named temp file first, then rename for
        // atomicity. The unique suffix keeps concurrent puts of sibling
        // objects from renaming each other's half-written file.
        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::ObjectWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::ObjectWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(object = %object_name, size = data.len(), "Stored audio object");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(object = %object_name))]
    async fn fetch(&self, object_name: &str) -> AnamnesisResult<TempAudio> {
        let path = self.resolve(object_name)?;

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(
                StorageError::new(StorageErrorKind::NotFound(object_name.to_string())).into(),
            );
        }

        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let local = std::env::temp_dir().join(format!("anamnesis-{}{}", Uuid::new_v4(), extension));

        tokio::fs::copy(&path, &local).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Materialize(format!(
                "{} to {}: {}",
                path.display(),
                local.display(),
                e
            )))
        })?;

        tracing::debug!(
            object = %object_name,
            local = %local.display(),
            "Materialized audio object locally"
        );
        Ok(TempAudio::new(local))
    }

    #[tracing::instrument(skip(self), fields(prefix = %prefix))]
    async fn delete_prefix(&self, prefix: &str) -> AnamnesisResult<PrefixDeletion> {
        let root = self.resolve(prefix)?;

        if !tokio::fs::try_exists(&root).await.unwrap_or(false) {
            return Ok(PrefixDeletion::default());
        }

        let mut outcome = PrefixDeletion::default();
        let mut pending = vec![root.clone()];
        let mut dirs = Vec::new();

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| {
                StorageError::new(StorageErrorKind::ObjectRead(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
            dirs.push(dir);

            while let Some(entry) = entries.next_entry().await.map_err(|e| {
                StorageError::new(StorageErrorKind::ObjectRead(e.to_string()))
            })? {
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                } else {
                    match tokio::fs::remove_file(&path).await {
                        Ok(()) => outcome.deleted += 1,
                        Err(e) => {
                            // One bad object must not block the rest
                            outcome.failed += 1;
                            tracing::warn!(
                                path = %path.display(),
                                error = %e,
                                "Failed to delete object, continuing"
                            );
                        }
                    }
                }
            }
        }

        // Deepest directories first; leftovers are harmless
        for dir in dirs.into_iter().rev() {
            let _ = tokio::fs::remove_dir(&dir).await;
        }

        tracing::info!(
            prefix = %prefix,
            deleted = outcome.deleted,
            failed = outcome.failed,
            "Deleted objects under prefix"
        );
        Ok(outcome)
    }

    #[tracing::instrument(skip(self), fields(object = %object_name))]
    async fn exists(&self, object_name: &str) -> AnamnesisResult<bool> {
        let path = self.resolve(object_name)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }
}
