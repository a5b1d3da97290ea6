//! Local disk storage for uploaded files.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// A file persisted to disk, with the public-facing name and full path.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub path: PathBuf,
}

/// Writes uploaded files under a configured root directory.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist file bytes under a collision-resistant name derived from
    /// the original filename: `{millis}-{random}-{original}`.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> AppResult<StoredFile> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload dir: {}", e)))?;

        let filename = Self::unique_filename(original_name);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to write upload: {}", e)))?;

        tracing::debug!(filename = %filename, size = bytes.len(), "Stored uploaded file");

        Ok(StoredFile { filename, path })
    }

    fn unique_filename(original_name: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let random = &Uuid::new_v4().simple().to_string()[..8];
        format!("{}-{}-{}", millis, random, Self::sanitize(original_name))
    }

    // Strip path separators and control characters from client-supplied names
    fn sanitize(name: &str) -> String {
        let cleaned: String = name
            .chars()
            .filter(|c| !matches!(c, '/' | '\\' | '\0') && !c.is_control())
            .collect();
        if cleaned.is_empty() {
            "file".to_string()
        } else {
            cleaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_filename_keeps_original_name() {
        let name = DiskStorage::unique_filename("photo.png");
        assert!(name.ends_with("-photo.png"));
        // millis, random token, original
        assert_eq!(name.matches('-').count() >= 2, true);
    }

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(DiskStorage::sanitize("../../etc/passwd"), "....etcpasswd");
        assert_eq!(DiskStorage::sanitize("a\\b.png"), "ab.png");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(DiskStorage::sanitize(""), "file");
    }

    #[tokio::test]
    async fn store_writes_file_to_disk() {
        let dir = std::env::temp_dir().join(format!("upload-test-{}", Uuid::new_v4()));
        let storage = DiskStorage::new(&dir);

        let stored = storage.store("avatar.jpg", b"bytes").await.unwrap();
        assert!(stored.path.exists());
        assert!(stored.filename.ends_with("-avatar.jpg"));

        let contents = tokio::fs::read(&stored.path).await.unwrap();
        assert_eq!(contents, b"bytes");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
