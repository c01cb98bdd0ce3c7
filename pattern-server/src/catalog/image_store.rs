//! Image Store
//!
//! Product images live on the local filesystem under the configured
//! assets directory. Records store relative paths; the store owns the
//! naming scheme and the cleanup behavior.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::utils::AppResult;

/// One uploaded file, already read out of the multipart stream
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// File-system image storage rooted at the assets directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Persist a batch of images and return their stored paths in upload
    /// order. Filenames combine a millisecond timestamp with a random
    /// suffix so two uploads in the same millisecond cannot collide.
    pub async fn store(&self, images: &[UploadedImage]) -> AppResult<Vec<String>> {
        let mut paths = Vec::with_capacity(images.len());
        for image in images {
            let filename = Self::generate_filename(&image.original_name);
            let path = self.root.join(&filename);
            tokio::fs::write(&path, &image.bytes).await?;
            paths.push(path.to_string_lossy().into_owned());
        }
        Ok(paths)
    }

    /// Best-effort removal. A missing or locked file is logged and
    /// skipped; callers never fail because cleanup did.
    pub async fn remove(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = tokio::fs::remove_file(path).await {
                warn!(target: "catalog", path = %path, error = %e, "Failed to remove image file");
            }
        }
    }

    fn generate_filename(original_name: &str) -> String {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u32 = rand::random();
        format!("product-{}-{:08x}{}", millis, suffix, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_extension() {
        let name = ImageStore::generate_filename("photo.jpg");
        assert!(name.starts_with("product-"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn filename_without_extension_is_bare() {
        let name = ImageStore::generate_filename("photo");
        assert!(!name.contains('.'));
    }

    #[test]
    fn filenames_differ_within_one_millisecond() {
        let a = ImageStore::generate_filename("a.png");
        let b = ImageStore::generate_filename("a.png");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn store_writes_files_in_upload_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().to_path_buf());

        let images = vec![
            UploadedImage {
                original_name: "front.jpg".to_string(),
                bytes: b"front".to_vec(),
            },
            UploadedImage {
                original_name: "back.jpg".to_string(),
                bytes: b"back".to_vec(),
            },
        ];

        let paths = store.store(&images).await.unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(tokio::fs::read(&paths[0]).await.unwrap(), b"front");
        assert_eq!(tokio::fs::read(&paths[1]).await.unwrap(), b"back");
    }

    #[tokio::test]
    async fn remove_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().to_path_buf());

        let existing = dir.path().join("product-1-abc.jpg");
        tokio::fs::write(&existing, b"x").await.unwrap();

        store
            .remove(&[
                existing.to_string_lossy().into_owned(),
                dir.path().join("no-such-file.jpg").to_string_lossy().into_owned(),
            ])
            .await;

        assert!(!existing.exists());
    }
}
