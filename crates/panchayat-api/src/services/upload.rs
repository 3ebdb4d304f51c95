//! Blob side of content media: concurrent uploads with rollback and
//! best-effort deletion.

use std::sync::Arc;

use futures::future::join_all;
use panchayat_core::{AppError, MediaItem, MediaKind};
use panchayat_storage::Storage;
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::upload::{UploadLimits, UploadedFile};

/// A file written to the blob store.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub file_name: String,
    #[serde(skip)]
    pub key: String,
}

impl StoredFile {
    pub fn to_media_item(&self) -> MediaItem {
        MediaItem {
            url: self.url.clone(),
            kind: self.kind,
        }
    }
}

/// Outcome of a best-effort delete pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub attempted: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct UploadService {
    storage: Arc<dyn Storage>,
    limits: UploadLimits,
}

impl UploadService {
    pub fn new(storage: Arc<dyn Storage>, limits: UploadLimits) -> Self {
        Self { storage, limits }
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Upload every file concurrently. Either all of them end up stored, or
    /// none do: on any failure the ones that succeeded are deleted again.
    #[tracing::instrument(skip(self, files), fields(file_count = files.len()))]
    pub async fn store_all(&self, files: Vec<UploadedFile>) -> Result<Vec<StoredFile>, AppError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let uploads = files.into_iter().map(|file| {
            let storage = self.storage.clone();
            async move {
                storage
                    .upload(&file.file_name, &file.content_type, file.data.to_vec())
                    .await
                    .map(|(key, url)| StoredFile {
                        url,
                        kind: MediaKind::Image,
                        file_name: file.file_name,
                        key,
                    })
            }
        });

        let mut stored = Vec::new();
        let mut first_error = None;
        for result in join_all(uploads).await {
            match result {
                Ok(file) => stored.push(file),
                Err(e) => {
                    tracing::error!(error = %e, "File upload failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(err) = first_error {
            self.discard(&stored).await;
            return Err(AppError::Storage(format!("Failed to upload files: {}", err)));
        }

        tracing::info!(count = stored.len(), "Files uploaded");
        Ok(stored)
    }

    /// Remove blobs written earlier in a request that is now failing.
    pub async fn discard(&self, stored: &[StoredFile]) {
        for file in stored {
            if let Err(e) = self.storage.delete(&file.key).await {
                tracing::warn!(error = %e, key = %file.key, "Failed to remove orphaned upload");
            }
        }
    }

    /// Delete the blobs behind `media`, one at a time. Failures are logged
    /// and counted, never returned.
    pub async fn delete_media(&self, media: &[MediaItem]) -> DeleteReport {
        let mut report = DeleteReport::default();
        for item in media {
            report.attempted += 1;
            let Some(key) = self.storage.key_for_url(&item.url) else {
                tracing::warn!(url = %item.url, "Media URL does not map to a stored blob");
                report.failed += 1;
                continue;
            };
            if let Err(e) = self.storage.delete(&key).await {
                tracing::warn!(error = %e, url = %item.url, "Failed to delete media blob");
                report.failed += 1;
            }
        }
        report
    }

    /// Whether the blob behind `url` is present in the store.
    pub async fn blob_exists(&self, url: &str) -> bool {
        match self.storage.key_for_url(url) {
            Some(key) => self.key_exists(&key).await,
            None => false,
        }
    }

    pub async fn key_exists(&self, key: &str) -> bool {
        match self.storage.exists(key).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Blob existence check failed");
                false
            }
        }
    }

    /// Blob key a media URL refers to, if it maps into this store.
    pub fn media_key(&self, url: &str) -> Option<String> {
        self.storage.key_for_url(url)
    }

    pub fn url_for_key(&self, key: &str) -> String {
        self.storage.url_for_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use panchayat_storage::LocalStorage;
    use tempfile::tempdir;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"png"),
        }
    }

    async fn service(dir: &std::path::Path) -> UploadService {
        let storage = LocalStorage::new(dir, "/uploads".to_string()).await.unwrap();
        UploadService::new(
            Arc::new(storage),
            UploadLimits {
                max_file_size: 1024,
                max_files: 10,
            },
        )
    }

    #[tokio::test]
    async fn test_store_all_preserves_order() {
        let dir = tempdir().unwrap();
        let service = service(dir.path()).await;

        let stored = service
            .store_all(vec![file("a.png"), file("b.gif"), file("c")])
            .await
            .unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored[0].url.ends_with(".png"));
        assert!(stored[1].url.ends_with(".gif"));
        assert!(stored[2].url.ends_with(".jpg"));
        assert_eq!(stored[1].file_name, "b.gif");
        for f in &stored {
            assert!(service.blob_exists(&f.url).await);
        }
    }

    #[tokio::test]
    async fn test_delete_media_counts_attempts() {
        let dir = tempdir().unwrap();
        let service = service(dir.path()).await;
        let stored = service.store_all(vec![file("a.png")]).await.unwrap();

        let media = vec![
            stored[0].to_media_item(),
            MediaItem::image("/uploads/never-existed.png"),
            MediaItem::image("/uploads/"),
        ];
        let report = service.delete_media(&media).await;
        assert_eq!(report.attempted, 3);
        assert_eq!(report.failed, 1);
        assert!(!service.blob_exists(&stored[0].url).await);
    }
}
