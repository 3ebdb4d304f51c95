//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob store used by the content service.
///
/// Blobs are addressed by a flat key (see the crate root). Records keep only
/// the public URL, so backends also know how to map a URL back to its key.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a file under a freshly generated key and return (key, public_url).
    ///
    /// `filename` is the client's original name and only contributes the
    /// extension.
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)>;

    /// Read a blob by key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a blob by key. Deleting a missing blob succeeds.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a blob exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Map a public URL handed out by [`Storage::upload`] back to its key.
    fn key_for_url(&self, url: &str) -> Option<String>;

    /// Public URL for a stored key, in the same form [`Storage::upload`] returns.
    fn url_for_key(&self, storage_key: &str) -> String;

    /// Readiness probe for the backend.
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
