//! Blob store setup

use anyhow::{Context, Result};
use panchayat_core::Config;
use panchayat_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Open the local upload directory, creating it when missing.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(
        config.upload_dir().clone(),
        config.uploads_url_prefix().to_string(),
    )
    .await
    .with_context(|| {
        format!(
            "Failed to initialize upload directory {}",
            config.upload_dir().display()
        )
    })?;

    tracing::info!(
        upload_dir = %config.upload_dir().display(),
        url_prefix = %config.uploads_url_prefix(),
        "Local storage initialized"
    );

    Ok(Arc::new(storage))
}
