//! Content lifecycle: listing, create, update with media reconciliation, and
//! the delete cascade.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use panchayat_core::validation::{apply_update, parse_media_list, validate_new_content};
use panchayat_core::{AppError, Audience, Content, ContentForm, ContentQuery, ContentType, MediaItem};
use panchayat_db::ContentStore;
use uuid::Uuid;

use super::upload::{DeleteReport, StoredFile, UploadService};
use crate::utils::upload::UploadedFile;

pub const CONTENT_NOT_FOUND: &str = "Content not found";

fn not_found() -> AppError {
    AppError::NotFound(CONTENT_NOT_FOUND.to_string())
}

fn append_uploads(mut media: Vec<MediaItem>, stored: &[StoredFile]) -> Vec<MediaItem> {
    media.extend(stored.iter().map(StoredFile::to_media_item));
    media
}

#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    uploads: UploadService,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>, uploads: UploadService) -> Self {
        Self { store, uploads }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        content_type: Option<ContentType>,
        audience: Audience,
    ) -> Result<Vec<Content>, AppError> {
        let query = ContentQuery::new(content_type, audience, Utc::now());
        self.store.list(&query).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Content, AppError> {
        self.store.get(id).await?.ok_or_else(not_found)
    }

    #[tracing::instrument(skip(self, form, files), fields(file_count = files.len()))]
    pub async fn create(
        &self,
        form: ContentForm,
        files: Vec<UploadedFile>,
    ) -> Result<Content, AppError> {
        let mut new = validate_new_content(&form)?;

        let carried = match parse_media_list(form.existing_media.as_deref()) {
            Some(submitted) => self.resolve_kept_media(&[], submitted).await,
            None => Vec::new(),
        };

        let stored = self.uploads.store_all(files).await?;
        new.media = append_uploads(carried, &stored);

        let content = new.into_content(Utc::now());
        match self.store.insert(&content).await {
            Ok(saved) => {
                tracing::info!(
                    content_id = %saved.id,
                    content_type = %saved.content_type,
                    media_count = saved.media.len(),
                    "Content created"
                );
                Ok(saved)
            }
            Err(e) => {
                self.uploads.discard(&stored).await;
                Err(e)
            }
        }
    }

    /// Apply an edit. Fields are validated first; new files are uploaded and
    /// the record saved before any removed media is deleted, so a failed
    /// update leaves the record and its blobs as they were.
    #[tracing::instrument(skip(self, form, files), fields(content_id = %id, file_count = files.len()))]
    pub async fn update(
        &self,
        id: Uuid,
        form: ContentForm,
        files: Vec<UploadedFile>,
    ) -> Result<Content, AppError> {
        let current = self.get(id).await?;
        let mut updated = apply_update(&current, &form)?;

        let kept = match parse_media_list(form.existing_media.as_deref()) {
            Some(submitted) => self.resolve_kept_media(&current.media, submitted).await,
            None => current.media.clone(),
        };
        let kept_ids: HashSet<String> = kept.iter().map(|m| self.media_identity(m)).collect();
        let removed: Vec<MediaItem> = current
            .media
            .iter()
            .filter(|m| !kept_ids.contains(&self.media_identity(m)))
            .cloned()
            .collect();

        let stored = self.uploads.store_all(files).await?;
        updated.media = append_uploads(kept, &stored);
        updated.updated_at = Utc::now();

        let saved = match self.store.update(&updated).await {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                self.uploads.discard(&stored).await;
                return Err(not_found());
            }
            Err(e) => {
                self.uploads.discard(&stored).await;
                return Err(e);
            }
        };

        if !removed.is_empty() {
            let report = self.uploads.delete_media(&removed).await;
            tracing::info!(
                content_id = %id,
                removed = report.attempted,
                failed = report.failed,
                "Removed media detached from content"
            );
        }

        Ok(saved)
    }

    /// Delete a record and, best-effort, every blob it references.
    #[tracing::instrument(skip(self), fields(content_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<DeleteReport, AppError> {
        let current = self.get(id).await?;

        let report = self.uploads.delete_media(&current.media).await;
        if report.failed > 0 {
            tracing::warn!(
                failed = report.failed,
                attempted = report.attempted,
                "Some media blobs could not be deleted"
            );
        }

        if !self.store.delete(id).await? {
            return Err(not_found());
        }

        tracing::info!(media_deleted = report.attempted - report.failed, "Content deleted");
        Ok(report)
    }

    /// Blob key behind a media entry, or its raw URL when it does not map
    /// into the store. Two entries naming the same blob compare equal.
    fn media_identity(&self, item: &MediaItem) -> String {
        self.uploads
            .media_key(&item.url)
            .unwrap_or_else(|| item.url.clone())
    }

    /// Filter a client-supplied keep list down to media we can vouch for:
    /// entries naming a blob already on the record (the stored entry wins) or
    /// a blob that exists in the store, recorded under its canonical URL.
    /// Duplicates collapse to their first occurrence.
    async fn resolve_kept_media(
        &self,
        current: &[MediaItem],
        submitted: Vec<MediaItem>,
    ) -> Vec<MediaItem> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(submitted.len());

        for item in submitted {
            let identity = self.media_identity(&item);
            if !seen.insert(identity.clone()) {
                continue;
            }
            if let Some(existing) = current.iter().find(|m| self.media_identity(m) == identity) {
                kept.push(existing.clone());
                continue;
            }
            let known = match self.uploads.media_key(&item.url) {
                Some(key) => self.uploads.key_exists(&key).await.then_some(key),
                None => None,
            };
            let Some(key) = known else {
                tracing::warn!(url = %item.url, "Dropping unknown media reference");
                continue;
            };
            kept.push(MediaItem {
                url: self.uploads.url_for_key(&key),
                kind: item.kind,
            });
        }

        kept
    }
}
