//! In-memory store implementations for testing
//!
//! These stand in for the Postgres repositories so the HTTP layer can be
//! exercised without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use panchayat_core::visibility::sort_newest_first;
use panchayat_core::{Admin, AppError, Content, ContentQuery};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AdminStore, ContentStore};

/// In-memory content store. Clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryContentStore {
    records: Arc<RwLock<HashMap<Uuid, Content>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing validation.
    pub async fn add(&self, content: Content) {
        self.records.write().await.insert(content.id, content);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Make every subsequent insert and update fail with a database-style error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(AppError::Internal("in-memory store is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn list(&self, query: &ContentQuery) -> Result<Vec<Content>, AppError> {
        let mut items: Vec<Content> = self
            .records
            .read()
            .await
            .values()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        sort_newest_first(&mut items);
        Ok(items)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Content>, AppError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn insert(&self, content: &Content) -> Result<Content, AppError> {
        self.check_writable()?;
        self.records
            .write()
            .await
            .insert(content.id, content.clone());
        Ok(content.clone())
    }

    async fn update(&self, content: &Content) -> Result<Option<Content>, AppError> {
        self.check_writable()?;
        let mut records = self.records.write().await;
        match records.get_mut(&content.id) {
            Some(existing) => {
                *existing = content.clone();
                Ok(Some(content.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory admin store keyed by username.
#[derive(Clone, Default)]
pub struct InMemoryAdminStore {
    admins: Arc<RwLock<HashMap<String, Admin>>>,
}

impl InMemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminStore for InMemoryAdminStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError> {
        Ok(self.admins.read().await.get(username).cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Admin>, AppError> {
        Ok(self
            .admins
            .read()
            .await
            .values()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<Admin>, AppError> {
        let mut admins = self.admins.write().await;
        if admins.contains_key(username) {
            return Ok(None);
        }
        let admin = Admin {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        admins.insert(username.to_string(), admin.clone());
        Ok(Some(admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use panchayat_core::{ContentType, NewContent};

    fn work(is_active: bool) -> Content {
        NewContent {
            content_type: ContentType::Work,
            title: "Well".into(),
            description: "Dug".into(),
            media: vec![],
            start_date: None,
            end_date: None,
            is_active,
        }
        .into_content(Utc::now())
    }

    #[tokio::test]
    async fn test_list_applies_query_and_order() {
        let store = InMemoryContentStore::new();
        let mut older = work(true);
        older.created_at = Utc::now() - Duration::days(1);
        let newer = work(true);
        let hidden = work(false);
        store.add(older.clone()).await;
        store.add(newer.clone()).await;
        store.add(hidden.clone()).await;

        let public = store
            .list(&ContentQuery::public(None, Utc::now()))
            .await
            .unwrap();
        assert_eq!(
            public.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );

        let admin = store
            .list(&ContentQuery::admin(None, Utc::now()))
            .await
            .unwrap();
        assert_eq!(admin.len(), 3);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = InMemoryContentStore::new();
        assert!(store.update(&work(true)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fail_writes() {
        let store = InMemoryContentStore::new();
        store.set_fail_writes(true);
        assert!(store.insert(&work(true)).await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_admin_create_is_unique() {
        let store = InMemoryAdminStore::new();
        let admin = store.create("admin", "hash").await.unwrap().unwrap();
        assert!(store.create("admin", "other").await.unwrap().is_none());
        assert_eq!(store.get(admin.id).await.unwrap().unwrap().username, "admin");
    }
}
