//! Database repositories for data access layer
//!
//! The service layer depends on the [`ContentStore`] and [`AdminStore`]
//! traits only, so the Postgres repositories can be swapped for the in-memory
//! ones in tests.

use async_trait::async_trait;
use panchayat_core::{Admin, AppError, Content, ContentQuery};
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use uuid::Uuid;

pub mod admin;
pub mod content;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

/// Schema migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run database migrations: {}", e)))?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Persistence for content records.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Records matching the query, newest first.
    async fn list(&self, query: &ContentQuery) -> Result<Vec<Content>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Content>, AppError>;

    async fn insert(&self, content: &Content) -> Result<Content, AppError>;

    /// Overwrite the mutable fields of an existing record. `None` when the
    /// record no longer exists.
    async fn update(&self, content: &Content) -> Result<Option<Content>, AppError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Persistence for admin accounts.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Admin>, AppError>;

    /// Create an admin. `None` when the username is already taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<Admin>, AppError>;
}
