use async_trait::async_trait;
use panchayat_core::{Admin, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::AdminStore;

/// Repository for admin accounts
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for AdminRepository {
    #[tracing::instrument(skip(self), fields(db.table = "admins", db.operation = "select"))]
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<Postgres, Admin>(
            "SELECT id, username, password_hash, created_at FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    #[tracing::instrument(skip(self), fields(db.table = "admins", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<Postgres, Admin>(
            "SELECT id, username, password_hash, created_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    #[tracing::instrument(skip(self, password_hash), fields(db.table = "admins", db.operation = "insert"))]
    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<Postgres, Admin>(
            r#"
            INSERT INTO admins (id, username, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }
}
