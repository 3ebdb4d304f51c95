use async_trait::async_trait;
use chrono::{DateTime, Utc};
use panchayat_core::{AppError, Audience, Content, ContentQuery, ContentType, MediaItem};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::ContentStore;

const CONTENT_COLUMNS: &str = "id, content_type, title, description, media, start_date, end_date, is_active, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ContentRow {
    id: Uuid,
    content_type: ContentType,
    title: String,
    description: String,
    media: Json<Vec<MediaItem>>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ContentRow> for Content {
    fn from(row: ContentRow) -> Self {
        Content {
            id: row.id,
            content_type: row.content_type,
            title: row.title,
            description: row.description,
            media: row.media.0,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for content records
#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the listing query. Mirrors `ContentQuery::matches`.
    fn list_query(query: &ContentQuery) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM contents WHERE TRUE",
            CONTENT_COLUMNS
        ));

        if let Some(content_type) = query.content_type {
            qb.push(" AND content_type = ").push_bind(content_type);
        }

        if query.audience == Audience::Public {
            qb.push(" AND is_active = TRUE AND (content_type <> 'EVENT' OR (start_date <= ")
                .push_bind(query.now)
                .push(" AND end_date >= ")
                .push_bind(query.now)
                .push("))");
        }

        qb.push(" ORDER BY created_at DESC");
        qb
    }
}

#[async_trait]
impl ContentStore for ContentRepository {
    #[tracing::instrument(skip(self), fields(db.table = "contents", db.operation = "select"))]
    async fn list(&self, query: &ContentQuery) -> Result<Vec<Content>, AppError> {
        let rows = Self::list_query(query)
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Content::from).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "contents", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Content>, AppError> {
        let row = sqlx::query_as::<Postgres, ContentRow>(&format!(
            "SELECT {} FROM contents WHERE id = $1",
            CONTENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Content::from))
    }

    #[tracing::instrument(skip(self, content), fields(db.table = "contents", db.operation = "insert", db.record_id = %content.id))]
    async fn insert(&self, content: &Content) -> Result<Content, AppError> {
        let row = sqlx::query_as::<Postgres, ContentRow>(&format!(
            r#"
            INSERT INTO contents (id, content_type, title, description, media, start_date, end_date, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(content.id)
        .bind(content.content_type)
        .bind(&content.title)
        .bind(&content.description)
        .bind(Json(&content.media))
        .bind(content.start_date)
        .bind(content.end_date)
        .bind(content.is_active)
        .bind(content.created_at)
        .bind(content.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self, content), fields(db.table = "contents", db.operation = "update", db.record_id = %content.id))]
    async fn update(&self, content: &Content) -> Result<Option<Content>, AppError> {
        let row = sqlx::query_as::<Postgres, ContentRow>(&format!(
            r#"
            UPDATE contents
            SET title = $2, description = $3, media = $4, start_date = $5, end_date = $6,
                is_active = $7, updated_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(content.id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(Json(&content.media))
        .bind(content.start_date)
        .bind(content.end_date)
        .bind(content.is_active)
        .bind(content.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Content::from))
    }

    #[tracing::instrument(skip(self), fields(db.table = "contents", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
