//! PostgreSQL implementation of mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewMapping, ShortCode, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// PostgreSQL repository for mapping storage and retrieval.
///
/// Code uniqueness is enforced by the `url_mappings` primary key.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MappingRow {
    code: i64,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MappingRow> for UrlMapping {
    type Error = AppError;

    fn try_from(row: MappingRow) -> Result<Self, Self::Error> {
        let code = ShortCode::new(row.code).map_err(|_| {
            AppError::store(format!("Non-positive code {} in url_mappings", row.code))
        })?;
        Ok(UrlMapping::new(code, row.original_url, row.created_at))
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (code, original_url)
            VALUES ($1, $2)
            RETURNING code, original_url, created_at
            "#,
        )
        .bind(new_mapping.code.value())
        .bind(&new_mapping.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_code(&self, code: ShortCode) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT code, original_url, created_at
            FROM url_mappings
            WHERE code = $1
            "#,
        )
        .bind(code.value())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(UrlMapping::try_from).transpose()
    }

    async fn max_code(&self) -> Result<Option<ShortCode>, AppError> {
        let max: Option<i64> = sqlx::query_scalar("SELECT MAX(code) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        max.map(|value| {
            ShortCode::new(value)
                .map_err(|_| AppError::store(format!("Non-positive code {value} in url_mappings")))
        })
        .transpose()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
