//! PostgreSQL sequence-backed allocator.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::allocator::CodeAllocator;
use crate::domain::entities::ShortCode;
use crate::error::AppError;

/// Issues codes from the `short_code_seq` sequence.
///
/// `nextval` is atomic and never rolled back, so any number of instances
/// sharing the database receive distinct codes. Codes taken by failed
/// inserts are skipped.
pub struct PgSequenceAllocator {
    pool: Arc<PgPool>,
}

impl PgSequenceAllocator {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Moves the sequence past the highest persisted code.
    ///
    /// Needed when the table was filled by a counter allocator or an import.
    /// Leaves the sequence untouched when it is already ahead.
    pub async fn sync_with_store(&self) -> Result<(), AppError> {
        let advanced: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT setval('short_code_seq', m.max_code, true)
            FROM (SELECT MAX(code) AS max_code FROM url_mappings) m
            WHERE m.max_code IS NOT NULL
              AND m.max_code >= (SELECT last_value FROM short_code_seq)
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        match advanced {
            Some(value) => info!("Sequence advanced past existing code {}", value),
            None => debug!("Sequence already ahead of stored codes"),
        }
        Ok(())
    }
}

#[async_trait]
impl CodeAllocator for PgSequenceAllocator {
    async fn allocate(&self) -> Result<ShortCode, AppError> {
        let value: i64 = sqlx::query_scalar("SELECT nextval('short_code_seq')")
            .fetch_one(self.pool.as_ref())
            .await?;

        let code = ShortCode::new(value)
            .map_err(|_| AppError::store(format!("Sequence produced invalid code {value}")))?;
        debug!("Allocated code {} from sequence", code);
        Ok(code)
    }
}
