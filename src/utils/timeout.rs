//! Deadline helpers for suspending operations.

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Runs a store-bound operation with a deadline.
///
/// An elapsed deadline becomes [`AppError::Store`], the same category as any
/// other store failure.
pub async fn store_deadline<T, F>(limit: Duration, operation: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::time::timeout(limit, fut).await.unwrap_or_else(|_| {
        Err(AppError::store(format!(
            "{operation} timed out after {}ms",
            limit.as_millis()
        )))
    })
}
