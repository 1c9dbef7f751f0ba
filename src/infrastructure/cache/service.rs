//! Cache service trait and error types.

use async_trait::async_trait;

use crate::domain::entities::ShortCode;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache for resolved short codes.
///
/// Mappings are immutable, so entries never need invalidation; they only
/// expire by TTL. Callers treat every error as a miss and fall back to the
/// mapping store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Looks up the original URL cached for `code`.
    ///
    /// Returns `Ok(None)` on a miss.
    async fn get_url(&self, code: ShortCode) -> CacheResult<Option<String>>;

    /// Caches `original_url` for `code` with the implementation's default TTL.
    async fn set_url(&self, code: ShortCode, original_url: &str) -> CacheResult<()>;

    /// Reports whether the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
