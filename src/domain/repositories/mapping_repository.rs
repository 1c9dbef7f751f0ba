//! Repository trait for URL mapping persistence.

use crate::domain::entities::{NewMapping, ShortCode, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short code mappings.
///
/// Mappings are append-only: there is no update or delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - Process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the code is already persisted or on
    /// any I/O failure.
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on I/O failure.
    async fn find_by_code(&self, code: ShortCode) -> Result<Option<UrlMapping>, AppError>;

    /// Returns the highest persisted code, or `None` on an empty store.
    ///
    /// Used to seed in-process allocators on startup.
    async fn max_code(&self) -> Result<Option<ShortCode>, AppError>;

    /// Counts persisted mappings.
    async fn count(&self) -> Result<i64, AppError>;
}
