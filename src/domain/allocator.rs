//! Short code allocation contract.

use crate::domain::entities::ShortCode;
use crate::error::AppError;
use async_trait::async_trait;

/// Hands out unique short codes.
///
/// An allocator owns its uniqueness source exclusively. Each call returns a
/// code that this allocator has never returned before, in strictly increasing
/// order of issuance. A code whose mapping later fails to persist is simply
/// abandoned, leaving a gap.
///
/// # Implementations
///
/// - [`crate::infrastructure::allocation::CounterAllocator`] - in-process atomic counter
/// - [`crate::infrastructure::allocation::PgSequenceAllocator`] - PostgreSQL sequence,
///   safe across instances sharing one database
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeAllocator: Send + Sync {
    /// Reserves the next code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the uniqueness source is unreachable or
    /// exhausted.
    async fn allocate(&self) -> Result<ShortCode, AppError>;
}
