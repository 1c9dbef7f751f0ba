//! In-process atomic counter allocator.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, info};

use crate::domain::allocator::CodeAllocator;
use crate::domain::entities::ShortCode;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Issues codes from an [`AtomicI64`] holding the next code to hand out.
///
/// Allocation is a single compare-and-swap loop with no I/O, so concurrent
/// callers never observe the same code. The counter is process-local: run at
/// most one instance per store with this allocator.
#[derive(Debug)]
pub struct CounterAllocator {
    next: AtomicI64,
}

impl CounterAllocator {
    /// Starts issuing at [`ShortCode::FIRST`].
    pub fn new() -> Self {
        Self::starting_at(ShortCode::FIRST)
    }

    /// Starts issuing at `first`.
    pub fn starting_at(first: ShortCode) -> Self {
        Self {
            next: AtomicI64::new(first.value()),
        }
    }

    /// Continues after the highest code already in `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store cannot be read or its highest
    /// code is `i64::MAX`.
    pub async fn seeded_from(repository: &dyn MappingRepository) -> Result<Self, AppError> {
        let first = match repository.max_code().await? {
            Some(max) => max
                .next()
                .ok_or_else(|| AppError::store("Short code space exhausted"))?,
            None => ShortCode::FIRST,
        };

        info!("Counter allocator starting at {}", first);
        Ok(Self::starting_at(first))
    }
}

impl Default for CounterAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeAllocator for CounterAllocator {
    async fn allocate(&self) -> Result<ShortCode, AppError> {
        let issued = self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|_| AppError::store("Short code space exhausted"))?;

        let code = ShortCode::new(issued)
            .map_err(|_| AppError::store(format!("Counter produced invalid code {issued}")))?;
        debug!("Allocated code {}", code);
        Ok(code)
    }
}
