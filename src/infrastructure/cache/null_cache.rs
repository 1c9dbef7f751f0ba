//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::ShortCode;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that never stores anything.
///
/// Used when Redis is not configured, when the Redis connection fails at
/// startup, and in tests.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _code: ShortCode) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _code: ShortCode, _original_url: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
