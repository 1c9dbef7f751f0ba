//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::ShortCode;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

const KEY_PREFIX: &str = "short_url:";

/// Redis cache for resolved short codes.
///
/// Uses a `ConnectionManager`, which reconnects transparently and is cheap to
/// clone per operation.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
        })
    }

    fn build_key(code: ShortCode) -> String {
        format!("{KEY_PREFIX}{code}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, code: ShortCode) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        let cached = conn
            .get::<_, Option<String>>(Self::build_key(code))
            .await
            .map_err(|e| CacheError::Operation(format!("GET {code}: {e}")))?;

        debug!(
            "Cache {} for {}",
            if cached.is_some() { "HIT" } else { "MISS" },
            code
        );
        Ok(cached)
    }

    async fn set_url(&self, code: ShortCode, original_url: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(Self::build_key(code), original_url, self.ttl_seconds)
            .await
            .map_err(|e| CacheError::Operation(format!("SET {code}: {e}")))?;

        debug!("Cache SET {} (TTL: {}s)", code, self.ttl_seconds);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
