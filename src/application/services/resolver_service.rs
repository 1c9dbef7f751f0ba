//! Short code resolution with a read-through cache.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::entities::ShortCode;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::timeout::store_deadline;

/// Resolves short codes back to the URLs they were issued for.
///
/// Read-only: resolution never mutates the store. Results are returned
/// exactly as persisted.
///
/// # Cache Strategy
///
/// - **Cache hit**: returned immediately
/// - **Cache miss**: store lookup, then a fire-and-forget cache write
/// - **Cache error**: logged and treated as a miss
pub struct ResolverService {
    repository: Arc<dyn MappingRepository>,
    cache: Arc<dyn CacheService>,
    store_timeout: Duration,
}

impl ResolverService {
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            store_timeout,
        }
    }

    /// Resolves a raw path segment to its original URL.
    ///
    /// A segment that is not a positive decimal integer is reported exactly
    /// like an unknown code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for malformed or unknown codes and
    /// [`AppError::Store`] on store failure or timeout.
    pub async fn resolve(&self, raw_code: &str) -> Result<String, AppError> {
        let code: ShortCode = raw_code
            .parse()
            .map_err(|_| AppError::not_found(raw_code))?;

        self.resolve_code(code).await
    }

    /// Resolves an already parsed code.
    pub async fn resolve_code(&self, code: ShortCode) -> Result<String, AppError> {
        match self.cache.get_url(code).await {
            Ok(Some(url)) => return Ok(url),
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}: {}", code, e),
        }

        let mapping = store_deadline(self.store_timeout, "mapping lookup", async {
            self.repository.find_by_code(code).await
        })
        .await?
        .ok_or_else(|| AppError::not_found(code.to_string()))?;

        let cache = self.cache.clone();
        let url = mapping.original_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_url(code, &url).await {
                warn!("Failed to cache code {}: {}", code, e);
            }
        });

        debug!("Resolved {} from store", code);
        Ok(mapping.original_url)
    }
}
