//! Submission pipeline: validate, allocate, persist.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::application::services::url_validator::UrlValidator;
use crate::domain::allocator::CodeAllocator;
use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::timeout::store_deadline;

/// Service turning submitted URLs into persisted mappings.
///
/// # Pipeline
///
/// 1. Validate the URL (rejections end here with [`AppError::InvalidUrl`])
/// 2. Allocate a code
/// 3. Persist the mapping
///
/// If step 3 fails the allocated code is abandoned and never reissued. The
/// caller only ever sees a complete mapping or an error. Every submission gets
/// a fresh code, including repeats of an already shortened URL.
pub struct ShortenerService {
    validator: UrlValidator,
    allocator: Arc<dyn CodeAllocator>,
    repository: Arc<dyn MappingRepository>,
    store_timeout: Duration,
}

impl ShortenerService {
    pub fn new(
        validator: UrlValidator,
        allocator: Arc<dyn CodeAllocator>,
        repository: Arc<dyn MappingRepository>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            validator,
            allocator,
            repository,
            store_timeout,
        }
    }

    /// Shortens `raw_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if validation fails, and
    /// [`AppError::Store`] if allocation or persistence fails or times out.
    pub async fn shorten(&self, raw_url: &str) -> Result<UrlMapping, AppError> {
        let validated = self.validator.validate(raw_url).await?;

        let code = store_deadline(self.store_timeout, "code allocation", async {
            self.allocator.allocate().await
        })
        .await?;
        debug!("Allocated code {} for {}", code, validated.as_str());

        let new_mapping = NewMapping {
            code,
            original_url: validated.into_original(),
        };

        let mapping = store_deadline(self.store_timeout, "mapping insert", async {
            self.repository.insert(new_mapping).await
        })
        .await
        .inspect_err(|e| warn!("Abandoning code {} after store failure: {}", code, e.detail()))?;

        info!("Shortened {} as {}", mapping.original_url, mapping.code);
        Ok(mapping)
    }
}
