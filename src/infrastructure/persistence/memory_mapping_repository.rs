//! Process-local mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewMapping, ShortCode, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Keeps mappings in a [`BTreeMap`] behind an async `RwLock`.
///
/// Contents are lost when the process exits. Intended for local development
/// and tests; pair it with a [`crate::infrastructure::allocation::CounterAllocator`].
#[derive(Default)]
pub struct InMemoryMappingRepository {
    mappings: RwLock<BTreeMap<ShortCode, UrlMapping>>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        debug!("Using in-memory mapping store");
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        if new_mapping.original_url.is_empty() {
            return Err(AppError::store("original_url must not be empty"));
        }

        let mut mappings = self.mappings.write().await;
        if mappings.contains_key(&new_mapping.code) {
            return Err(AppError::store(format!(
                "Short code {} already persisted",
                new_mapping.code
            )));
        }

        let mapping = UrlMapping::new(new_mapping.code, new_mapping.original_url, Utc::now());
        mappings.insert(mapping.code, mapping.clone());
        Ok(mapping)
    }

    async fn find_by_code(&self, code: ShortCode) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.mappings.read().await.get(&code).cloned())
    }

    async fn max_code(&self) -> Result<Option<ShortCode>, AppError> {
        Ok(self.mappings.read().await.keys().next_back().copied())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.mappings.read().await.len() as i64)
    }
}
