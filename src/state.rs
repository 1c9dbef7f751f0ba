//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{ResolverService, ShortenerService};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub resolver: Arc<ResolverService>,
    pub repository: Arc<dyn MappingRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        shortener: Arc<ShortenerService>,
        resolver: Arc<ResolverService>,
        repository: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            shortener,
            resolver,
            repository,
            cache,
        }
    }
}
