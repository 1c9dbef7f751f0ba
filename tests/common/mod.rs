#![allow(dead_code)]

use async_trait::async_trait;
use short_url_service::application::services::{ResolverService, ShortenerService, UrlValidator};
use short_url_service::domain::allocator::CodeAllocator;
use short_url_service::domain::entities::{NewMapping, ShortCode, UrlMapping};
use short_url_service::domain::repositories::MappingRepository;
use short_url_service::domain::resolver::{HostResolver, ResolveError};
use short_url_service::error::AppError;
use short_url_service::infrastructure::allocation::CounterAllocator;
use short_url_service::infrastructure::cache::{CacheService, NullCache};
use short_url_service::infrastructure::persistence::InMemoryMappingRepository;
use short_url_service::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Resolves every host except those under the reserved `.invalid` TLD,
/// so tests never depend on network access.
pub struct StubResolver;

#[async_trait]
impl HostResolver for StubResolver {
    async fn resolve(&self, host: &str) -> Result<(), ResolveError> {
        if host.ends_with(".invalid") {
            Err(ResolveError::NoAddresses)
        } else {
            Ok(())
        }
    }
}

/// Store whose inserts fail a configurable number of times before
/// delegating to an in-memory store.
pub struct FlakyRepository {
    inner: InMemoryMappingRepository,
    failures_left: AtomicUsize,
    fail_reads: bool,
}

impl FlakyRepository {
    pub fn failing_inserts(times: usize) -> Self {
        Self {
            inner: InMemoryMappingRepository::new(),
            failures_left: AtomicUsize::new(times),
            fail_reads: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            inner: InMemoryMappingRepository::new(),
            failures_left: AtomicUsize::new(usize::MAX),
            fail_reads: true,
        }
    }
}

#[async_trait]
impl MappingRepository for FlakyRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(AppError::store("connection reset by peer"));
        }
        self.inner.insert(new_mapping).await
    }

    async fn find_by_code(&self, code: ShortCode) -> Result<Option<UrlMapping>, AppError> {
        if self.fail_reads {
            return Err(AppError::store("connection refused"));
        }
        self.inner.find_by_code(code).await
    }

    async fn max_code(&self) -> Result<Option<ShortCode>, AppError> {
        self.inner.max_code().await
    }

    async fn count(&self) -> Result<i64, AppError> {
        if self.fail_reads {
            return Err(AppError::store("connection refused"));
        }
        self.inner.count().await
    }
}

pub fn state_with(repository: Arc<dyn MappingRepository>) -> AppState {
    let allocator: Arc<dyn CodeAllocator> = Arc::new(CounterAllocator::new());
    let cache: Arc<dyn CacheService> = Arc::new(NullCache::new());
    let timeout = Duration::from_secs(2);

    let validator = UrlValidator::new(Arc::new(StubResolver), timeout);
    let shortener = Arc::new(ShortenerService::new(
        validator,
        allocator,
        repository.clone(),
        timeout,
    ));
    let resolver = Arc::new(ResolverService::new(
        repository.clone(),
        cache.clone(),
        timeout,
    ));

    AppState::new(shortener, resolver, repository, cache)
}

/// Fresh in-memory state; the first issued code is 1.
pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::new());
    (state_with(repository.clone()), repository)
}
