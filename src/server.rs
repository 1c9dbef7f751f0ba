//! HTTP server initialization and runtime setup.
//!
//! Builds the mapping store, code allocator, cache and services, then runs the
//! Axum server until a shutdown signal arrives.

use crate::application::services::{ResolverService, ShortenerService, UrlValidator};
use crate::config::{AllocatorKind, Config, StoreBackend};
use crate::domain::allocator::CodeAllocator;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::allocation::{CounterAllocator, PgSequenceAllocator};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::dns::SystemResolver;
use crate::infrastructure::persistence::{InMemoryMappingRepository, PgMappingRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Mapping store (PostgreSQL with migrations, or in-memory)
/// - Code allocator (database sequence or seeded counter)
/// - Redis cache (or NullCache fallback)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Allocator initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (repository, allocator) = build_store(&config).await?;
    let cache = build_cache(&config).await;
    let state = build_state(&config, repository, allocator, cache);

    let app = app_router(state, &config.public_dir, &config.views_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wires services into [`AppState`].
pub fn build_state(
    config: &Config,
    repository: Arc<dyn MappingRepository>,
    allocator: Arc<dyn CodeAllocator>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    let validator = UrlValidator::new(Arc::new(SystemResolver::new()), config.dns_timeout());

    let shortener = Arc::new(ShortenerService::new(
        validator,
        allocator,
        repository.clone(),
        config.store_timeout(),
    ));
    let resolver = Arc::new(ResolverService::new(
        repository.clone(),
        cache.clone(),
        config.store_timeout(),
    ));

    AppState::new(shortener, resolver, repository, cache)
}

/// Creates the mapping repository and the single allocator paired with it.
async fn build_store(
    config: &Config,
) -> Result<(Arc<dyn MappingRepository>, Arc<dyn CodeAllocator>)> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store: mappings are lost on restart");
            let repository: Arc<dyn MappingRepository> = Arc::new(InMemoryMappingRepository::new());
            let allocator: Arc<dyn CodeAllocator> =
                Arc::new(CounterAllocator::seeded_from(repository.as_ref()).await?);
            Ok((repository, allocator))
        }
        StoreBackend::Postgres => {
            let pool = Arc::new(connect_pool(config).await?);
            let repository: Arc<dyn MappingRepository> =
                Arc::new(PgMappingRepository::new(pool.clone()));

            let allocator: Arc<dyn CodeAllocator> = match config.allocator {
                AllocatorKind::Sequence => {
                    let allocator = PgSequenceAllocator::new(pool);
                    allocator.sync_with_store().await?;
                    tracing::info!("Code allocator: database sequence");
                    Arc::new(allocator)
                }
                AllocatorKind::Counter => {
                    tracing::warn!(
                        "Code allocator: in-process counter; run a single instance per database"
                    );
                    Arc::new(CounterAllocator::seeded_from(repository.as_ref()).await?)
                }
            };

            Ok((repository, allocator))
        }
    }
}

/// Connects the PostgreSQL pool and applies embedded migrations.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres store")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    Ok(pool)
}

async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
