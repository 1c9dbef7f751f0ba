//! Top-level router combining the API, health check and static pages.
//!
//! # Route Structure
//!
//! - `GET  /`                          - Landing page (`views/index.html`)
//! - `GET  /public/*`                  - Static assets
//! - `GET  /health`                    - Health check: store and cache
//! - `POST /api/shorturl`              - Shorten a URL
//! - `GET  /api/shorturl/{short_url}`  - Redirect
//!
//! # Middleware
//!
//! - **CORS** - Any origin may call the API
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on submissions
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `public_dir` - directory served under `/public`
/// - `views_dir` - directory holding `index.html`, served at `/`
pub fn app_router(state: AppState, public_dir: &Path, views_dir: &Path) -> NormalizePath<Router> {
    let router = Router::new()
        .route_service("/", ServeFile::new(views_dir.join("index.html")))
        .nest_service("/public", ServeDir::new(public_dir))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::shorturl_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
