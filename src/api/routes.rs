//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorturl`               - Shorten a URL (rate limited per client IP)
/// - `GET  /shorturl/{short_url}`   - Redirect to the original URL
pub fn shorturl_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shorturl",
            post(shorten_handler).layer(rate_limit::shorten_layer()),
        )
        .route("/shorturl/{short_url}", get(redirect_handler))
}
