//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorturl/{short_url}`
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL.
///
/// # Errors
///
/// - `200 {"error": "No short URL found"}` for unknown or malformed codes
/// - `500 {"error": "Database error"}` on store failure
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.resolver.resolve(&short_url).await?;

    Ok(found(&original_url))
}

/// Builds a `302 Found` response.
///
/// Stored URLs are kept byte-for-byte as submitted and may contain characters
/// that are not allowed in a header value. Those are sent in their
/// percent-encoded form.
fn found(location: &str) -> Response {
    let value = HeaderValue::from_str(location).or_else(|_| {
        debug!("Percent-encoding Location for {}", location);
        url::Url::parse(location)
            .map_err(|_| ())
            .and_then(|u| HeaderValue::from_str(u.as_str()).map_err(|_| ()))
    });

    match value {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        // unreachable for validated URLs; the url crate always serializes to ASCII
        Err(()) => AppError::store(format!("Stored URL is not a valid location: {location}"))
            .into_response(),
    }
}
