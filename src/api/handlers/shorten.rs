//! Handler for the shortening endpoint.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenForm, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL submitted as a form field.
///
/// # Endpoint
///
/// `POST /api/shorturl` with `Content-Type: application/x-www-form-urlencoded`
///
/// # Request Body
///
/// ```text
/// url=https%3A%2F%2Fexample.com
/// ```
///
/// # Response
///
/// ```json
/// { "original_url": "https://example.com", "short_url": 1 }
/// ```
///
/// # Errors
///
/// - `200 {"error": "invalid url"}` if the URL is malformed or its host does not resolve,
///   or the body is not a decodable form
/// - `500 {"error": "Database error"}` if the mapping cannot be persisted
pub async fn shorten_handler(
    State(state): State<AppState>,
    form: Result<Form<ShortenForm>, FormRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Form(form) = form?;
    form.validate()?;

    let mapping = state.shortener.shorten(&form.url).await?;

    Ok(Json(mapping.into()))
}
