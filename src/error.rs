//! Application error taxonomy and its HTTP representation.
//!
//! Every failure in the shortening and resolution paths collapses into one of
//! three kinds:
//!
//! | Kind | HTTP status | Body |
//! |------|-------------|------|
//! | [`AppError::InvalidUrl`] | `200 OK` | `{"error": "invalid url"}` |
//! | [`AppError::NotFound`] | `200 OK` | `{"error": "No short URL found"}` |
//! | [`AppError::Store`] | `500 Internal Server Error` | `{"error": "Database error"}` |
//!
//! The `200 OK` on logical errors is part of the public API contract that
//! existing clients depend on. The internal `reason`/`message` fields are only
//! ever written to logs, never to responses.

use axum::{
    Json,
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::utils::db_error::is_unique_violation_on_code;

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted URL is malformed or its host does not resolve.
    #[error("invalid url")]
    InvalidUrl { reason: String },

    /// No mapping exists for the requested code, or the code is malformed.
    #[error("No short URL found")]
    NotFound { code: String },

    /// Persistence, connectivity or allocation failure.
    #[error("Database error")]
    Store { message: String },
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Internal detail for logging. Never sent to clients.
    pub fn detail(&self) -> &str {
        match self {
            AppError::InvalidUrl { reason } => reason,
            AppError::NotFound { code } => code,
            AppError::Store { message } => message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidUrl { reason } => {
                tracing::debug!(%reason, "Rejected URL");
                StatusCode::OK
            }
            AppError::NotFound { code } => {
                tracing::debug!(%code, "Short code not found");
                StatusCode::OK
            }
            AppError::Store { message } => {
                tracing::error!(%message, "Store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: match self {
                AppError::InvalidUrl { .. } => "invalid url",
                AppError::NotFound { .. } => "No short URL found",
                AppError::Store { .. } => "Database error",
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Undecodable submissions (wrong content type, duplicate or malformed fields)
/// are reported like any other invalid URL.
impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::invalid_url(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::invalid_url(e.to_string())
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if is_unique_violation_on_code(&e) {
        return AppError::store("Short code already persisted");
    }

    if let Some(db) = e.as_database_error() {
        return AppError::store(format!(
            "Database error (constraint: {:?}): {}",
            db.constraint(),
            db.message()
        ));
    }

    AppError::store(e.to_string())
}
