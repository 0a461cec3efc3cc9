//! Unified error handling with Sentry integration.
//!
//! All route handlers return `Result<T, AppError>`. Every error becomes a JSON
//! body with a `message` field; allergen validation errors also carry
//! `invalidFields`. Server-side faults are captured to Sentry and logged, and
//! the caller only sees a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use allergen_menu_core::ValidationError;

use crate::db::RepositoryError;
use crate::services::ServiceError;

/// Message returned for any missing menu item.
pub const NOT_FOUND_MESSAGE: &str = "Menu item not found";

/// Message returned when a request handler panics.
pub const PANIC_MESSAGE: &str = "Something went wrong!";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Request payload failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::NotFound(NOT_FOUND_MESSAGE.to_string()),
            ServiceError::Repository(e) => Self::Database(e),
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "invalidFields", skip_serializing_if = "Option::is_none")]
    pub invalid_fields: Option<Vec<String>>,
}

impl ErrorBody {
    /// Error body with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            invalid_fields: None,
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match self {
            Self::Database(_) => ErrorBody::new("Internal server error"),
            Self::Validation(err) => ErrorBody {
                message: err.to_string(),
                invalid_fields: err.invalid_fields().map(<[String]>::to_vec),
            },
            Self::NotFound(message) | Self::BadRequest(message) => ErrorBody::new(message),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
