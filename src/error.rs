//! Application error type shared across all layers.
//!
//! Every error is rendered as `{"error": {"code", "message", "details"}}`
//! with the matching HTTP status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Serialized error payload wrapper.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error details included in responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Forbidden { message: String, details: Value },
    NotFound { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                message,
                details,
            ),
            AppError::Forbidden { message, details } => {
                (StatusCode::FORBIDDEN, "forbidden", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps low-level database errors to the API error model.
///
/// Unique-constraint violations surface as 400 responses: a duplicate
/// record is a request problem, not a server one.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::bad_request(
                "Record already exists",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!(error = %e, "Database error");
    AppError::internal("Database error", json!({}))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}
