//! Unified error handling
//!
//! [`AppError`] is the single error type crossing the API boundary. Domain
//! failures keep their specific message (the caller can correct them);
//! infrastructure failures are logged server-side and surfaced with a
//! generic message.
//!
//! # Error code scheme
//!
//! | Code | Category |
//! |-------|---------|
//! | E0xxx | Validation / business rule |
//! | E1xxx | Credentials |
//! | E2xxx | Permission |
//! | E3xxx | Token |
//! | E9xxx | System |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ========== Authorization errors (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not enough stock for {name}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    #[error("Invoice rendering failed: {0}")]
    Render(String),

    #[error("Document upload failed: {0}")]
    Upload(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error envelope: `{"code": "E0002", "message": "..."}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "E3001", self.to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E1002", self.to_string())
            }
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003", self.to_string()),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "E3002", self.to_string()),

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.clone()),

            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "E0003", self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),

            // Domain failures of the order transaction: client-correctable,
            // reported with their specific message (HTTP 400, not 500).
            AppError::InsufficientStock { .. } => {
                (StatusCode::BAD_REQUEST, "E0005", self.to_string())
            }
            AppError::Render(_) => (StatusCode::BAD_REQUEST, "E0007", self.to_string()),
            AppError::Upload(_) => (StatusCode::BAD_REQUEST, "E0008", self.to_string()),

            // Infrastructure faults: log the detail, return a generic message.
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<crate::invoice::RenderError> for AppError {
    fn from(e: crate::invoice::RenderError) -> Self {
        AppError::Render(e.to_string())
    }
}

impl From<crate::storage::StoreError> for AppError {
    fn from(e: crate::storage::StoreError) -> Self {
        AppError::Upload(e.to_string())
    }
}

// ========== Helper constructors ==========

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

/// Result type for handlers and services
pub type AppResult<T> = Result<T, AppError>;
