/**
 * Backend Error Types
 *
 * This module defines the single application error raised by handlers and
 * database helpers. Every variant maps to an HTTP status code and a
 * client-facing message.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised explicitly by handlers with a status and message:
 * - Missing or blank required fields
 * - Ownership check failures
 * - Resources that do not exist
 *
 * ## Wrapped Errors
 *
 * Converted with `?` from the libraries the backend calls:
 * - `sqlx::Error` - database failures, unique/foreign-key violations
 * - `jsonwebtoken` errors - invalid or expired tokens
 * - `bcrypt` errors - password hashing failures
 * - `SharedError` - request validation failures
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use youter::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Video not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Request validation error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Token signing or verification error
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    HashError(#[from] bcrypt::BcryptError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 Forbidden, used by owner checks
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - `DatabaseError` - 404 for missing rows and dangling references,
    ///   409 for unique violations, 500 otherwise
    /// - `TokenError` - 401 Unauthorized
    /// - `HashError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(err) => match err {
                sqlx::Error::RowNotFound => StatusCode::NOT_FOUND,
                sqlx::Error::Database(db) if db.is_unique_violation() => StatusCode::CONFLICT,
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => StatusCode::NOT_FOUND,
                sqlx::Error::Database(db) if db.is_check_violation() => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::TokenError(_) => StatusCode::UNAUTHORIZED,
            Self::HashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal failures get a generic message; details only go to the log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.message().to_string(),
            Self::DatabaseError(err) => match self.status_code() {
                StatusCode::NOT_FOUND if matches!(err, sqlx::Error::RowNotFound) => {
                    "Resource not found".to_string()
                }
                StatusCode::NOT_FOUND => "Referenced resource does not exist".to_string(),
                StatusCode::CONFLICT => "Resource already exists".to_string(),
                StatusCode::BAD_REQUEST => "Invalid reference combination".to_string(),
                _ => "Internal server error".to_string(),
            },
            Self::TokenError(_) => "Invalid or expired token".to_string(),
            Self::HashError(_) => "Internal server error".to_string(),
        }
    }
}
