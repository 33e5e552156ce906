//! Shared Error Types
//!
//! This module defines the validation errors raised while checking request
//! payloads and query parameters, before any database work happens.
//!
//! # Error Categories
//!
//! - `ValidationError` - A field is missing, blank or malformed
//! - `InvalidParameter` - A query/path parameter has an unsupported value
//!
//! # Usage
//!
//! ```rust
//! use youter::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "Content is required");
//! assert_eq!(error.message(), "Content is required");
//! ```
use thiserror::Error;

/// Request validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A body field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A query or path parameter has a value the endpoint does not support
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter {
        /// Parameter name as it appears in the URL
        param: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// The client-facing message, without the field prefix
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
            Self::InvalidParameter { message, .. } => message,
        }
    }
}
