//! Backend Error Module
//!
//! This module defines the application error used by every handler and
//! database helper, and its conversion into the JSON error envelope.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse and extractor rejection conversions
//! ```
//!
//! Handlers return `Result<_, BackendError>`; axum turns the error into a
//! response with the matching status code and `success: false`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;

/// Result alias used across the backend
pub type BackendResult<T> = Result<T, BackendError>;
