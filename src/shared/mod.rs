//! Shared Module
//!
//! Wire-level types that do not depend on the HTTP framework or the
//! database: the response envelope, pagination arithmetic and request
//! validation.

/// Validation error types
pub mod error;

/// `{ statuscode, data, message, success }` envelope
pub mod response;

/// Page/limit handling and paginated results
pub mod pagination;

/// Field validation helpers
pub mod validation;

pub use error::SharedError;
pub use pagination::{PageParams, Paginated};
pub use response::ApiResponse;
