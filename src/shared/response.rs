//! Response Envelope
//!
//! Every endpoint answers with the same JSON shape:
//!
//! ```json
//! { "statuscode": 200, "data": { ... }, "message": "Videos fetched successfully", "success": true }
//! ```
//!
//! `success` is derived from the status code, so a body can never claim
//! success while carrying an error status.

use serde::{Deserialize, Serialize};

/// JSON envelope wrapping every response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code, mirrored in the body
    pub statuscode: u16,
    /// Payload (`null` for errors)
    pub data: T,
    /// Human-readable outcome
    pub message: String,
    /// `true` for status codes below 400
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(statuscode: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            statuscode,
            data,
            message: message.into(),
            success: statuscode < 400,
        }
    }

    /// 200 OK
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(200, data, message)
    }

    /// 201 Created
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(201, data, message)
    }
}

impl ApiResponse<Option<()>> {
    /// Envelope with `data: null`
    pub fn empty(statuscode: u16, message: impl Into<String>) -> Self {
        Self::new(statuscode, None, message)
    }
}
