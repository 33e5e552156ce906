//! Authentication Module
//!
//! User accounts, JWT sessions and the `/api/v1/users` handlers.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - Access and refresh token signing and validation
//! - **`handlers`** - HTTP handlers for account endpoints
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access tokens are short lived and stateless
//! - Refresh tokens are signed with a separate secret and stored per user,
//!   so rotation and logout revoke the previous one
//! - Password hashes and refresh tokens never appear in responses

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use handlers::types::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
pub use users::User;
