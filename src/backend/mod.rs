//! Backend Module
//!
//! All server-side code for the Youter API: an Axum HTTP server over a
//! SQLite database serving users, videos, tweets, comments, likes,
//! subscriptions, playlists and a channel dashboard.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, database pool, application state, startup
//! - **`routes`** - Router assembly and per-resource route tables
//! - **`auth`** - Users, password hashing, JWT sessions, account handlers
//! - **`middleware`** - Access token verification
//! - **`error`** - Backend error type and its HTTP rendering
//! - **`extract`** - JSON, query and path extractors with envelope rejections
//! - **`feed`** - Query fragments shared by the composite views
//! - **`videos`**, **`tweets`**, **`comments`**, **`likes`**,
//!   **`subscriptions`**, **`playlists`**, **`dashboard`** - resources
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - Binary entry point
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Users and sessions
//! ├── middleware/     - Request middleware
//! ├── error/          - Error types
//! ├── extract.rs      - Request extractors
//! ├── response.rs     - Envelope rendering
//! ├── feed.rs         - Shared query fragments
//! └── <resource>/     - types.rs, db.rs, handlers.rs per resource
//! ```
//!
//! # Error Handling
//!
//! Handlers return `BackendResult<ApiResponse<T>>`. Both sides render as the
//! `{ statuscode, data, message, success }` envelope with the HTTP status
//! equal to `statuscode`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Request extractors
pub mod extract;

/// Response envelope rendering
pub mod response;

/// Shared query fragments for composite views
pub mod feed;

/// Videos
pub mod videos;

/// Tweets
pub mod tweets;

/// Comments on videos and tweets
pub mod comments;

/// Likes on videos, comments and tweets
pub mod likes;

/// Channel subscriptions and the subscription feed
pub mod subscriptions;

/// Playlists
pub mod playlists;

/// Channel dashboard
pub mod dashboard;

pub use error::BackendError;
pub use server::create_app;
