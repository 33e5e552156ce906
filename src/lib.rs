//! Youter - Video and Microblogging Backend
//!
//! A REST API for a video sharing and microblogging platform: user accounts
//! with JWT sessions, videos with watch history, tweets, comments, likes,
//! channel subscriptions with a subscription feed, playlists, and a channel
//! dashboard.
//!
//! # Module Structure
//!
//! - **`shared`** - Types independent of the HTTP layer
//!   - Response envelope, pagination, validation helpers, error type
//!
//! - **`backend`** - Axum server over SQLite
//!   - Routes under `/api/v1`, auth middleware, resource handlers
//!
//! # Usage
//!
//! ```rust,no_run
//! use youter::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
