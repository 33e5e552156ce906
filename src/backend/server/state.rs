/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The SQLite connection pool
 * - The loaded server configuration (token secrets, lifetimes, limits)
 *
 * Both are cheap to clone: the pool is reference counted internally and the
 * configuration sits behind an `Arc`.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only what they use:
 *
 * ```rust,ignore
 * async fn handler(State(pool): State<SqlitePool>) { /* ... */ }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::server::config::{AuthConfig, ServerConfig};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// SQLite database connection pool
    pub db_pool: SqlitePool,

    /// Server configuration loaded at startup
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: ServerConfig) -> Self {
        Self {
            db_pool,
            config: Arc::new(config),
        }
    }

    /// Token secrets, lifetimes and hash cost
    pub fn auth(&self) -> &AuthConfig {
        &self.config.auth
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
