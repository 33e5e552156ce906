//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers, fallback
//! └── api_routes.rs   - Per-resource route tables under /api/v1
//! ```

/// Main router creation
pub mod router;

/// Per-resource route tables
pub mod api_routes;

pub use router::{create_router, API_PREFIX};
