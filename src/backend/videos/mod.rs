//! Videos Module
//!
//! Video uploads (as media URLs), the paginated video feed, publish state
//! and view counting.
//!
//! # Module Structure
//!
//! ```text
//! videos/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Rows, views, request bodies, sort options
//! ├── db.rs        - Queries, including the shared video feed projection
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod db;
pub mod handlers;
pub mod types;

pub use types::{Video, VideoSummary, VideoView};
