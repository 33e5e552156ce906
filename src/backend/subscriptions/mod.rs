//! Subscriptions Module
//!
//! Channel subscriptions between users and the feeds built on them.
//!
//! # Module Structure
//!
//! ```text
//! subscriptions/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Response shapes, query options, feed merging
//! ├── db.rs        - Toggle transaction and aggregation queries
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod db;
pub mod handlers;
pub mod types;

pub use types::{FeedItem, SubscriptionStatus};
