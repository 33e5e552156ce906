//! Likes Module
//!
//! Like toggles for videos, comments and tweets, and the requester's liked
//! videos.

pub mod db;
pub mod handlers;

pub use handlers::LikeStatus;
