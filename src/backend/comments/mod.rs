//! Comments Module
//!
//! Comments on videos and tweets. A comment references exactly one of the
//! two; the schema enforces it with a CHECK constraint.

pub mod db;
pub mod handlers;
pub mod types;

pub use types::{Comment, CommentTarget, CommentView};
