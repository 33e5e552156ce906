//! Tweets Module
//!
//! Short text posts with owner profile, like and comment counts.

pub mod db;
pub mod handlers;
pub mod types;

pub use types::{Tweet, TweetView};
