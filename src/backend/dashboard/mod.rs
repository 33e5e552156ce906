//! Dashboard Module
//!
//! Channel statistics and the channel owner's full video list, including
//! unpublished videos.

pub mod db;
pub mod handlers;

pub use db::ChannelStats;
