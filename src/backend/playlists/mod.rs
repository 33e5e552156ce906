//! Playlists Module
//!
//! Named, ordered collections of videos owned by a user.

pub mod db;
pub mod handlers;
pub mod types;

pub use types::{Playlist, PlaylistSummary, PlaylistView};
