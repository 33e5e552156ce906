//! API integration tests
//!
//! Integration tests for all API endpoints

mod dashboard_test;
mod playlists_test;
mod subscriptions_test;
mod tweets_test;
mod videos_test;
