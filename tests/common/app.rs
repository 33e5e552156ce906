//! Application test fixture
//!
//! Builds the real router over a fresh in-memory SQLite database. Each
//! `TestApp` owns its own database, so tests never see each other's rows.

use axum::http::header::AUTHORIZATION;
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use youter::backend::routes::create_router;
use youter::backend::server::config::{
    load_in_memory_database, AuthConfig, ServerConfig, MIN_HASH_COST,
};
use youter::backend::server::AppState;

use super::auth_helpers::{bearer, TestUser};

/// Configuration used by every test server: defaults with the cheapest
/// bcrypt cost
pub fn test_config() -> ServerConfig {
    ServerConfig {
        auth: AuthConfig {
            hash_cost: MIN_HASH_COST,
            ..AuthConfig::default()
        },
        ..ServerConfig::default()
    }
}

/// Test server plus direct access to its database
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Create a new application fixture
    pub async fn new() -> Self {
        let pool = load_in_memory_database()
            .await
            .expect("Failed to create in-memory database");
        let app = create_router(AppState::new(pool.clone(), test_config()));
        let server = TestServer::new(app).expect("Failed to create test server");
        Self { server, pool }
    }

    pub fn get(&self, path: &str, user: &TestUser) -> TestRequest {
        self.server
            .get(path)
            .add_header(AUTHORIZATION, bearer(&user.access_token))
    }

    pub fn post(&self, path: &str, user: &TestUser) -> TestRequest {
        self.server
            .post(path)
            .add_header(AUTHORIZATION, bearer(&user.access_token))
    }

    pub fn patch(&self, path: &str, user: &TestUser) -> TestRequest {
        self.server
            .patch(path)
            .add_header(AUTHORIZATION, bearer(&user.access_token))
    }

    pub fn delete(&self, path: &str, user: &TestUser) -> TestRequest {
        self.server
            .delete(path)
            .add_header(AUTHORIZATION, bearer(&user.access_token))
    }

    /// Publish a video as `user` and return the created video JSON
    pub async fn publish_video(&self, user: &TestUser, title: &str) -> Value {
        let response = self
            .post("/api/v1/videos", user)
            .json(&json!({
                "title": title,
                "description": format!("{title} description"),
                "videoFile": format!("https://cdn.example.com/{title}.mp4"),
                "thumbnail": format!("https://cdn.example.com/{title}.png"),
                "duration": 42.5
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    /// Post a tweet as `user` and return the tweet view JSON
    pub async fn create_tweet(&self, user: &TestUser, content: &str) -> Value {
        let response = self
            .post("/api/v1/tweets", user)
            .json(&json!({ "content": content }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }
}
