//! Authentication test helpers
//!
//! Provides utilities for registering test users through the API and
//! logging them in.

use axum::http::{HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};
use uuid::Uuid;

/// Password given to every test user
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Test user credentials
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestUser {
    pub fn uuid(&self) -> Uuid {
        Uuid::parse_str(&self.id).expect("Test user id is not a UUID")
    }
}

/// Registration body for `username`
pub fn registration(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "fullName": format!("{username} tester"),
        "password": TEST_PASSWORD,
        "avatar": format!("https://cdn.example.com/{username}.png")
    })
}

/// Register a user and return the raw response
pub async fn register_user(server: &TestServer, username: &str) -> TestResponse {
    server
        .post("/api/v1/users/register")
        .json(&registration(username))
        .await
}

/// Log in by username with the given password
pub async fn login_user(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/api/v1/users/login")
        .json(&json!({ "username": username, "password": password }))
        .await
}

/// Register and log in a user, returning its credentials
pub async fn create_test_user(server: &TestServer, username: &str) -> TestUser {
    register_user(server, username)
        .await
        .assert_status(StatusCode::CREATED);

    let response = login_user(server, username, TEST_PASSWORD).await;
    response.assert_status_ok();
    let body: Value = response.json();

    TestUser {
        id: body["data"]["user"]["_id"]
            .as_str()
            .expect("Login response has no user id")
            .to_string(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: TEST_PASSWORD.to_string(),
        access_token: body["data"]["accessToken"]
            .as_str()
            .expect("Login response has no access token")
            .to_string(),
        refresh_token: body["data"]["refreshToken"]
            .as_str()
            .expect("Login response has no refresh token")
            .to_string(),
    }
}

/// Create authorization header value
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("Token is not a valid header value")
}
