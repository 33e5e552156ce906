//! Tweet API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::assert_api_error;
use crate::common::{create_test_user, TestApp};

#[tokio::test]
async fn test_create_tweet_populates_owner() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;

    let tweet = app.create_tweet(&user, "  hello world  ").await;

    assert_eq!(tweet["content"], "hello world");
    assert_eq!(tweet["owner"]["_id"], user.id);
    assert_eq!(tweet["owner"]["username"], "alice");
    assert_eq!(tweet["likesCount"], 0);
    assert_eq!(tweet["commentsCount"], 0);
    assert_eq!(tweet["isLiked"], false);
}

#[tokio::test]
async fn test_create_tweet_requires_content() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;

    let response = app
        .post("/api/v1/tweets", &user)
        .json(&json!({ "content": "   " }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "Content is required");
}

#[tokio::test]
async fn test_list_tweets_newest_first() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.server, "alice").await;
    let bob = create_test_user(&app.server, "bob").await;
    app.create_tweet(&alice, "first").await;
    app.create_tweet(&bob, "second").await;
    app.create_tweet(&alice, "third").await;

    let all: Value = app.get("/api/v1/tweets", &bob).await.json();
    let contents: Vec<&str> = all["data"]["tweets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["third", "second", "first"]);

    let alices: Value = app
        .get(&format!("/api/v1/tweets/user/{}", alice.id), &bob)
        .await
        .json();
    let contents: Vec<&str> = alices["data"]["tweets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["third", "first"]);

    let unknown = app
        .get(&format!("/api/v1/tweets/user/{}", uuid::Uuid::new_v4()), &bob)
        .await;
    assert_api_error!(unknown, StatusCode::NOT_FOUND, "User not found");
}

#[tokio::test]
async fn test_get_tweet_by_id() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;
    let tweet = app.create_tweet(&user, "lookup").await;

    let response = app
        .get(
            &format!("/api/v1/tweets/{}", tweet["_id"].as_str().unwrap()),
            &user,
        )
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["content"], "lookup");

    let missing = app
        .get(&format!("/api/v1/tweets/{}", uuid::Uuid::new_v4()), &user)
        .await;
    assert_api_error!(missing, StatusCode::NOT_FOUND, "Tweet not found");
}

#[tokio::test]
async fn test_only_owner_updates_and_deletes_tweet() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.server, "alice").await;
    let intruder = create_test_user(&app.server, "mallory").await;
    let tweet = app.create_tweet(&owner, "original").await;
    let path = format!("/api/v1/tweets/{}", tweet["_id"].as_str().unwrap());

    let update = app
        .patch(&path, &intruder)
        .json(&json!({ "content": "defaced" }))
        .await;
    assert_api_error!(update, StatusCode::FORBIDDEN);
    assert_api_error!(app.delete(&path, &intruder).await, StatusCode::FORBIDDEN);

    let response = app
        .patch(&path, &owner)
        .json(&json!({ "content": "edited" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["content"], "edited");

    app.delete(&path, &owner).await.assert_status_ok();
    assert_api_error!(app.get(&path, &owner).await, StatusCode::NOT_FOUND);
}
