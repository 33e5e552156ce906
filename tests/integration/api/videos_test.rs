//! Video API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::assert_api_error;
use crate::common::{create_test_user, TestApp};

fn id(value: &Value) -> &str {
    value["_id"].as_str().expect("document has no _id")
}

#[tokio::test]
async fn test_publish_sets_owner_to_requester() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;

    let video = app.publish_video(&user, "intro").await;

    assert_eq!(video["owner"], user.id);
    assert_eq!(video["title"], "intro");
    assert_eq!(video["views"], 0);
    assert_eq!(video["isPublished"], true);
    assert_eq!(video["duration"], 42.5);
}

#[tokio::test]
async fn test_publish_requires_fields() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;

    let response = app
        .post("/api/v1/videos", &user)
        .json(&json!({
            "description": "no title",
            "videoFile": "https://cdn.example.com/v.mp4",
            "thumbnail": "https://cdn.example.com/t.png"
        }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "Title is required");

    let response = app
        .post("/api/v1/videos", &user)
        .json(&json!({
            "title": "negative",
            "description": "d",
            "videoFile": "https://cdn.example.com/v.mp4",
            "thumbnail": "https://cdn.example.com/t.png",
            "duration": -1.0
        }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_video_counts_views_and_populates_owner() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.server, "alice").await;
    let viewer = create_test_user(&app.server, "bob").await;
    let video = app.publish_video(&owner, "clip").await;
    let path = format!("/api/v1/videos/{}", id(&video));

    app.get(&path, &viewer).await.assert_status_ok();
    let response = app.get(&path, &viewer).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["views"], 2);
    assert_eq!(body["data"]["owner"]["_id"], owner.id);
    assert_eq!(body["data"]["owner"]["username"], "alice");
    assert_eq!(body["data"]["likesCount"], 0);
    assert_eq!(body["data"]["commentsCount"], 0);
    assert_eq!(body["data"]["isLiked"], false);
}

#[tokio::test]
async fn test_unknown_and_malformed_video_ids() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;

    let missing = app
        .get(&format!("/api/v1/videos/{}", uuid::Uuid::new_v4()), &user)
        .await;
    assert_api_error!(missing, StatusCode::NOT_FOUND, "Video not found");

    let malformed = app.get("/api/v1/videos/not-a-uuid", &user).await;
    assert_api_error!(malformed, StatusCode::BAD_REQUEST, "Invalid id in request path");
}

#[tokio::test]
async fn test_unpublished_video_visible_only_to_owner() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.server, "alice").await;
    let other = create_test_user(&app.server, "bob").await;
    let video = app.publish_video(&owner, "draft").await;

    let response = app
        .patch(&format!("/api/v1/videos/toggle/publish/{}", id(&video)), &owner)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["isPublished"], false);

    let path = format!("/api/v1/videos/{}", id(&video));
    assert_api_error!(app.get(&path, &other).await, StatusCode::NOT_FOUND);
    app.get(&path, &owner).await.assert_status_ok();

    let listing: Value = app.get("/api/v1/videos", &other).await.json();
    assert_eq!(listing["data"]["totalDocs"], 0);

    let response = app
        .patch(&format!("/api/v1/videos/toggle/publish/{}", id(&video)), &owner)
        .await;
    assert_eq!(response.json::<Value>()["data"]["isPublished"], true);
    app.get(&path, &other).await.assert_status_ok();
}

#[tokio::test]
async fn test_non_owner_cannot_modify_video() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.server, "alice").await;
    let intruder = create_test_user(&app.server, "mallory").await;
    let video = app.publish_video(&owner, "mine").await;
    let path = format!("/api/v1/videos/{}", id(&video));

    let update = app
        .patch(&path, &intruder)
        .json(&json!({ "title": "stolen" }))
        .await;
    assert_api_error!(
        update,
        StatusCode::FORBIDDEN,
        "You are not allowed to modify this video"
    );

    assert_api_error!(app.delete(&path, &intruder).await, StatusCode::FORBIDDEN);
    assert_api_error!(
        app.patch(&format!("/api/v1/videos/toggle/publish/{}", id(&video)), &intruder)
            .await,
        StatusCode::FORBIDDEN
    );

    let unchanged: Value = app.get(&path, &owner).await.json();
    assert_eq!(unchanged["data"]["title"], "mine");
}

#[tokio::test]
async fn test_owner_updates_and_deletes_video() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.server, "alice").await;
    let video = app.publish_video(&owner, "old").await;
    let path = format!("/api/v1/videos/{}", id(&video));

    let empty = app.patch(&path, &owner).json(&json!({})).await;
    assert_api_error!(empty, StatusCode::BAD_REQUEST);

    let response = app
        .patch(&path, &owner)
        .json(&json!({ "title": "new", "thumbnail": "https://cdn.example.com/n.png" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "new");
    assert_eq!(body["data"]["description"], "old description");
    assert_eq!(body["data"]["thumbnail"], "https://cdn.example.com/n.png");

    app.delete(&path, &owner).await.assert_status_ok();
    assert_api_error!(app.get(&path, &owner).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pagination_beyond_last_page() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;
    for n in 0..5 {
        app.publish_video(&user, &format!("video{n}")).await;
    }

    let first: Value = app
        .get("/api/v1/videos?page=1&limit=2", &user)
        .await
        .json();
    assert_eq!(first["data"]["docs"].as_array().unwrap().len(), 2);
    assert_eq!(first["data"]["totalDocs"], 5);
    assert_eq!(first["data"]["totalPages"], 3);
    assert_eq!(first["data"]["hasPrevPage"], false);
    assert_eq!(first["data"]["hasNextPage"], true);
    assert_eq!(first["data"]["nextPage"], 2);

    let last: Value = app
        .get("/api/v1/videos?page=3&limit=2", &user)
        .await
        .json();
    assert_eq!(last["data"]["docs"].as_array().unwrap().len(), 1);
    assert_eq!(last["data"]["hasNextPage"], false);
    assert_eq!(last["data"]["hasPrevPage"], true);

    let beyond: Value = app
        .get("/api/v1/videos?page=9&limit=2", &user)
        .await
        .json();
    assert!(beyond["data"]["docs"].as_array().unwrap().is_empty());
    assert_eq!(beyond["data"]["totalDocs"], 5);
    assert_eq!(beyond["data"]["hasNextPage"], false);
    assert_eq!(beyond["data"]["hasPrevPage"], true);
    assert!(beyond["data"]["nextPage"].is_null());
}

#[tokio::test]
async fn test_list_sorting_search_and_owner_filter() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.server, "alice").await;
    let bob = create_test_user(&app.server, "bob").await;
    app.publish_video(&alice, "banana").await;
    app.publish_video(&alice, "apple").await;
    app.publish_video(&bob, "cherry").await;

    let by_title: Value = app
        .get("/api/v1/videos?sortBy=title&sortType=asc", &alice)
        .await
        .json();
    let titles: Vec<&str> = by_title["data"]["docs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["apple", "banana", "cherry"]);

    let newest_first: Value = app.get("/api/v1/videos", &alice).await.json();
    assert_eq!(newest_first["data"]["docs"][0]["title"], "cherry");

    let search: Value = app.get("/api/v1/videos?query=BAN", &alice).await.json();
    assert_eq!(search["data"]["totalDocs"], 1);
    assert_eq!(search["data"]["docs"][0]["title"], "banana");

    let bobs: Value = app
        .get(&format!("/api/v1/videos?userId={}", bob.id), &alice)
        .await
        .json();
    assert_eq!(bobs["data"]["totalDocs"], 1);
    assert_eq!(bobs["data"]["docs"][0]["owner"]["username"], "bob");

    let bad_sort = app.get("/api/v1/videos?sortBy=password", &alice).await;
    assert_api_error!(bad_sort, StatusCode::BAD_REQUEST);
    let bad_order = app.get("/api/v1/videos?sortType=sideways", &alice).await;
    assert_api_error!(bad_order, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;
    app.publish_video(&user, "100% juice").await;
    app.publish_video(&user, "snake_case").await;
    app.publish_video(&user, "plain").await;

    let percent: Value = app.get("/api/v1/videos?query=%25", &user).await.json();
    assert_eq!(percent["data"]["totalDocs"], 1);
    assert_eq!(percent["data"]["docs"][0]["title"], "100% juice");

    let underscore: Value = app.get("/api/v1/videos?query=_", &user).await.json();
    assert_eq!(underscore["data"]["totalDocs"], 1);
    assert_eq!(underscore["data"]["docs"][0]["title"], "snake_case");
}
