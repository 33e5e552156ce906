//! Playlist API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::assert_api_error;
use crate::common::{create_test_user, TestApp, TestUser};

async fn create_playlist(app: &TestApp, user: &TestUser, name: &str) -> String {
    let response = app
        .post("/api/v1/playlist", user)
        .json(&json!({ "name": name, "description": format!("{name} picks") }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"]["_id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_create_playlist() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;

    let response = app
        .post("/api/v1/playlist", &user)
        .json(&json!({ "name": "Favourites" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "Favourites");
    assert_eq!(body["data"]["description"], "");
    assert_eq!(body["data"]["owner"], user.id);

    let nameless = app
        .post("/api/v1/playlist", &user)
        .json(&json!({ "description": "no name" }))
        .await;
    assert_api_error!(nameless, StatusCode::BAD_REQUEST, "Playlist name is required");
}

#[tokio::test]
async fn test_add_and_remove_videos() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;
    let playlist_id = create_playlist(&app, &user, "mix").await;
    let first = app.publish_video(&user, "first").await;
    let second = app.publish_video(&user, "second").await;
    let first_id = first["_id"].as_str().unwrap();
    let second_id = second["_id"].as_str().unwrap();

    for video_id in [first_id, second_id, first_id] {
        app.patch(
            &format!("/api/v1/playlist/add/{video_id}/{playlist_id}"),
            &user,
        )
        .await
        .assert_status_ok();
    }

    let view: Value = app
        .get(&format!("/api/v1/playlist/{playlist_id}"), &user)
        .await
        .json();
    assert_eq!(view["data"]["totalVideos"], 2);
    assert_eq!(view["data"]["owner"]["username"], "alice");
    assert_eq!(view["data"]["videos"][0]["title"], "first");
    assert_eq!(view["data"]["videos"][1]["title"], "second");

    let response = app
        .patch(
            &format!("/api/v1/playlist/remove/{first_id}/{playlist_id}"),
            &user,
        )
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["totalVideos"], 1);
    assert_eq!(body["data"]["videos"][0]["title"], "second");

    let again = app
        .patch(
            &format!("/api/v1/playlist/remove/{first_id}/{playlist_id}"),
            &user,
        )
        .await;
    assert_api_error!(again, StatusCode::NOT_FOUND, "Video is not in this playlist");
}

#[tokio::test]
async fn test_playlist_hides_unpublished_videos() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;
    let playlist_id = create_playlist(&app, &user, "mix").await;
    let video = app.publish_video(&user, "draft").await;
    let video_id = video["_id"].as_str().unwrap();

    app.patch(
        &format!("/api/v1/playlist/add/{video_id}/{playlist_id}"),
        &user,
    )
    .await
    .assert_status_ok();
    app.patch(&format!("/api/v1/videos/toggle/publish/{video_id}"), &user)
        .await
        .assert_status_ok();

    let view: Value = app
        .get(&format!("/api/v1/playlist/{playlist_id}"), &user)
        .await
        .json();
    assert_eq!(view["data"]["totalVideos"], 0);
}

#[tokio::test]
async fn test_only_owner_modifies_playlist() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.server, "alice").await;
    let intruder = create_test_user(&app.server, "mallory").await;
    let playlist_id = create_playlist(&app, &owner, "mine").await;
    let video = app.publish_video(&intruder, "spam").await;
    let path = format!("/api/v1/playlist/{playlist_id}");

    let rename = app
        .patch(&path, &intruder)
        .json(&json!({ "name": "hijacked" }))
        .await;
    assert_api_error!(
        rename,
        StatusCode::FORBIDDEN,
        "You are not allowed to modify this playlist"
    );

    let add = app
        .patch(
            &format!(
                "/api/v1/playlist/add/{}/{playlist_id}",
                video["_id"].as_str().unwrap()
            ),
            &intruder,
        )
        .await;
    assert_api_error!(add, StatusCode::FORBIDDEN);
    assert_api_error!(app.delete(&path, &intruder).await, StatusCode::FORBIDDEN);

    // Anyone may look at it
    app.get(&path, &intruder).await.assert_status_ok();
}

#[tokio::test]
async fn test_update_list_and_delete_playlists() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;
    let other = create_test_user(&app.server, "bob").await;
    let older = create_playlist(&app, &user, "older").await;
    let newer = create_playlist(&app, &user, "newer").await;

    let response = app
        .patch(&format!("/api/v1/playlist/{older}"), &user)
        .json(&json!({ "description": "updated" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "older");
    assert_eq!(body["data"]["description"], "updated");

    let list: Value = app
        .get(&format!("/api/v1/playlist/user/{}", user.id), &other)
        .await
        .json();
    let ids: Vec<&str> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![newer.as_str(), older.as_str()]);

    app.delete(&format!("/api/v1/playlist/{newer}"), &user)
        .await
        .assert_status_ok();
    assert_api_error!(
        app.get(&format!("/api/v1/playlist/{newer}"), &user).await,
        StatusCode::NOT_FOUND,
        "Playlist not found"
    );
}
