//! Subscription API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::assert_api_error;
use crate::common::{create_test_user, TestApp};

#[tokio::test]
async fn test_toggle_subscription_twice_restores_state() {
    let app = TestApp::new().await;
    let fan = create_test_user(&app.server, "alice").await;
    let channel = create_test_user(&app.server, "bob").await;
    let toggle = format!("/api/v1/subscriptions/c/{}", channel.id);

    let before: Value = app.get(&toggle, &fan).await.json();
    assert_eq!(before["data"]["totalSubscribers"], 0);

    let on: Value = app.post(&toggle, &fan).await.json();
    assert_eq!(on["data"]["isSubscribed"], true);
    assert_eq!(on["message"], "Subscribed successfully");

    let during: Value = app.get(&toggle, &fan).await.json();
    assert_eq!(during["data"]["totalSubscribers"], 1);
    assert_eq!(during["data"]["subscribers"][0]["_id"], fan.id);
    assert_eq!(during["data"]["subscribers"][0]["username"], "alice");

    let off: Value = app.post(&toggle, &fan).await.json();
    assert_eq!(off["data"]["isSubscribed"], false);

    let after: Value = app.get(&toggle, &fan).await.json();
    assert_eq!(after["data"], before["data"]);
}

#[tokio::test]
async fn test_cannot_subscribe_to_self_or_unknown_channel() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.server, "alice").await;

    let own = app
        .post(&format!("/api/v1/subscriptions/c/{}", user.id), &user)
        .await;
    assert_api_error!(
        own,
        StatusCode::BAD_REQUEST,
        "You cannot subscribe to your own channel"
    );

    let unknown = app
        .post(
            &format!("/api/v1/subscriptions/c/{}", uuid::Uuid::new_v4()),
            &user,
        )
        .await;
    assert_api_error!(unknown, StatusCode::NOT_FOUND, "Channel not found");
}

#[tokio::test]
async fn test_subscribed_channels_with_latest_video() {
    let app = TestApp::new().await;
    let fan = create_test_user(&app.server, "alice").await;
    let quiet = create_test_user(&app.server, "bob").await;
    let busy = create_test_user(&app.server, "carol").await;
    app.publish_video(&busy, "older").await;
    app.publish_video(&busy, "newest").await;

    let empty: Value = app
        .get(&format!("/api/v1/subscriptions/u/{}", fan.id), &fan)
        .await
        .json();
    assert_eq!(empty["data"]["totalSubscriptions"], 0);
    assert_eq!(empty["message"], "No channels subscribed yet");

    app.post(&format!("/api/v1/subscriptions/c/{}", busy.id), &fan)
        .await
        .assert_status_ok();
    app.post(&format!("/api/v1/subscriptions/c/{}", quiet.id), &fan)
        .await
        .assert_status_ok();

    let body: Value = app
        .get(&format!("/api/v1/subscriptions/u/{}", fan.id), &fan)
        .await
        .json();
    assert_eq!(body["data"]["totalSubscriptions"], 2);

    let channels = body["data"]["channels"].as_array().unwrap();
    assert_eq!(channels[0]["channelId"], quiet.id);
    assert!(channels[0]["latestVideo"].is_null());
    assert_eq!(channels[1]["channelId"], busy.id);
    assert_eq!(channels[1]["subscribersCount"], 1);
    assert_eq!(channels[1]["latestVideo"]["title"], "newest");
}

#[tokio::test]
async fn test_suggested_channels_exclude_self_and_subscribed() {
    let app = TestApp::new().await;
    let me = create_test_user(&app.server, "alice").await;
    let followed = create_test_user(&app.server, "bob").await;
    let popular = create_test_user(&app.server, "carol").await;
    let fresh = create_test_user(&app.server, "dave").await;

    app.post(&format!("/api/v1/subscriptions/c/{}", followed.id), &me)
        .await
        .assert_status_ok();
    app.post(&format!("/api/v1/subscriptions/c/{}", popular.id), &fresh)
        .await
        .assert_status_ok();
    app.post(&format!("/api/v1/subscriptions/c/{}", popular.id), &followed)
        .await
        .assert_status_ok();
    app.publish_video(&popular, "one").await;
    app.publish_video(&popular, "two").await;

    let body: Value = app.get("/api/v1/subscriptions/suggested", &me).await.json();
    let channels = body["data"]["channels"].as_array().unwrap();
    let ids: Vec<&str> = channels
        .iter()
        .map(|c| c["_id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec![popular.id.as_str(), fresh.id.as_str()]);
    assert_eq!(body["data"]["totalSuggested"], 2);
    assert_eq!(channels[0]["subscribersCount"], 2);
    assert_eq!(channels[0]["videosCount"], 2);
    assert_eq!(channels[0]["latestVideo"]["title"], "two");

    let limited: Value = app
        .get("/api/v1/subscriptions/suggested?limit=1", &me)
        .await
        .json();
    assert_eq!(limited["data"]["totalSuggested"], 1);
}

#[tokio::test]
async fn test_subscription_content_feed() {
    let app = TestApp::new().await;
    let fan = create_test_user(&app.server, "alice").await;
    let channel = create_test_user(&app.server, "bob").await;
    let stranger = create_test_user(&app.server, "carol").await;

    app.post(&format!("/api/v1/subscriptions/c/{}", channel.id), &fan)
        .await
        .assert_status_ok();

    app.publish_video(&channel, "v1").await;
    app.create_tweet(&channel, "t1").await;
    app.publish_video(&channel, "v2").await;
    app.create_tweet(&channel, "t2").await;
    app.publish_video(&stranger, "unrelated").await;

    let all: Value = app
        .get("/api/v1/subscriptions/content", &fan)
        .await
        .json();
    assert_eq!(all["data"]["totalContent"], 4);
    let kinds: Vec<&str> = all["data"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["contentType"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["tweet", "video", "tweet", "video"]);
    assert_eq!(all["data"]["content"][0]["content"], "t2");
    assert_eq!(all["data"]["content"][1]["title"], "v2");

    // Half of the limit per kind when mixing
    let limited: Value = app
        .get("/api/v1/subscriptions/content?limit=2", &fan)
        .await
        .json();
    let items = limited["data"]["content"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["content"], "t2");
    assert_eq!(items[1]["title"], "v2");

    let videos: Value = app
        .get("/api/v1/subscriptions/content?type=videos", &fan)
        .await
        .json();
    assert_eq!(videos["data"]["totalContent"], 2);
    assert!(videos["data"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["contentType"] == "video"));

    let bad_type = app
        .get("/api/v1/subscriptions/content?type=podcasts", &fan)
        .await;
    assert_api_error!(bad_type, StatusCode::BAD_REQUEST);
}
