//! Dashboard API integration tests

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_user, TestApp};

#[tokio::test]
async fn test_channel_stats() {
    let app = TestApp::new().await;
    let creator = create_test_user(&app.server, "alice").await;
    let fan = create_test_user(&app.server, "bob").await;

    let empty: Value = app.get("/api/v1/dashboard/stats", &creator).await.json();
    assert_eq!(
        empty["data"],
        json!({
            "totalVideos": 0,
            "totalViews": 0,
            "totalSubscribers": 0,
            "totalLikes": 0,
            "totalTweets": 0
        })
    );

    let first = app.publish_video(&creator, "first").await;
    let second = app.publish_video(&creator, "second").await;
    app.create_tweet(&creator, "news").await;
    app.post(&format!("/api/v1/subscriptions/c/{}", creator.id), &fan)
        .await
        .assert_status_ok();

    for video in [&first, &second, &first] {
        app.get(
            &format!("/api/v1/videos/{}", video["_id"].as_str().unwrap()),
            &fan,
        )
        .await
        .assert_status_ok();
    }
    for video in [&first, &second] {
        app.post(
            &format!("/api/v1/like/toggle/v/{}", video["_id"].as_str().unwrap()),
            &fan,
        )
        .await
        .assert_status_ok();
    }
    // Tweet likes are not channel video likes
    let tweets: Value = app.get("/api/v1/tweets", &fan).await.json();
    app.post(
        &format!(
            "/api/v1/like/toggle/t/{}",
            tweets["data"]["tweets"][0]["_id"].as_str().unwrap()
        ),
        &fan,
    )
    .await
    .assert_status_ok();

    let stats: Value = app.get("/api/v1/dashboard/stats", &creator).await.json();
    assert_eq!(
        stats["data"],
        json!({
            "totalVideos": 2,
            "totalViews": 3,
            "totalSubscribers": 1,
            "totalLikes": 2,
            "totalTweets": 1
        })
    );
}

#[tokio::test]
async fn test_channel_videos_include_unpublished() {
    let app = TestApp::new().await;
    let creator = create_test_user(&app.server, "alice").await;
    let other = create_test_user(&app.server, "bob").await;
    app.publish_video(&creator, "public").await;
    let draft = app.publish_video(&creator, "draft").await;
    app.publish_video(&other, "not mine").await;

    app.patch(
        &format!(
            "/api/v1/videos/toggle/publish/{}",
            draft["_id"].as_str().unwrap()
        ),
        &creator,
    )
    .await
    .assert_status_ok();

    let response = app.get("/api/v1/dashboard/videos", &creator).await;
    response.assert_status_ok();
    let body: Value = response.json();
    let videos = body["data"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["title"], "draft");
    assert_eq!(videos[0]["isPublished"], false);
    assert_eq!(videos[1]["title"], "public");
}
