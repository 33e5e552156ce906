//! Concurrent toggle tests
//!
//! These run against a WAL database file with a multi-connection pool, where
//! two requests toggling the same pair really do interleave.

use std::path::Path;

use pretty_assertions::assert_eq;
use sqlx::SqlitePool;
use uuid::Uuid;

use youter::backend::auth::users::{create_user, NewUser, User};
use youter::backend::feed::LikeTarget;
use youter::backend::likes::db::toggle_like;
use youter::backend::server::config::{load_database, MIN_HASH_COST};
use youter::backend::subscriptions::db::toggle_subscription;
use youter::backend::tweets::db::create_tweet;

const ROUNDS: usize = 20;

async fn file_database(dir: &Path) -> SqlitePool {
    let url = format!("sqlite://{}", dir.join("youter.db").display());
    load_database(&url).await.expect("Failed to open database file")
}

async fn user(pool: &SqlitePool, name: &str) -> User {
    create_user(
        pool,
        NewUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            full_name: name.to_string(),
            password: "pw".to_string(),
            avatar: None,
            cover_image: None,
        },
        MIN_HASH_COST,
    )
    .await
    .expect("Failed to create user")
}

async fn subscription_rows(pool: &SqlitePool, subscriber: Uuid, channel: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE subscriber_id = ? AND channel_id = ?")
        .bind(subscriber)
        .bind(channel)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_subscription_toggles_never_fail() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_database(dir.path()).await;
    let fan = user(&pool, "alice").await.id;
    let channel = user(&pool, "bob").await.id;

    for round in 0..ROUNDS {
        let first = tokio::spawn({
            let pool = pool.clone();
            async move { toggle_subscription(&pool, fan, channel).await }
        });
        let second = tokio::spawn({
            let pool = pool.clone();
            async move { toggle_subscription(&pool, fan, channel).await }
        });

        let first = first.await.unwrap();
        let second = second.await.unwrap();
        assert!(first.is_ok(), "round {round}: {first:?}");
        assert!(second.is_ok(), "round {round}: {second:?}");

        let rows = subscription_rows(&pool, fan, channel).await;
        assert!(rows <= 1, "round {round}: {rows} duplicate rows");
    }

    // Sequential toggles still flip the stored state
    let rows = subscription_rows(&pool, fan, channel).await;
    let next = toggle_subscription(&pool, fan, channel).await.unwrap();
    assert_eq!(next, rows == 0);
    assert_eq!(subscription_rows(&pool, fan, channel).await, 1 - rows);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_like_toggles_never_fail() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_database(dir.path()).await;
    let author = user(&pool, "alice").await.id;
    let tweet = create_tweet(&pool, author, "race me").await.unwrap().id;

    for round in 0..ROUNDS {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    toggle_like(&pool, LikeTarget::Tweet, tweet, author).await
                })
            })
            .collect();

        for handle in handles {
            let result = handle.await.unwrap();
            assert!(result.is_ok(), "round {round}: {result:?}");
        }

        let rows: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE tweet_id = ? AND liked_by = ?")
                .bind(tweet)
                .bind(author)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(rows <= 1, "round {round}: {rows} duplicate rows");
    }
}
