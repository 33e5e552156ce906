/**
 * Tweet Database Operations
 */

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::feed::{push_comment_count, push_like_stats, push_owner_columns, LikeTarget};
use crate::backend::tweets::types::{Tweet, TweetView};

/// `SELECT <tweet view columns> FROM tweets t JOIN users u ...`
pub fn push_tweet_select(qb: &mut QueryBuilder<'_, Sqlite>, viewer: Uuid) {
    qb.push("SELECT t.id, t.content, t.created_at, t.updated_at, ");
    push_owner_columns(qb);
    qb.push(", ");
    push_like_stats(qb, LikeTarget::Tweet, "t.id", viewer);
    qb.push(", ");
    push_comment_count(qb, "tweet_id", "t.id");
    qb.push(" FROM tweets t JOIN users u ON u.id = t.owner_id");
}

pub async fn create_tweet(
    pool: &SqlitePool,
    owner_id: Uuid,
    content: &str,
) -> Result<Tweet, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Tweet>(
        r#"
        INSERT INTO tweets (id, content, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(content)
    .bind(owner_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_tweet_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>("SELECT * FROM tweets WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_tweet_view(
    pool: &SqlitePool,
    id: Uuid,
    viewer: Uuid,
) -> Result<Option<TweetView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_tweet_select(&mut qb, viewer);
    qb.push(" WHERE t.id = ");
    qb.push_bind(id);

    qb.build_query_as::<TweetView>().fetch_optional(pool).await
}

/// All tweets, or one owner's tweets, newest first
pub async fn list_tweets(
    pool: &SqlitePool,
    owner_id: Option<Uuid>,
    viewer: Uuid,
) -> Result<Vec<TweetView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_tweet_select(&mut qb, viewer);
    if let Some(owner_id) = owner_id {
        qb.push(" WHERE t.owner_id = ");
        qb.push_bind(owner_id);
    }
    qb.push(" ORDER BY t.created_at DESC, t.rowid DESC");

    qb.build_query_as::<TweetView>().fetch_all(pool).await
}

pub async fn update_tweet(
    pool: &SqlitePool,
    id: Uuid,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE tweets SET content = ?, updated_at = ? WHERE id = ?")
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a tweet; its comments and likes cascade
pub async fn delete_tweet(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tweets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
