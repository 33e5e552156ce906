/**
 * Comment Database Operations
 */

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::comments::types::{Comment, CommentTarget, CommentView};
use crate::backend::feed::{push_like_stats, push_owner_columns, LikeTarget};
use crate::shared::PageParams;

fn push_comment_select(qb: &mut QueryBuilder<'_, Sqlite>, viewer: Uuid) {
    qb.push("SELECT c.id, c.content, c.video_id, c.tweet_id, c.created_at, c.updated_at, ");
    push_owner_columns(qb);
    qb.push(", ");
    push_like_stats(qb, LikeTarget::Comment, "c.id", viewer);
    qb.push(" FROM comments c JOIN users u ON u.id = c.owner_id");
}

/// One page of a video's or tweet's comments, newest first, plus the total
pub async fn list_comments(
    pool: &SqlitePool,
    target: CommentTarget,
    viewer: Uuid,
    page: PageParams,
) -> Result<(Vec<CommentView>, u64), sqlx::Error> {
    let count_sql = format!("SELECT COUNT(*) FROM comments WHERE {} = ?", target.column());
    let total: i64 = sqlx::query_scalar(&count_sql)
        .bind(target.id())
        .fetch_one(pool)
        .await?;

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_comment_select(&mut qb, viewer);
    qb.push(format!(" WHERE c.{} = ", target.column()));
    qb.push_bind(target.id());
    qb.push(" ORDER BY c.created_at DESC, c.rowid DESC LIMIT ");
    qb.push_bind(page.limit as i64);
    qb.push(" OFFSET ");
    qb.push_bind(page.offset());

    let comments = qb.build_query_as::<CommentView>().fetch_all(pool).await?;
    Ok((comments, total.max(0) as u64))
}

pub async fn create_comment(
    pool: &SqlitePool,
    target: CommentTarget,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let (video_id, tweet_id) = match target {
        CommentTarget::Video(id) => (Some(id), None),
        CommentTarget::Tweet(id) => (None, Some(id)),
    };
    let now = Utc::now();

    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, content, video_id, tweet_id, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(content)
    .bind(video_id)
    .bind(tweet_id)
    .bind(owner_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_comment_by_id(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_comment_view(
    pool: &SqlitePool,
    id: Uuid,
    viewer: Uuid,
) -> Result<Option<CommentView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_comment_select(&mut qb, viewer);
    qb.push(" WHERE c.id = ");
    qb.push_bind(id);

    qb.build_query_as::<CommentView>().fetch_optional(pool).await
}

pub async fn update_comment(
    pool: &SqlitePool,
    id: Uuid,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE comments SET content = ?, updated_at = ? WHERE id = ?")
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a comment; its likes cascade
pub async fn delete_comment(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
