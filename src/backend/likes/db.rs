/**
 * Like Database Operations
 *
 * Likes on videos, comments and tweets share one table with one nullable
 * reference column per target kind. Toggling deletes first and inserts only
 * when nothing was removed; the partial unique indexes on `(target, liked_by)`
 * turn a concurrent duplicate insert into a no-op, which still means "liked".
 */

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::feed::LikeTarget;
use crate::backend::videos::db::push_video_select;
use crate::backend::videos::types::VideoView;

/// Whether the target exists and `viewer_id` may see it. Unpublished videos
/// are visible to their owner only.
pub async fn target_visible(
    pool: &SqlitePool,
    target: LikeTarget,
    id: Uuid,
    viewer_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT EXISTS(SELECT 1 FROM ");
    qb.push(target.table());
    qb.push(" WHERE id = ");
    qb.push_bind(id);
    if target == LikeTarget::Video {
        qb.push(" AND (is_published = 1 OR owner_id = ");
        qb.push_bind(viewer_id);
        qb.push(")");
    }
    qb.push(")");

    let exists: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(exists != 0)
}

/// Like or unlike `id` for `user_id`; returns the new state
pub async fn toggle_like(
    pool: &SqlitePool,
    target: LikeTarget,
    id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let column = target.column();

    let removed = sqlx::query(&format!(
        "DELETE FROM likes WHERE {column} = ? AND liked_by = ?"
    ))
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if removed.rows_affected() > 0 {
        return Ok(false);
    }

    sqlx::query(&format!(
        "INSERT INTO likes (id, {column}, liked_by, created_at) VALUES (?, ?, ?, ?) \
         ON CONFLICT DO NOTHING"
    ))
    .bind(Uuid::new_v4())
    .bind(id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(true)
}

/// Videos liked by `user_id`, most recently liked first
pub async fn get_liked_videos(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<VideoView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_video_select(&mut qb, user_id);
    qb.push(" JOIN likes lk ON lk.video_id = v.id WHERE lk.liked_by = ");
    qb.push_bind(user_id);
    qb.push(" AND (v.is_published = 1 OR v.owner_id = ");
    qb.push_bind(user_id);
    qb.push(") ORDER BY lk.created_at DESC, lk.rowid DESC");

    qb.build_query_as::<VideoView>().fetch_all(pool).await
}
