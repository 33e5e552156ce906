/**
 * Video Database Operations
 *
 * Plain row operations on `videos` plus the video feed query: every video
 * joined to its owner profile with like and comment counts and the
 * requester's like flag. Other modules (likes, playlists, watch history,
 * dashboard) reuse [`push_video_select`] and add their own joins and
 * filters.
 */

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::feed::{push_comment_count, push_like_stats, push_owner_columns, LikeTarget};
use crate::backend::videos::types::{NewVideo, Video, VideoFilter, VideoView};
use crate::shared::PageParams;

/// `SELECT <video view columns> FROM videos v JOIN users u ...`
///
/// The caller appends further joins, `WHERE` and `ORDER BY`.
pub fn push_video_select(qb: &mut QueryBuilder<'_, Sqlite>, viewer: Uuid) {
    qb.push(
        "SELECT v.id, v.video_file, v.thumbnail, v.title, v.description, v.duration, v.views, \
         v.is_published, v.created_at, v.updated_at, ",
    );
    push_owner_columns(qb);
    qb.push(", ");
    push_like_stats(qb, LikeTarget::Video, "v.id", viewer);
    qb.push(", ");
    push_comment_count(qb, "video_id", "v.id");
    qb.push(" FROM videos v JOIN users u ON u.id = v.owner_id");
}

fn push_video_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &VideoFilter) {
    qb.push(" WHERE v.is_published = 1");

    if let Some(owner_id) = filter.owner_id {
        qb.push(" AND v.owner_id = ");
        qb.push_bind(owner_id);
    }

    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        qb.push(" AND (v.title LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR v.description LIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\')");
    }
}

/// `LIKE` pattern matching `search` literally anywhere in the text
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// One page of videos matching `filter`, plus the total match count
pub async fn list_videos(
    pool: &SqlitePool,
    filter: &VideoFilter,
    viewer: Uuid,
    page: PageParams,
) -> Result<(Vec<VideoView>, u64), sqlx::Error> {
    let mut count_qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM videos v");
    push_video_filter(&mut count_qb, filter);
    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_video_select(&mut qb, viewer);
    push_video_filter(&mut qb, filter);
    qb.push(format!(
        " ORDER BY {} {}, v.rowid DESC LIMIT ",
        filter.sort.column(),
        filter.order.keyword()
    ));
    qb.push_bind(page.limit as i64);
    qb.push(" OFFSET ");
    qb.push_bind(page.offset());

    let videos = qb.build_query_as::<VideoView>().fetch_all(pool).await?;
    Ok((videos, total.max(0) as u64))
}

/// Every video of an owner, published or not, newest first
pub async fn list_owner_videos(
    pool: &SqlitePool,
    owner_id: Uuid,
) -> Result<Vec<VideoView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_video_select(&mut qb, owner_id);
    qb.push(" WHERE v.owner_id = ");
    qb.push_bind(owner_id);
    qb.push(" ORDER BY v.created_at DESC, v.rowid DESC");

    qb.build_query_as::<VideoView>().fetch_all(pool).await
}

/// Insert a video owned by `owner_id`
pub async fn create_video(
    pool: &SqlitePool,
    owner_id: Uuid,
    new_video: NewVideo,
) -> Result<Video, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Video>(
        r#"
        INSERT INTO videos (id, video_file, thumbnail, title, description, duration, views, is_published, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, 0, 1, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new_video.video_file)
    .bind(&new_video.thumbnail)
    .bind(&new_video.title)
    .bind(&new_video.description)
    .bind(new_video.duration)
    .bind(owner_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_video_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Single video in feed shape
pub async fn get_video_view(
    pool: &SqlitePool,
    id: Uuid,
    viewer: Uuid,
) -> Result<Option<VideoView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_video_select(&mut qb, viewer);
    qb.push(" WHERE v.id = ");
    qb.push_bind(id);

    qb.build_query_as::<VideoView>().fetch_optional(pool).await
}

pub async fn increment_views(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE videos SET views = views + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Update the given fields; `None` keeps the current value
pub async fn update_video(
    pool: &SqlitePool,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    thumbnail: Option<&str>,
) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        UPDATE videos
        SET title = COALESCE(?, title),
            description = COALESCE(?, description),
            thumbnail = COALESCE(?, thumbnail),
            updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(thumbnail)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a video; its comments, likes, playlist entries and history rows
/// cascade
pub async fn delete_video(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Flip the published flag and return the new value
pub async fn toggle_published(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let video = sqlx::query_as::<_, Video>(
        "UPDATE videos SET is_published = 1 - is_published, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(video.is_published)
}
