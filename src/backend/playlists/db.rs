/**
 * Playlist Database Operations
 */

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::playlists::types::{Playlist, PlaylistSummary};
use crate::backend::videos::db::push_video_select;
use crate::backend::videos::types::VideoView;

pub async fn create_playlist(
    pool: &SqlitePool,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Playlist>(
        r#"
        INSERT INTO playlists (id, name, description, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .bind(owner_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_playlist_by_id(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>("SELECT * FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Playlists of a user with published video count and views, newest first
pub async fn get_user_playlists(
    pool: &SqlitePool,
    owner_id: Uuid,
) -> Result<Vec<PlaylistSummary>, sqlx::Error> {
    sqlx::query_as::<_, PlaylistSummary>(
        r#"
        SELECT p.id, p.name, p.description, p.created_at, p.updated_at,
            COUNT(v.id) AS total_videos,
            COALESCE(SUM(v.views), 0) AS total_views
        FROM playlists p
        LEFT JOIN playlist_videos pv ON pv.playlist_id = p.id
        LEFT JOIN videos v ON v.id = pv.video_id AND v.is_published = 1
        WHERE p.owner_id = ?
        GROUP BY p.id
        ORDER BY p.created_at DESC, p.rowid DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Published videos of a playlist in the order they were added
pub async fn get_playlist_videos(
    pool: &SqlitePool,
    playlist_id: Uuid,
    viewer: Uuid,
) -> Result<Vec<VideoView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_video_select(&mut qb, viewer);
    qb.push(" JOIN playlist_videos pv ON pv.video_id = v.id WHERE pv.playlist_id = ");
    qb.push_bind(playlist_id);
    qb.push(" AND v.is_published = 1 ORDER BY pv.added_at ASC, pv.rowid ASC");

    qb.build_query_as::<VideoView>().fetch_all(pool).await
}

/// Update name and/or description; `None` keeps the current value
pub async fn update_playlist(
    pool: &SqlitePool,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Playlist, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(
        r#"
        UPDATE playlists
        SET name = COALESCE(?, name), description = COALESCE(?, description), updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete_playlist(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Add a video; adding one that is already present changes nothing
pub async fn add_video(
    pool: &SqlitePool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO playlist_videos (playlist_id, video_id, added_at)
        VALUES (?, ?, ?)
        ON CONFLICT (playlist_id, video_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .bind(now)
    .execute(pool)
    .await?;

    touch(pool, playlist_id).await
}

/// Remove a video; returns whether it was in the playlist
pub async fn remove_video(
    pool: &SqlitePool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = ? AND video_id = ?")
        .bind(playlist_id)
        .bind(video_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        touch(pool, playlist_id).await?;
        Ok(true)
    } else {
        Ok(false)
    }
}

async fn touch(pool: &SqlitePool, playlist_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(playlist_id)
        .execute(pool)
        .await?;
    Ok(())
}
