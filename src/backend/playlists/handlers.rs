/**
 * Playlist Handlers
 *
 * HTTP handlers for `/api/v1/playlist`. Anyone signed in can read a
 * playlist; only its owner can change it.
 */

use axum::extract::State;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::{AuthUser, AuthenticatedUser};
use crate::backend::playlists::db;
use crate::backend::playlists::types::{
    Playlist, PlaylistRequest, PlaylistSummary, PlaylistView,
};
use crate::backend::videos::db::get_video_by_id;
use crate::shared::{validation, ApiResponse};

async fn find_playlist(pool: &SqlitePool, playlist_id: Uuid) -> BackendResult<Playlist> {
    db::get_playlist_by_id(pool, playlist_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Playlist not found"))
}

async fn owned_playlist(
    pool: &SqlitePool,
    playlist_id: Uuid,
    user: &AuthenticatedUser,
) -> BackendResult<Playlist> {
    let playlist = find_playlist(pool, playlist_id).await?;
    user.ensure_owner(playlist.owner_id, "You are not allowed to modify this playlist")?;
    Ok(playlist)
}

/// Assemble the full playlist view
async fn playlist_view(
    pool: &SqlitePool,
    playlist: Playlist,
    viewer: Uuid,
) -> BackendResult<PlaylistView> {
    let owner = get_user_by_id(pool, playlist.owner_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Playlist owner not found"))?;
    let videos = db::get_playlist_videos(pool, playlist.id, viewer).await?;

    Ok(PlaylistView::new(playlist, (&owner).into(), videos))
}

/// Create a playlist owned by the requester
///
/// # Errors
///
/// * `400 Bad Request` - Missing name
pub async fn create_playlist(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<PlaylistRequest>,
) -> BackendResult<ApiResponse<Playlist>> {
    let name = validation::required(request.name.as_deref(), "name", "Playlist name is required")?;
    let description = validation::optional(request.description.as_deref()).unwrap_or_default();

    let playlist = db::create_playlist(&pool, user.user_id, &name, &description).await?;
    tracing::info!("Playlist {} created by {}", playlist.id, user.user_id);

    Ok(ApiResponse::created(playlist, "Playlist created successfully"))
}

/// Playlists of a user
pub async fn get_user_playlists(
    State(pool): State<SqlitePool>,
    AuthUser(_user): AuthUser,
    ApiPath(user_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<Vec<PlaylistSummary>>> {
    get_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let playlists = db::get_user_playlists(&pool, user_id).await?;
    Ok(ApiResponse::ok(playlists, "User playlists fetched successfully"))
}

/// A playlist with its published videos
pub async fn get_playlist_by_id(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(playlist_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<PlaylistView>> {
    let playlist = find_playlist(&pool, playlist_id).await?;
    let view = playlist_view(&pool, playlist, user.user_id).await?;
    Ok(ApiResponse::ok(view, "Playlist fetched successfully"))
}

/// Rename or re-describe a playlist (owner only)
pub async fn update_playlist(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(playlist_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<PlaylistRequest>,
) -> BackendResult<ApiResponse<Playlist>> {
    let name = validation::optional(request.name.as_deref());
    let description = validation::optional(request.description.as_deref());
    if name.is_none() && description.is_none() {
        return Err(BackendError::bad_request("Provide a name or description to update"));
    }

    owned_playlist(&pool, playlist_id, &user).await?;
    let playlist =
        db::update_playlist(&pool, playlist_id, name.as_deref(), description.as_deref()).await?;

    Ok(ApiResponse::ok(playlist, "Playlist updated successfully"))
}

/// Delete a playlist (owner only). The videos themselves are untouched.
pub async fn delete_playlist(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(playlist_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<Option<()>>> {
    owned_playlist(&pool, playlist_id, &user).await?;
    db::delete_playlist(&pool, playlist_id).await?;

    tracing::info!("Playlist {} deleted by {}", playlist_id, user.user_id);
    Ok(ApiResponse::ok(None, "Playlist deleted successfully"))
}

/// Add a video to a playlist (owner only)
pub async fn add_video_to_playlist(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath((video_id, playlist_id)): ApiPath<(Uuid, Uuid)>,
) -> BackendResult<ApiResponse<PlaylistView>> {
    owned_playlist(&pool, playlist_id, &user).await?;

    get_video_by_id(&pool, video_id)
        .await?
        .filter(|v| v.is_published || v.owner_id == user.user_id)
        .ok_or_else(|| BackendError::not_found("Video not found"))?;

    db::add_video(&pool, playlist_id, video_id).await?;

    let playlist = find_playlist(&pool, playlist_id).await?;
    let view = playlist_view(&pool, playlist, user.user_id).await?;
    Ok(ApiResponse::ok(view, "Video added to playlist successfully"))
}

/// Remove a video from a playlist (owner only)
pub async fn remove_video_from_playlist(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath((video_id, playlist_id)): ApiPath<(Uuid, Uuid)>,
) -> BackendResult<ApiResponse<PlaylistView>> {
    owned_playlist(&pool, playlist_id, &user).await?;

    if !db::remove_video(&pool, playlist_id, video_id).await? {
        return Err(BackendError::not_found("Video is not in this playlist"));
    }

    let playlist = find_playlist(&pool, playlist_id).await?;
    let view = playlist_view(&pool, playlist, user.user_id).await?;
    Ok(ApiResponse::ok(view, "Video removed from playlist successfully"))
}
