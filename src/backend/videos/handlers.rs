/**
 * Video Handlers
 *
 * HTTP handlers for `/api/v1/videos`. Every route sits behind the auth
 * middleware; the requester is used for the like flag, watch history and
 * owner checks.
 */

use axum::extract::State;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::record_watch;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::middleware::AuthUser;
use crate::backend::videos::db;
use crate::backend::videos::types::{
    NewVideo, PublishStatusResponse, PublishVideoRequest, SortOrder, UpdateVideoRequest, Video,
    VideoFilter, VideoListQuery, VideoSortField, VideoView,
};
use crate::shared::{validation, ApiResponse, Paginated};

/// Load a video and check the requester owns it
async fn owned_video(pool: &SqlitePool, video_id: Uuid, user: &AuthUser) -> BackendResult<Video> {
    let video = db::get_video_by_id(pool, video_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Video not found"))?;
    user.0
        .ensure_owner(video.owner_id, "You are not allowed to modify this video")?;
    Ok(video)
}

/// List published videos
///
/// # Query Parameters
///
/// * `page`, `limit` - Pagination (defaults 1 and 10)
/// * `query` - Case-insensitive text matched against title and description
/// * `sortBy` - `createdAt` (default), `views`, `duration` or `title`
/// * `sortType` - `asc` or `desc` (default)
/// * `userId` - Only videos of this channel
///
/// # Errors
///
/// * `400 Bad Request` - Unknown `sortBy`/`sortType` value
pub async fn get_all_videos(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<VideoListQuery>,
) -> BackendResult<ApiResponse<Paginated<VideoView>>> {
    let sort = match query.sort_by.as_deref() {
        Some(value) => VideoSortField::parse(value)
            .ok_or_else(|| BackendError::bad_request(format!("Cannot sort videos by '{value}'")))?,
        None => VideoSortField::default(),
    };
    let order = match query.sort_type.as_deref() {
        Some(value) => SortOrder::parse(value)
            .ok_or_else(|| BackendError::bad_request(format!("Invalid sort type '{value}'")))?,
        None => SortOrder::default(),
    };

    let filter = VideoFilter {
        search: validation::optional(query.query.as_deref()),
        owner_id: query.user_id,
        sort,
        order,
    };
    let page = query.page_params();

    let (videos, total) = db::list_videos(&pool, &filter, user.user_id, page).await?;

    Ok(ApiResponse::ok(
        Paginated::new(videos, total, page),
        "Videos fetched successfully",
    ))
}

/// Publish a new video owned by the requester
///
/// # Errors
///
/// * `400 Bad Request` - Missing title, description, video file or thumbnail
pub async fn publish_a_video(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<PublishVideoRequest>,
) -> BackendResult<ApiResponse<Video>> {
    let title = validation::required(request.title.as_deref(), "title", "Title is required")?;
    let description = validation::required(
        request.description.as_deref(),
        "description",
        "Description is required",
    )?;
    let video_file = validation::required(
        request.video_file.as_deref(),
        "videoFile",
        "Video file is required",
    )?;
    let thumbnail = validation::required(
        request.thumbnail.as_deref(),
        "thumbnail",
        "Thumbnail is required",
    )?;

    let duration = request.duration.unwrap_or(0.0);
    if !duration.is_finite() || duration < 0.0 {
        return Err(BackendError::bad_request("Duration must be a non-negative number"));
    }

    let video = db::create_video(
        &pool,
        user.user_id,
        NewVideo {
            title,
            description,
            video_file,
            thumbnail,
            duration,
        },
    )
    .await?;

    tracing::info!("Video {} published by {}", video.id, user.user_id);
    Ok(ApiResponse::created(video, "Video published successfully"))
}

/// Fetch one video
///
/// Counts a view and records the video in the requester's watch history.
/// Unpublished videos are only visible to their owner.
pub async fn get_video_by_id(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(video_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<VideoView>> {
    let video = db::get_video_by_id(&pool, video_id)
        .await?
        .filter(|v| v.is_published || v.owner_id == user.user_id)
        .ok_or_else(|| BackendError::not_found("Video not found"))?;

    db::increment_views(&pool, video.id).await?;
    record_watch(&pool, user.user_id, video.id).await?;

    let view = db::get_video_view(&pool, video.id, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Video not found"))?;

    Ok(ApiResponse::ok(view, "Video fetched successfully"))
}

/// Update title, description and/or thumbnail (owner only)
pub async fn update_video(
    State(pool): State<SqlitePool>,
    auth: AuthUser,
    ApiPath(video_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateVideoRequest>,
) -> BackendResult<ApiResponse<Video>> {
    let title = validation::optional(request.title.as_deref());
    let description = validation::optional(request.description.as_deref());
    let thumbnail = validation::optional(request.thumbnail.as_deref());

    if title.is_none() && description.is_none() && thumbnail.is_none() {
        return Err(BackendError::bad_request(
            "Provide a title, description or thumbnail to update",
        ));
    }

    owned_video(&pool, video_id, &auth).await?;

    let video = db::update_video(
        &pool,
        video_id,
        title.as_deref(),
        description.as_deref(),
        thumbnail.as_deref(),
    )
    .await?;

    Ok(ApiResponse::ok(video, "Video updated successfully"))
}

/// Delete a video (owner only)
pub async fn delete_video(
    State(pool): State<SqlitePool>,
    auth: AuthUser,
    ApiPath(video_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<Option<()>>> {
    owned_video(&pool, video_id, &auth).await?;
    db::delete_video(&pool, video_id).await?;

    tracing::info!("Video {} deleted by {}", video_id, auth.0.user_id);
    Ok(ApiResponse::ok(None, "Video deleted successfully"))
}

/// Flip the published flag (owner only)
pub async fn toggle_publish_status(
    State(pool): State<SqlitePool>,
    auth: AuthUser,
    ApiPath(video_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<PublishStatusResponse>> {
    owned_video(&pool, video_id, &auth).await?;
    let is_published = db::toggle_published(&pool, video_id).await?;

    Ok(ApiResponse::ok(
        PublishStatusResponse { is_published },
        "Publish status toggled successfully",
    ))
}
