/**
 * Comment Handlers
 *
 * HTTP handlers for `/api/v1/comments`. Comments hang off either a video
 * (`/{videoId}`) or a tweet (`/t/{tweetId}`); single comments are edited
 * through `/c/{commentId}`.
 */

use axum::extract::State;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::comments::db;
use crate::backend::comments::types::{
    Comment, CommentListQuery, CommentRequest, CommentTarget, CommentView,
};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::middleware::{AuthUser, AuthenticatedUser};
use crate::backend::tweets::db::get_tweet_by_id;
use crate::backend::videos::db::get_video_by_id;
use crate::shared::{validation, ApiResponse, Paginated};

/// 404 unless the commented video or tweet exists and is visible to `user`
async fn ensure_target_exists(
    pool: &SqlitePool,
    target: CommentTarget,
    user: &AuthenticatedUser,
) -> BackendResult<()> {
    match target {
        CommentTarget::Video(id) => {
            get_video_by_id(pool, id)
                .await?
                .filter(|v| v.is_published || v.owner_id == user.user_id)
                .ok_or_else(|| BackendError::not_found("Video not found"))?;
        }
        CommentTarget::Tweet(id) => {
            get_tweet_by_id(pool, id)
                .await?
                .ok_or_else(|| BackendError::not_found("Tweet not found"))?;
        }
    }
    Ok(())
}

async fn owned_comment(
    pool: &SqlitePool,
    comment_id: Uuid,
    user: &AuthenticatedUser,
) -> BackendResult<Comment> {
    let comment = db::get_comment_by_id(pool, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;
    user.ensure_owner(comment.owner_id, "You are not allowed to modify this comment")?;
    Ok(comment)
}

async fn list(
    pool: &SqlitePool,
    target: CommentTarget,
    user: &AuthenticatedUser,
    query: CommentListQuery,
) -> BackendResult<ApiResponse<Paginated<CommentView>>> {
    ensure_target_exists(pool, target, user).await?;

    let page = query.page_params();
    let (comments, total) = db::list_comments(pool, target, user.user_id, page).await?;

    Ok(ApiResponse::ok(
        Paginated::new(comments, total, page),
        "Comments fetched successfully",
    ))
}

async fn add(
    pool: &SqlitePool,
    target: CommentTarget,
    user: &AuthenticatedUser,
    request: CommentRequest,
) -> BackendResult<ApiResponse<CommentView>> {
    let content =
        validation::required(request.content.as_deref(), "content", "Content is required")?;
    ensure_target_exists(pool, target, user).await?;

    let comment = db::create_comment(pool, target, user.user_id, &content).await?;
    tracing::info!("Comment {} added by {}", comment.id, user.user_id);

    let view = db::get_comment_view(pool, comment.id, user.user_id)
        .await?
        .ok_or_else(|| BackendError::internal("Comment vanished after insert"))?;
    Ok(ApiResponse::created(view, "Comment added successfully"))
}

/// Paginated comments of a video, newest first
pub async fn get_video_comments(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(video_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<CommentListQuery>,
) -> BackendResult<ApiResponse<Paginated<CommentView>>> {
    list(&pool, CommentTarget::Video(video_id), &user, query).await
}

/// Comment on a video
pub async fn add_video_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(video_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> BackendResult<ApiResponse<CommentView>> {
    add(&pool, CommentTarget::Video(video_id), &user, request).await
}

/// Paginated comments of a tweet, newest first
pub async fn get_tweet_comments(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(tweet_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<CommentListQuery>,
) -> BackendResult<ApiResponse<Paginated<CommentView>>> {
    list(&pool, CommentTarget::Tweet(tweet_id), &user, query).await
}

/// Comment on a tweet
pub async fn add_tweet_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(tweet_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> BackendResult<ApiResponse<CommentView>> {
    add(&pool, CommentTarget::Tweet(tweet_id), &user, request).await
}

/// Replace the content of a comment (owner only)
pub async fn update_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> BackendResult<ApiResponse<CommentView>> {
    let content =
        validation::required(request.content.as_deref(), "content", "Content is required")?;

    owned_comment(&pool, comment_id, &user).await?;
    db::update_comment(&pool, comment_id, &content).await?;

    let view = db::get_comment_view(&pool, comment_id, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;
    Ok(ApiResponse::ok(view, "Comment updated successfully"))
}

/// Delete a comment (owner only)
pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<Option<()>>> {
    owned_comment(&pool, comment_id, &user).await?;
    db::delete_comment(&pool, comment_id).await?;

    tracing::info!("Comment {} deleted by {}", comment_id, user.user_id);
    Ok(ApiResponse::ok(None, "Comment deleted successfully"))
}
