/**
 * Like Handlers
 *
 * HTTP handlers for `/api/v1/like`.
 */

use axum::extract::State;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ApiPath;
use crate::backend::feed::LikeTarget;
use crate::backend::likes::db;
use crate::backend::middleware::AuthUser;
use crate::backend::videos::types::VideoView;
use crate::shared::ApiResponse;

/// `{ "isLiked": bool }`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub is_liked: bool,
}

async fn toggle(
    pool: &SqlitePool,
    target: LikeTarget,
    id: Uuid,
    user_id: Uuid,
) -> BackendResult<ApiResponse<LikeStatus>> {
    if !db::target_visible(pool, target, id, user_id).await? {
        return Err(BackendError::not_found(format!("{} not found", target.label())));
    }

    let is_liked = db::toggle_like(pool, target, id, user_id).await?;
    tracing::debug!(
        "{} {} {} by {}",
        target.label(),
        id,
        if is_liked { "liked" } else { "unliked" },
        user_id
    );

    let message = if is_liked {
        format!("{} liked successfully", target.label())
    } else {
        format!("{} unliked successfully", target.label())
    };
    Ok(ApiResponse::ok(LikeStatus { is_liked }, message))
}

pub async fn toggle_video_like(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(video_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<LikeStatus>> {
    toggle(&pool, LikeTarget::Video, video_id, user.user_id).await
}

pub async fn toggle_comment_like(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<LikeStatus>> {
    toggle(&pool, LikeTarget::Comment, comment_id, user.user_id).await
}

pub async fn toggle_tweet_like(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(tweet_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<LikeStatus>> {
    toggle(&pool, LikeTarget::Tweet, tweet_id, user.user_id).await
}

/// Videos the requester liked, most recent first
pub async fn get_liked_videos(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> BackendResult<ApiResponse<Vec<VideoView>>> {
    let videos = db::get_liked_videos(&pool, user.user_id).await?;
    Ok(ApiResponse::ok(videos, "Liked videos fetched successfully"))
}
