/**
 * Dashboard Handlers
 *
 * HTTP handlers for `/api/v1/dashboard`. Both report on the requester's
 * own channel.
 */

use axum::extract::State;
use sqlx::SqlitePool;

use crate::backend::dashboard::db::{self, ChannelStats};
use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::videos::db::list_owner_videos;
use crate::backend::videos::types::VideoView;
use crate::shared::ApiResponse;

/// Totals for the requester's channel
pub async fn get_channel_stats(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> BackendResult<ApiResponse<ChannelStats>> {
    let stats = db::get_channel_stats(&pool, user.user_id).await?;
    Ok(ApiResponse::ok(stats, "Channel stats fetched successfully"))
}

/// Every video of the requester's channel, published or not
pub async fn get_channel_videos(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> BackendResult<ApiResponse<Vec<VideoView>>> {
    let videos = list_owner_videos(&pool, user.user_id).await?;
    Ok(ApiResponse::ok(videos, "Channel videos fetched successfully"))
}
