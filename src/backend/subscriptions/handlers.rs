/**
 * Subscription Handlers
 *
 * HTTP handlers for `/api/v1/subscriptions`: the subscribe toggle, the
 * subscriber and subscription lists, channel suggestions and the content
 * feed of subscribed channels.
 */

use axum::extract::State;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::{ApiPath, ApiQuery};
use crate::backend::middleware::AuthUser;
use crate::backend::subscriptions::db;
use crate::backend::subscriptions::types::{
    merge_feed, ChannelSubscribers, ContentFeed, ContentKind, ContentQuery, FeedItem,
    SubscribedChannels, SubscriptionStatus, SuggestedChannels, SuggestedQuery,
};
use crate::shared::ApiResponse;

async fn ensure_user_exists(pool: &SqlitePool, user_id: Uuid, message: &str) -> BackendResult<()> {
    get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(message))?;
    Ok(())
}

/// Subscribe to or unsubscribe from a channel
///
/// # Errors
///
/// * `400 Bad Request` - Subscribing to yourself
/// * `404 Not Found` - Unknown channel
pub async fn toggle_subscription(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(channel_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<SubscriptionStatus>> {
    if channel_id == user.user_id {
        tracing::warn!("User {} tried to subscribe to themself", user.user_id);
        return Err(BackendError::bad_request("You cannot subscribe to your own channel"));
    }
    ensure_user_exists(&pool, channel_id, "Channel not found").await?;

    let is_subscribed = db::toggle_subscription(&pool, user.user_id, channel_id).await?;
    tracing::info!(
        "User {} {} channel {}",
        user.user_id,
        if is_subscribed { "subscribed to" } else { "unsubscribed from" },
        channel_id
    );

    let message = if is_subscribed {
        "Subscribed successfully"
    } else {
        "Unsubscribed successfully"
    };
    Ok(ApiResponse::ok(SubscriptionStatus { is_subscribed }, message))
}

/// Subscribers of a channel
pub async fn get_user_channel_subscribers(
    State(pool): State<SqlitePool>,
    AuthUser(_user): AuthUser,
    ApiPath(channel_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<ChannelSubscribers>> {
    ensure_user_exists(&pool, channel_id, "Channel not found").await?;

    let subscribers = db::get_channel_subscribers(&pool, channel_id).await?;
    let total_subscribers = subscribers.len();

    Ok(ApiResponse::ok(
        ChannelSubscribers {
            subscribers,
            total_subscribers,
        },
        "Subscribers fetched successfully",
    ))
}

/// Channels a user subscribes to
pub async fn get_subscribed_channels(
    State(pool): State<SqlitePool>,
    AuthUser(_user): AuthUser,
    ApiPath(subscriber_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<SubscribedChannels>> {
    ensure_user_exists(&pool, subscriber_id, "Subscriber not found").await?;

    let channels = db::get_subscribed_channels(&pool, subscriber_id).await?;
    let total_subscriptions = channels.len();
    let message = if channels.is_empty() {
        "No channels subscribed yet"
    } else {
        "Subscribed channels fetched successfully"
    };

    Ok(ApiResponse::ok(
        SubscribedChannels {
            channels,
            total_subscriptions,
        },
        message,
    ))
}

/// Channels the requester might subscribe to
pub async fn get_suggested_channels(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<SuggestedQuery>,
) -> BackendResult<ApiResponse<SuggestedChannels>> {
    let channels = db::get_suggested_channels(&pool, user.user_id, query.limit()).await?;
    let total_suggested = channels.len();

    Ok(ApiResponse::ok(
        SuggestedChannels {
            channels,
            total_suggested,
        },
        "Suggested channels fetched successfully",
    ))
}

/// Recent videos and/or tweets from subscribed channels, newest first
pub async fn get_subscribed_channels_content(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<ContentQuery>,
) -> BackendResult<ApiResponse<ContentFeed>> {
    let per_kind = query.per_kind_limit();
    let mut content = Vec::new();

    if matches!(query.kind, ContentKind::All | ContentKind::Videos) {
        let videos = db::get_subscribed_videos(&pool, user.user_id, per_kind).await?;
        content.extend(videos.into_iter().map(FeedItem::Video));
    }

    if matches!(query.kind, ContentKind::All | ContentKind::Tweets) {
        let tweets = db::get_subscribed_tweets(&pool, user.user_id, per_kind).await?;
        content.extend(tweets.into_iter().map(FeedItem::Tweet));
    }

    let content = merge_feed(content, query.limit() as usize);
    let total_content = content.len();

    Ok(ApiResponse::ok(
        ContentFeed {
            content,
            total_content,
        },
        "Subscribed channels content fetched successfully",
    ))
}
