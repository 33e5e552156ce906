/**
 * Tweet Handlers
 *
 * HTTP handlers for `/api/v1/tweets`.
 */

use axum::extract::State;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::AuthUser;
use crate::backend::tweets::db;
use crate::backend::tweets::types::{Tweet, TweetList, TweetRequest, TweetView};
use crate::shared::{validation, ApiResponse};

async fn owned_tweet(pool: &SqlitePool, tweet_id: Uuid, user: &AuthUser) -> BackendResult<Tweet> {
    let tweet = db::get_tweet_by_id(pool, tweet_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Tweet not found"))?;
    user.0
        .ensure_owner(tweet.owner_id, "You are not allowed to modify this tweet")?;
    Ok(tweet)
}

async fn tweet_view(pool: &SqlitePool, tweet_id: Uuid, viewer: Uuid) -> BackendResult<TweetView> {
    db::get_tweet_view(pool, tweet_id, viewer)
        .await?
        .ok_or_else(|| BackendError::not_found("Tweet not found"))
}

/// Create a tweet owned by the requester
///
/// # Errors
///
/// * `400 Bad Request` - Missing or blank content
pub async fn create_tweet(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<TweetRequest>,
) -> BackendResult<ApiResponse<TweetView>> {
    let content =
        validation::required(request.content.as_deref(), "content", "Content is required")?;

    let tweet = db::create_tweet(&pool, user.user_id, &content).await?;
    tracing::info!("Tweet {} created by {}", tweet.id, user.user_id);

    let view = tweet_view(&pool, tweet.id, user.user_id).await?;
    Ok(ApiResponse::created(view, "Tweet created successfully"))
}

/// Every tweet, newest first
pub async fn get_all_tweets(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> BackendResult<ApiResponse<TweetList>> {
    let tweets = db::list_tweets(&pool, None, user.user_id).await?;
    Ok(ApiResponse::ok(TweetList { tweets }, "Tweets fetched successfully"))
}

/// Tweets of one user, newest first
pub async fn get_user_tweets(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(user_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<TweetList>> {
    get_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let tweets = db::list_tweets(&pool, Some(user_id), user.user_id).await?;
    Ok(ApiResponse::ok(
        TweetList { tweets },
        "User tweets fetched successfully",
    ))
}

pub async fn get_tweet_by_id(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(tweet_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<TweetView>> {
    let view = tweet_view(&pool, tweet_id, user.user_id).await?;
    Ok(ApiResponse::ok(view, "Tweet fetched successfully"))
}

/// Replace the content of a tweet (owner only)
pub async fn update_tweet(
    State(pool): State<SqlitePool>,
    auth: AuthUser,
    ApiPath(tweet_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<TweetRequest>,
) -> BackendResult<ApiResponse<TweetView>> {
    let content =
        validation::required(request.content.as_deref(), "content", "Content is required")?;

    owned_tweet(&pool, tweet_id, &auth).await?;
    db::update_tweet(&pool, tweet_id, &content).await?;

    let view = tweet_view(&pool, tweet_id, auth.0.user_id).await?;
    Ok(ApiResponse::ok(view, "Tweet updated successfully"))
}

/// Delete a tweet (owner only)
pub async fn delete_tweet(
    State(pool): State<SqlitePool>,
    auth: AuthUser,
    ApiPath(tweet_id): ApiPath<Uuid>,
) -> BackendResult<ApiResponse<Option<()>>> {
    owned_tweet(&pool, tweet_id, &auth).await?;
    db::delete_tweet(&pool, tweet_id).await?;

    tracing::info!("Tweet {} deleted by {}", tweet_id, auth.0.user_id);
    Ok(ApiResponse::ok(None, "Tweet deleted successfully"))
}
