/**
 * API Route Tables
 *
 * One function per resource, each returning the routes relative to its
 * mount point under `/api/v1`.
 *
 * # Authentication
 *
 * Every route requires a valid access token except `POST /users/register`,
 * `POST /users/login` and `POST /users/refresh-token`. The auth middleware
 * is attached with `route_layer`, so it only runs for matched routes and
 * unknown paths still reach the 404 fallback.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

use crate::backend::auth::handlers as users;
use crate::backend::comments::handlers as comments;
use crate::backend::dashboard::handlers as dashboard;
use crate::backend::likes::handlers as likes;
use crate::backend::middleware::auth_middleware;
use crate::backend::playlists::handlers as playlists;
use crate::backend::server::state::AppState;
use crate::backend::subscriptions::handlers as subscriptions;
use crate::backend::tweets::handlers as tweets;
use crate::backend::videos::handlers as videos;

/// Routes mounted at `/api/v1/users`
///
/// - `POST /register`, `POST /login`, `POST /refresh-token` - public
/// - `POST /logout`, `POST /change-password`
/// - `GET /current-user`, `PATCH /update-account`
/// - `PATCH /avatar`, `PATCH /cover-image`
/// - `GET /c/{username}`, `GET /history`
pub fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(users::logout))
        .route("/change-password", post(users::change_password))
        .route("/current-user", get(users::current_user))
        .route("/update-account", patch(users::update_account))
        .route("/avatar", patch(users::update_avatar))
        .route("/cover-image", patch(users::update_cover_image))
        .route("/c/{username}", get(users::get_user_channel_profile))
        .route("/history", get(users::watch_history))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/refresh-token", post(users::refresh_access_token))
}

/// Routes mounted at `/api/v1/videos`
pub fn video_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(videos::get_all_videos).post(videos::publish_a_video),
        )
        .route(
            "/{video_id}",
            get(videos::get_video_by_id)
                .patch(videos::update_video)
                .delete(videos::delete_video),
        )
        .route(
            "/toggle/publish/{video_id}",
            patch(videos::toggle_publish_status),
        )
}

/// Routes mounted at `/api/v1/tweets`
pub fn tweet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tweets::get_all_tweets).post(tweets::create_tweet))
        .route("/user/{user_id}", get(tweets::get_user_tweets))
        .route(
            "/{tweet_id}",
            get(tweets::get_tweet_by_id)
                .patch(tweets::update_tweet)
                .delete(tweets::delete_tweet),
        )
}

/// Routes mounted at `/api/v1/comments`
pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{video_id}",
            get(comments::get_video_comments).post(comments::add_video_comment),
        )
        .route(
            "/t/{tweet_id}",
            get(comments::get_tweet_comments).post(comments::add_tweet_comment),
        )
        .route(
            "/c/{comment_id}",
            patch(comments::update_comment).delete(comments::delete_comment),
        )
}

/// Routes mounted at `/api/v1/like`
pub fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/toggle/v/{video_id}", post(likes::toggle_video_like))
        .route("/toggle/c/{comment_id}", post(likes::toggle_comment_like))
        .route("/toggle/t/{tweet_id}", post(likes::toggle_tweet_like))
        .route("/videos", get(likes::get_liked_videos))
}

/// Routes mounted at `/api/v1/subscriptions`
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/c/{channel_id}",
            get(subscriptions::get_user_channel_subscribers)
                .post(subscriptions::toggle_subscription),
        )
        .route(
            "/u/{subscriber_id}",
            get(subscriptions::get_subscribed_channels),
        )
        .route("/suggested", get(subscriptions::get_suggested_channels))
        .route(
            "/content",
            get(subscriptions::get_subscribed_channels_content),
        )
}

/// Routes mounted at `/api/v1/playlist`
pub fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(playlists::create_playlist))
        .route("/user/{user_id}", get(playlists::get_user_playlists))
        .route(
            "/{playlist_id}",
            get(playlists::get_playlist_by_id)
                .patch(playlists::update_playlist)
                .delete(playlists::delete_playlist),
        )
        .route(
            "/add/{video_id}/{playlist_id}",
            patch(playlists::add_video_to_playlist),
        )
        .route(
            "/remove/{video_id}/{playlist_id}",
            patch(playlists::remove_video_from_playlist),
        )
}

/// Routes mounted at `/api/v1/dashboard`
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::get_channel_stats))
        .route("/videos", get(dashboard::get_channel_videos))
}

/// Every resource route that requires authentication, already behind the
/// auth middleware
pub fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/videos", video_routes())
        .nest("/tweets", tweet_routes())
        .nest("/comments", comment_routes())
        .nest("/like", like_routes())
        .nest("/subscriptions", subscription_routes())
        .nest("/playlist", playlist_routes())
        .nest("/dashboard", dashboard_routes())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}
