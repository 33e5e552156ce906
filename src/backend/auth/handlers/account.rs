/**
 * Account Handlers
 *
 * Handlers for the signed-in user's own account: password, profile
 * details, images, plus the public channel profile and watch history.
 */

use axum::extract::State;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{
    AvatarRequest, ChangePasswordRequest, CoverImageRequest, UpdateAccountRequest, UserResponse,
};
use crate::backend::auth::users::{
    self, get_channel_profile, get_user_by_email, get_user_by_id, get_watch_history,
    update_account_details, update_password, ChannelProfile,
};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::videos::types::VideoView;
use crate::shared::{validation, ApiResponse};

/// Change the requester's password
///
/// # Errors
///
/// * `400 Bad Request` - Missing field or wrong old password
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> BackendResult<ApiResponse<Option<()>>> {
    let old_password = validation::required_secret(
        request.old_password.as_deref(),
        "oldPassword",
        "Old password is required",
    )?;
    let new_password = validation::password(
        request.new_password.as_deref(),
        "newPassword",
        "New password is required",
    )?;

    let user = get_user_by_id(&state.db_pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if !user.is_password_correct(&old_password)? {
        tracing::warn!("Wrong old password for user: {}", user.username);
        return Err(BackendError::bad_request("Invalid old password"));
    }

    update_password(&state.db_pool, user.id, &new_password, state.auth().hash_cost).await?;

    tracing::info!("Password changed for user: {}", user.username);

    Ok(ApiResponse::ok(None, "Password changed successfully"))
}

/// Get current user handler
pub async fn current_user(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> BackendResult<ApiResponse<UserResponse>> {
    let user = get_user_by_id(&pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Current user fetched successfully",
    ))
}

/// Update full name and/or email
///
/// # Errors
///
/// * `400 Bad Request` - Neither field given, or malformed email
/// * `409 Conflict` - Email belongs to another account
pub async fn update_account(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<UpdateAccountRequest>,
) -> BackendResult<ApiResponse<UserResponse>> {
    let full_name = validation::optional(request.full_name.as_deref());
    let email = validation::optional(request.email.as_deref()).map(|e| e.to_lowercase());

    if full_name.is_none() && email.is_none() {
        return Err(BackendError::bad_request(
            "Full name or email is required",
        ));
    }

    if let Some(email) = email.as_deref() {
        if !validation::is_valid_email(email) {
            return Err(BackendError::bad_request("Invalid email format"));
        }
        if let Some(existing) = get_user_by_email(&pool, email).await? {
            if existing.id != auth.user_id {
                tracing::warn!("Email {} already taken", email);
                return Err(BackendError::conflict("Email is already in use"));
            }
        }
    }

    let user =
        update_account_details(&pool, auth.user_id, full_name.as_deref(), email.as_deref())
            .await?;

    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Account details updated successfully",
    ))
}

/// Replace the requester's avatar URL
pub async fn update_avatar(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<AvatarRequest>,
) -> BackendResult<ApiResponse<UserResponse>> {
    let avatar = validation::required(
        request.avatar.as_deref(),
        "avatar",
        "Avatar URL is required",
    )?;

    let user = users::update_avatar(&pool, auth.user_id, &avatar).await?;

    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Avatar updated successfully",
    ))
}

/// Replace the requester's cover image URL
pub async fn update_cover_image(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<CoverImageRequest>,
) -> BackendResult<ApiResponse<UserResponse>> {
    let cover_image = validation::required(
        request.cover_image.as_deref(),
        "coverImage",
        "Cover image URL is required",
    )?;

    let user = users::update_cover_image(&pool, auth.user_id, &cover_image).await?;

    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Cover image updated successfully",
    ))
}

/// Public channel profile by username
pub async fn get_user_channel_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    ApiPath(username): ApiPath<String>,
) -> BackendResult<ApiResponse<ChannelProfile>> {
    let username = username.trim().to_lowercase();
    if username.is_empty() {
        return Err(BackendError::bad_request("Username is missing"));
    }

    let profile = get_channel_profile(&pool, &username, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Channel does not exist"))?;

    Ok(ApiResponse::ok(profile, "User channel fetched successfully"))
}

/// Videos the requester has watched, most recent first
pub async fn watch_history(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> BackendResult<ApiResponse<Vec<VideoView>>> {
    let history = get_watch_history(&pool, auth.user_id).await?;
    Ok(ApiResponse::ok(history, "Watch history fetched successfully"))
}
