/**
 * Token Handlers
 *
 * Refresh-token rotation and logout. Each user holds at most one valid
 * refresh token: logging in or refreshing replaces it, logging out clears
 * it, and a token that no longer matches the stored one is rejected.
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::{RefreshRequest, TokenPair};
use crate::backend::auth::sessions::{
    create_access_token, create_refresh_token, user_id_from_subject, verify_refresh_token,
};
use crate::backend::auth::users::{get_user_by_id, set_refresh_token, User};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ApiJson;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{validation, ApiResponse};

/// Sign a fresh token pair for `user` and store the refresh token
pub async fn issue_tokens(state: &AppState, user: &User) -> BackendResult<TokenPair> {
    let access_token = create_access_token(state.auth(), user)?;
    let refresh_token = create_refresh_token(state.auth(), user.id)?;

    set_refresh_token(&state.db_pool, user.id, Some(&refresh_token)).await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Exchange a refresh token for a new token pair
///
/// # Errors
///
/// * `401 Unauthorized` - Token missing, invalid, expired, or already rotated
pub async fn refresh_access_token(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> BackendResult<ApiResponse<TokenPair>> {
    let incoming = validation::optional(request.refresh_token.as_deref())
        .ok_or_else(|| BackendError::unauthorized("Unauthorized request"))?;

    let claims = verify_refresh_token(state.auth(), &incoming).map_err(|e| {
        tracing::warn!("Invalid refresh token: {:?}", e);
        BackendError::unauthorized("Invalid refresh token")
    })?;

    let user_id = user_id_from_subject(&claims.sub)
        .ok_or_else(|| BackendError::unauthorized("Invalid refresh token"))?;

    let user = get_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("Invalid refresh token"))?;

    if user.refresh_token.as_deref() != Some(incoming.as_str()) {
        tracing::warn!("Stale refresh token presented for user {}", user.id);
        return Err(BackendError::unauthorized(
            "Refresh token is expired or used",
        ));
    }

    let tokens = issue_tokens(&state, &user).await?;

    tracing::debug!("Rotated refresh token for user {}", user.id);

    Ok(ApiResponse::ok(tokens, "Access token refreshed"))
}

/// Revoke the requester's refresh token
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<ApiResponse<Option<()>>> {
    set_refresh_token(&state.db_pool, user.user_id, None).await?;

    tracing::info!("User logged out: {}", user.username);

    Ok(ApiResponse::ok(None, "User logged out"))
}
