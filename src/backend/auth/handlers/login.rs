/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/v1/users/login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by username or email
 * 2. Verify password using bcrypt
 * 3. Issue an access token and a refresh token
 * 4. Store the refresh token so it can be rotated or revoked
 * 5. Return both tokens and the user
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - User passwords are never returned in responses
 */

use axum::extract::State;

use crate::backend::auth::handlers::tokens::issue_tokens;
use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse, UserResponse};
use crate::backend::auth::users::find_by_username_or_email;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::{validation, ApiResponse};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Neither username nor email given, or no password
/// * `404 Not Found` - No account matches the identifier
/// * `401 Unauthorized` - Password is incorrect
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "rabbit-hole"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "statuscode": 200,
///   "data": {
///     "user": { "_id": "...", "username": "alice", "email": "alice@example.com" },
///     "accessToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///     "refreshToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
///   },
///   "message": "User logged in successfully",
///   "success": true
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> BackendResult<ApiResponse<LoginResponse>> {
    let username = validation::optional(request.username.as_deref()).map(|u| u.to_lowercase());
    let email = validation::optional(request.email.as_deref()).map(|e| e.to_lowercase());

    if username.is_none() && email.is_none() {
        return Err(BackendError::bad_request("Username or email is required"));
    }
    let password = validation::required_secret(
        request.password.as_deref(),
        "password",
        "Password is required",
    )?;

    tracing::info!(
        "Login attempt for: {}",
        username.as_deref().or(email.as_deref()).unwrap_or_default()
    );

    let user = find_by_username_or_email(&state.db_pool, username.as_deref(), email.as_deref())
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown account");
            BackendError::not_found("User does not exist")
        })?;

    if !user.is_password_correct(&password)? {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(BackendError::unauthorized("Invalid user credentials"));
    }

    let tokens = issue_tokens(&state, &user).await?;

    tracing::info!("User logged in: {}", user.username);

    Ok(ApiResponse::ok(
        LoginResponse {
            user: UserResponse::from(user),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        },
        "User logged in successfully",
    ))
}
