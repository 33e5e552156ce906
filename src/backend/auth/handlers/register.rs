/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /api/v1/users/register.
 *
 * # Registration Process
 *
 * 1. Validate that username, email, full name and password are present
 * 2. Normalize username and email (trimmed, lowercase)
 * 3. Check that neither is taken
 * 4. Create the user (the data layer hashes the password)
 * 5. Return the user without sensitive fields
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::auth::users::{create_user, find_by_username_or_email, NewUser};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::{validation, ApiResponse};

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing field or malformed email
/// * `409 Conflict` - Username or email already registered
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "fullName": "Alice Liddell",
///   "password": "rabbit-hole",
///   "avatar": "https://cdn.example.com/alice.png"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> BackendResult<ApiResponse<UserResponse>> {
    let username = validation::required(
        request.username.as_deref(),
        "username",
        "Username is required",
    )?
    .to_lowercase();
    let email =
        validation::required(request.email.as_deref(), "email", "Email is required")?
            .to_lowercase();
    let full_name = validation::required(
        request.full_name.as_deref(),
        "fullName",
        "Full name is required",
    )?;
    let password = validation::password(
        request.password.as_deref(),
        "password",
        "Password is required",
    )?;

    tracing::info!("Register request for username: {}, email: {}", username, email);

    if !validation::is_valid_email(&email) {
        tracing::warn!("Invalid email format: {}", email);
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if find_by_username_or_email(&state.db_pool, Some(&username), Some(&email))
        .await?
        .is_some()
    {
        tracing::warn!("Username or email already exists: {} / {}", username, email);
        return Err(BackendError::conflict(
            "User with this email or username already exists",
        ));
    }

    let user = create_user(
        &state.db_pool,
        NewUser {
            username,
            email,
            full_name,
            password,
            avatar: validation::optional(request.avatar.as_deref()),
            cover_image: validation::optional(request.cover_image.as_deref()),
        },
        state.auth().hash_cost,
    )
    .await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok(ApiResponse::created(
        UserResponse::from(user),
        "User registered successfully",
    ))
}
