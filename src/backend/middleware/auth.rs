/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the access token from the
 * Authorization header and provides the user to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::{user_id_from_subject, verify_access_token};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data attached to the request
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl AuthenticatedUser {
    /// Owner check: reject with 403 unless this user owns the resource
    pub fn ensure_owner(&self, owner_id: Uuid, message: &str) -> Result<(), BackendError> {
        if owner_id == self.user_id {
            Ok(())
        } else {
            tracing::warn!(
                "User {} attempted to modify a resource owned by {}",
                self.user_id,
                owner_id
            );
            Err(BackendError::forbidden(message))
        }
    }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the access token from the Authorization header
/// 2. Verifies the token
/// 3. Loads the user, so deleted accounts lose access immediately
/// 4. Attaches the user to request extensions for use in handlers
///
/// Returns a 401 envelope if the token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Unauthorized request")
        })?;

    // Extract token (format: "Bearer <token>")
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Unauthorized request")
    })?;

    let claims = verify_access_token(app_state.auth(), token.trim()).map_err(|e| {
        tracing::warn!("Invalid access token: {:?}", e);
        BackendError::unauthorized("Invalid access token")
    })?;

    let user_id = user_id_from_subject(&claims.sub).ok_or_else(|| {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        BackendError::unauthorized("Invalid access token")
    })?;

    let user = get_user_by_id(&app_state.db_pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for unknown user {}", user_id);
            BackendError::unauthorized("Invalid access token")
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        email: user.email,
        full_name: user.full_name,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
///
/// Reads the user attached by [`auth_middleware`]; only valid on routes
/// behind that middleware.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Unauthorized request")
            })?;

        Ok(AuthUser(user))
    }
}
