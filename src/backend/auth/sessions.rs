/**
 * Session Management and JWT Tokens
 *
 * This module handles access and refresh token generation and validation.
 *
 * # Token Kinds
 *
 * - **Access token**: short-lived, carries the user's identity so the auth
 *   middleware can attach it to the request.
 * - **Refresh token**: long-lived, carries only the user id and a unique
 *   token id. It is stored on the user row and rotated on every refresh.
 *
 * The two kinds are signed with different secrets, so one can never be
 * used in place of the other.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::server::config::AuthConfig;

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Refresh token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshClaims {
    /// User ID
    pub sub: String,
    /// Unique token ID, makes every issued refresh token distinct
    pub jti: String,
    pub exp: u64,
    pub iat: u64,
}

/// Issued-at and expiry timestamps for a token lifetime
fn token_window(lifetime: std::time::Duration) -> (u64, u64) {
    let now = Utc::now().timestamp().max(0) as u64;
    (now, now.saturating_add(lifetime.as_secs()))
}

/// Create an access token for a user
///
/// # Arguments
/// * `config` - Secrets and lifetimes
/// * `user` - The authenticated user
///
/// # Returns
/// Signed HS256 JWT
pub fn create_access_token(
    config: &AuthConfig,
    user: &User,
) -> Result<String, jsonwebtoken::errors::Error> {
    let (iat, exp) = token_window(config.access_expiry);

    let claims = AccessClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        exp,
        iat,
    };

    let key = EncodingKey::from_secret(config.access_secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Create a refresh token for a user
pub fn create_refresh_token(
    config: &AuthConfig,
    user_id: Uuid,
) -> Result<String, jsonwebtoken::errors::Error> {
    let (iat, exp) = token_window(config.refresh_expiry);

    let claims = RefreshClaims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4().to_string(),
        exp,
        iat,
    };

    let key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode an access token
pub fn verify_access_token(
    config: &AuthConfig,
    token: &str,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.access_secret.as_bytes());
    let token_data = decode::<AccessClaims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Verify and decode a refresh token
pub fn verify_refresh_token(
    config: &AuthConfig,
    token: &str,
) -> Result<RefreshClaims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.refresh_secret.as_bytes());
    let token_data = decode::<RefreshClaims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Parse the user ID carried in a token subject
pub fn user_id_from_subject(sub: &str) -> Option<Uuid> {
    Uuid::parse_str(sub).ok()
}
