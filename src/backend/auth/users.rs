/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations: account creation
 * with password hashing, lookups, profile updates, refresh token storage,
 * channel profiles and watch history.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::feed::{get_flag, OwnerSummary};
use crate::backend::videos::db::push_video_select;
use crate::backend::videos::types::VideoView;

/// User struct representing a user in the database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, lowercase)
    pub username: String,
    /// User email address (unique, lowercase)
    pub email: String,
    pub full_name: String,
    /// Avatar image URL
    pub avatar: Option<String>,
    /// Cover image URL
    pub cover_image: Option<String>,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Refresh token currently issued to this user
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Compare a plaintext password against the stored hash. Only the exact
    /// original matches; a password too long to hash in full never does.
    pub fn is_password_correct(&self, password: &str) -> Result<bool, bcrypt::BcryptError> {
        match bcrypt::non_truncating_verify(password, &self.password_hash) {
            Err(bcrypt::BcryptError::Truncation(_)) => Ok(false),
            result => result,
        }
    }
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            email: user.email.clone(),
        }
    }
}

/// Fields for a new account. The password is plaintext and is hashed by
/// `create_user`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
}

/// Public channel profile of a user as seen by a viewer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    pub subscribers_count: i64,
    pub channels_subscribed_to_count: i64,
    /// Whether the viewer is subscribed to this channel
    pub is_subscribed: bool,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for ChannelProfile {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            avatar: row.try_get("avatar")?,
            cover_image: row.try_get("cover_image")?,
            subscribers_count: row.try_get("subscribers_count")?,
            channels_subscribed_to_count: row.try_get("channels_subscribed_to_count")?,
            is_subscribed: get_flag(row, "is_subscribed")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Hash a plaintext password with bcrypt, refusing input bcrypt would truncate
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::non_truncating_hash(password, cost)
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `new_user` - Account fields with the plaintext password
/// * `hash_cost` - bcrypt cost factor
///
/// # Returns
/// Created user or error (a taken username or email is a unique violation)
pub async fn create_user(
    pool: &SqlitePool,
    new_user: NewUser,
    hash_cost: u32,
) -> BackendResult<User> {
    let password_hash = hash_password(&new_user.password, hash_cost)?;
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, full_name, avatar, cover_image, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.full_name)
    .bind(&new_user.avatar)
    .bind(&new_user.cover_image)
    .bind(&password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get user by email
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Find the account matching either a username or an email
pub async fn find_by_username_or_email(
    pool: &SqlitePool,
    username: Option<&str>,
    email: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ? OR email = ? LIMIT 1")
        .bind(username)
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Hash and store a new password
pub async fn update_password(
    pool: &SqlitePool,
    user_id: Uuid,
    new_password: &str,
    hash_cost: u32,
) -> BackendResult<()> {
    let password_hash = hash_password(new_password, hash_cost)?;

    sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(&password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Store (or clear, with `None`) the user's current refresh token
pub async fn set_refresh_token(
    pool: &SqlitePool,
    user_id: Uuid,
    refresh_token: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET refresh_token = ? WHERE id = ?")
        .bind(refresh_token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Update full name and/or email; `None` keeps the current value
pub async fn update_account_details(
    pool: &SqlitePool,
    user_id: Uuid,
    full_name: Option<&str>,
    email: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET full_name = COALESCE(?, full_name), email = COALESCE(?, email), updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(full_name)
    .bind(email)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Replace the avatar URL
pub async fn update_avatar(
    pool: &SqlitePool,
    user_id: Uuid,
    avatar: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET avatar = ?, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(avatar)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Replace the cover image URL
pub async fn update_cover_image(
    pool: &SqlitePool,
    user_id: Uuid,
    cover_image: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET cover_image = ?, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(cover_image)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Channel profile for `username` with subscription counts and whether
/// `viewer` is subscribed
pub async fn get_channel_profile(
    pool: &SqlitePool,
    username: &str,
    viewer: Uuid,
) -> Result<Option<ChannelProfile>, sqlx::Error> {
    sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT u.id, u.username, u.full_name, u.email, u.avatar, u.cover_image, u.created_at,
            (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS subscribers_count,
            (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id) AS channels_subscribed_to_count,
            EXISTS(SELECT 1 FROM subscriptions s WHERE s.channel_id = u.id AND s.subscriber_id = ?) AS is_subscribed
        FROM users u
        WHERE u.username = ?
        "#,
    )
    .bind(viewer)
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Record that `user_id` watched `video_id`, refreshing the time on re-watch
pub async fn record_watch(
    pool: &SqlitePool,
    user_id: Uuid,
    video_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO watch_history (user_id, video_id, watched_at)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, video_id) DO UPDATE SET watched_at = excluded.watched_at
        "#,
    )
    .bind(user_id)
    .bind(video_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Videos the user has watched, most recent first
pub async fn get_watch_history(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<VideoView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_video_select(&mut qb, user_id);
    qb.push(" JOIN watch_history w ON w.video_id = v.id WHERE w.user_id = ");
    qb.push_bind(user_id);
    qb.push(" AND (v.is_published = 1 OR v.owner_id = ");
    qb.push_bind(user_id);
    qb.push(") ORDER BY w.watched_at DESC, w.rowid DESC");

    qb.build_query_as::<VideoView>().fetch_all(pool).await
}
