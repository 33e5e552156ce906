/**
 * Tweet Request/Response Types
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use uuid::Uuid;

use crate::backend::feed::{get_flag, OwnerSummary};

/// Tweet row as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tweet with owner profile, counts and the requester's like flag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TweetView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    pub owner: OwnerSummary,
    pub likes_count: i64,
    pub comments_count: i64,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for TweetView {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            content: row.try_get("content")?,
            owner: OwnerSummary::from_row(row)?,
            likes_count: row.try_get("likes_count")?,
            comments_count: row.try_get("comments_count")?,
            is_liked: get_flag(row, "is_liked")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Body of `POST /tweets` and `PATCH /tweets/{tweetId}`
#[derive(Debug, Deserialize)]
pub struct TweetRequest {
    pub content: Option<String>,
}

/// `{ "tweets": [...] }`
#[derive(Debug, Serialize, Deserialize)]
pub struct TweetList {
    pub tweets: Vec<TweetView>,
}
