/**
 * Comment Request/Response Types
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use uuid::Uuid;

use crate::backend::feed::{get_flag, OwnerSummary};
use crate::shared::PageParams;

/// What a comment is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    Video(Uuid),
    Tweet(Uuid),
}

impl CommentTarget {
    /// Column of `comments` referencing the target
    pub fn column(self) -> &'static str {
        match self {
            Self::Video(_) => "video_id",
            Self::Tweet(_) => "tweet_id",
        }
    }

    pub fn id(self) -> Uuid {
        match self {
            Self::Video(id) | Self::Tweet(id) => id,
        }
    }
}

/// Comment row as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    #[serde(rename = "video")]
    pub video_id: Option<Uuid>,
    #[serde(rename = "tweet")]
    pub tweet_id: Option<Uuid>,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment with owner profile, like count and the requester's like flag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    #[serde(rename = "video", skip_serializing_if = "Option::is_none", default)]
    pub video_id: Option<Uuid>,
    #[serde(rename = "tweet", skip_serializing_if = "Option::is_none", default)]
    pub tweet_id: Option<Uuid>,
    pub owner: OwnerSummary,
    pub likes_count: i64,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for CommentView {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            content: row.try_get("content")?,
            video_id: row.try_get("video_id")?,
            tweet_id: row.try_get("tweet_id")?,
            owner: OwnerSummary::from_row(row)?,
            likes_count: row.try_get("likes_count")?,
            is_liked: get_flag(row, "is_liked")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Body of comment create and update requests
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: Option<String>,
}

/// `?page&limit`
#[derive(Debug, Default, Deserialize)]
pub struct CommentListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CommentListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams::new(self.page, self.limit)
    }
}
