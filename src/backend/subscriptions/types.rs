/**
 * Subscription Request/Response Types
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use uuid::Uuid;

use crate::backend::tweets::types::TweetView;
use crate::backend::videos::types::{VideoSummary, VideoView};
use crate::shared::pagination::MAX_LIMIT;

pub const DEFAULT_SUGGESTED_LIMIT: u32 = 10;
pub const DEFAULT_CONTENT_LIMIT: u32 = 20;

/// `{ "isSubscribed": bool }`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub is_subscribed: bool,
}

/// Read the `latest_video_*` columns of a channel row
fn latest_video(row: &SqliteRow) -> Result<Option<VideoSummary>, sqlx::Error> {
    let id: Option<Uuid> = row.try_get("latest_video_id")?;
    let Some(id) = id else {
        return Ok(None);
    };

    Ok(Some(VideoSummary {
        id,
        title: row.try_get("latest_video_title")?,
        thumbnail: row.try_get("latest_video_thumbnail")?,
        views: row.try_get("latest_video_views")?,
        duration: row.try_get("latest_video_duration")?,
        created_at: row.try_get("latest_video_created_at")?,
    }))
}

/// One subscriber of a channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSubscribers {
    pub subscribers: Vec<Subscriber>,
    pub total_subscribers: usize,
}

/// A channel the user subscribes to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedChannel {
    pub channel_id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub email: String,
    pub subscribers_count: i64,
    pub latest_video: Option<VideoSummary>,
    pub subscribed_at: DateTime<Utc>,
    pub channel_created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for SubscribedChannel {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            channel_id: row.try_get("channel_id")?,
            username: row.try_get("username")?,
            full_name: row.try_get("full_name")?,
            avatar: row.try_get("avatar")?,
            email: row.try_get("email")?,
            subscribers_count: row.try_get("subscribers_count")?,
            latest_video: latest_video(row)?,
            subscribed_at: row.try_get("subscribed_at")?,
            channel_created_at: row.try_get("channel_created_at")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedChannels {
    pub channels: Vec<SubscribedChannel>,
    pub total_subscriptions: usize,
}

/// A channel suggested to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedChannel {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub email: String,
    pub subscribers_count: i64,
    pub videos_count: i64,
    pub latest_video: Option<VideoSummary>,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for SuggestedChannel {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            full_name: row.try_get("full_name")?,
            avatar: row.try_get("avatar")?,
            email: row.try_get("email")?,
            subscribers_count: row.try_get("subscribers_count")?,
            videos_count: row.try_get("videos_count")?,
            latest_video: latest_video(row)?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedChannels {
    pub channels: Vec<SuggestedChannel>,
    pub total_suggested: usize,
}

/// `?limit`
#[derive(Debug, Default, Deserialize)]
pub struct SuggestedQuery {
    pub limit: Option<u32>,
}

impl SuggestedQuery {
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_SUGGESTED_LIMIT)
            .clamp(1, MAX_LIMIT)
    }
}

/// Which kinds of content the subscription feed returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    All,
    Videos,
    Tweets,
}

/// `?limit&type`
#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    pub limit: Option<u32>,
    #[serde(rename = "type", default)]
    pub kind: ContentKind,
}

impl ContentQuery {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_CONTENT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Rows fetched per kind: half the limit each when mixing kinds
    pub fn per_kind_limit(&self) -> u32 {
        match self.kind {
            ContentKind::All => self.limit() / 2,
            ContentKind::Videos | ContentKind::Tweets => self.limit(),
        }
    }
}

/// Feed entry tagged with its kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "contentType", rename_all = "lowercase")]
pub enum FeedItem {
    Video(VideoView),
    Tweet(TweetView),
}

impl FeedItem {
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Video(video) => video.created_at,
            Self::Tweet(tweet) => tweet.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFeed {
    pub content: Vec<FeedItem>,
    pub total_content: usize,
}

/// Merge per-kind lists newest first and keep at most `limit` entries
pub fn merge_feed(mut items: Vec<FeedItem>, limit: usize) -> Vec<FeedItem> {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    items.truncate(limit);
    items
}
