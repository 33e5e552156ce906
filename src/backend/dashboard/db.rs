/**
 * Dashboard Queries
 */

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// Totals for one channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    /// Videos uploaded, published or not
    pub total_videos: i64,
    /// Views summed over all videos
    pub total_views: i64,
    pub total_subscribers: i64,
    /// Likes received on the channel's videos
    pub total_likes: i64,
    pub total_tweets: i64,
}

pub async fn get_channel_stats(
    pool: &SqlitePool,
    channel_id: Uuid,
) -> Result<ChannelStats, sqlx::Error> {
    sqlx::query_as::<_, ChannelStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM videos WHERE owner_id = ?1) AS total_videos,
            (SELECT COALESCE(SUM(views), 0) FROM videos WHERE owner_id = ?1) AS total_views,
            (SELECT COUNT(*) FROM subscriptions WHERE channel_id = ?1) AS total_subscribers,
            (SELECT COUNT(*) FROM likes l JOIN videos v ON v.id = l.video_id WHERE v.owner_id = ?1) AS total_likes,
            (SELECT COUNT(*) FROM tweets WHERE owner_id = ?1) AS total_tweets
        "#,
    )
    .bind(channel_id)
    .fetch_one(pool)
    .await
}
