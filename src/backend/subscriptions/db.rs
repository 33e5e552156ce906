/**
 * Subscription Database Operations
 *
 * A subscription row links a subscriber to a channel (both users). The
 * `(subscriber_id, channel_id)` pair is unique.
 */

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::subscriptions::types::{SubscribedChannel, Subscriber, SuggestedChannel};
use crate::backend::tweets::db::push_tweet_select;
use crate::backend::tweets::types::TweetView;
use crate::backend::videos::db::push_video_select;
use crate::backend::videos::types::VideoView;

/// Columns and join for the newest published video of channel `u`
const LATEST_VIDEO_COLUMNS: &str = "latest.id AS latest_video_id, latest.title AS latest_video_title, \
     latest.thumbnail AS latest_video_thumbnail, latest.views AS latest_video_views, \
     latest.duration AS latest_video_duration, latest.created_at AS latest_video_created_at";

const LATEST_VIDEO_JOIN: &str = " LEFT JOIN videos latest ON latest.id = (\
     SELECT lv2.id FROM videos lv2 WHERE lv2.owner_id = u.id AND lv2.is_published = 1 \
     ORDER BY lv2.created_at DESC, lv2.rowid DESC LIMIT 1)";

/// Subscribe or unsubscribe; returns the new state
///
/// Each statement commits on its own so concurrent toggles never upgrade a
/// read snapshot to a write. When another request subscribes first the
/// insert is a no-op, which still means "subscribed".
pub async fn toggle_subscription(
    pool: &SqlitePool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let removed = sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = ? AND channel_id = ?")
        .bind(subscriber_id)
        .bind(channel_id)
        .execute(pool)
        .await?;

    if removed.rows_affected() > 0 {
        return Ok(false);
    }

    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO subscriptions (id, subscriber_id, channel_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(subscriber_id)
    .bind(channel_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(true)
}

/// Subscribers of a channel, most recent first
pub async fn get_channel_subscribers(
    pool: &SqlitePool,
    channel_id: Uuid,
) -> Result<Vec<Subscriber>, sqlx::Error> {
    sqlx::query_as::<_, Subscriber>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar, s.created_at AS subscribed_at
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.channel_id = ?
        ORDER BY s.created_at DESC, s.rowid DESC
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await
}

/// Channels a user subscribes to with their subscriber count and latest
/// video, most recent subscription first
pub async fn get_subscribed_channels(
    pool: &SqlitePool,
    subscriber_id: Uuid,
) -> Result<Vec<SubscribedChannel>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "SELECT u.id AS channel_id, u.username, u.full_name, u.avatar, u.email, \
         u.created_at AS channel_created_at, s.created_at AS subscribed_at, \
         (SELECT COUNT(*) FROM subscriptions sc WHERE sc.channel_id = u.id) AS subscribers_count, ",
    );
    qb.push(LATEST_VIDEO_COLUMNS);
    qb.push(" FROM subscriptions s JOIN users u ON u.id = s.channel_id");
    qb.push(LATEST_VIDEO_JOIN);
    qb.push(" WHERE s.subscriber_id = ");
    qb.push_bind(subscriber_id);
    qb.push(" ORDER BY s.created_at DESC, s.rowid DESC");

    qb.build_query_as::<SubscribedChannel>().fetch_all(pool).await
}

/// Channels the user does not subscribe to (excluding themself), most
/// subscribed first, then newest
pub async fn get_suggested_channels(
    pool: &SqlitePool,
    user_id: Uuid,
    limit: u32,
) -> Result<Vec<SuggestedChannel>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "SELECT u.id, u.username, u.full_name, u.avatar, u.email, u.created_at, \
         (SELECT COUNT(*) FROM subscriptions sc WHERE sc.channel_id = u.id) AS subscribers_count, \
         (SELECT COUNT(*) FROM videos vc WHERE vc.owner_id = u.id AND vc.is_published = 1) AS videos_count, ",
    );
    qb.push(LATEST_VIDEO_COLUMNS);
    qb.push(" FROM users u");
    qb.push(LATEST_VIDEO_JOIN);
    qb.push(" WHERE u.id != ");
    qb.push_bind(user_id);
    qb.push(" AND u.id NOT IN (SELECT channel_id FROM subscriptions WHERE subscriber_id = ");
    qb.push_bind(user_id);
    qb.push(") ORDER BY subscribers_count DESC, u.created_at DESC, u.rowid DESC LIMIT ");
    qb.push_bind(limit as i64);

    qb.build_query_as::<SuggestedChannel>().fetch_all(pool).await
}

const SUBSCRIBED_OWNERS: &str = "(SELECT channel_id FROM subscriptions WHERE subscriber_id = ";

/// Newest published videos of the channels `user_id` subscribes to
pub async fn get_subscribed_videos(
    pool: &SqlitePool,
    user_id: Uuid,
    limit: u32,
) -> Result<Vec<VideoView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_video_select(&mut qb, user_id);
    qb.push(" WHERE v.is_published = 1 AND v.owner_id IN ");
    qb.push(SUBSCRIBED_OWNERS);
    qb.push_bind(user_id);
    qb.push(") ORDER BY v.created_at DESC, v.rowid DESC LIMIT ");
    qb.push_bind(limit as i64);

    qb.build_query_as::<VideoView>().fetch_all(pool).await
}

/// Newest tweets of the channels `user_id` subscribes to
pub async fn get_subscribed_tweets(
    pool: &SqlitePool,
    user_id: Uuid,
    limit: u32,
) -> Result<Vec<TweetView>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
    push_tweet_select(&mut qb, user_id);
    qb.push(" WHERE t.owner_id IN ");
    qb.push(SUBSCRIBED_OWNERS);
    qb.push_bind(user_id);
    qb.push(") ORDER BY t.created_at DESC, t.rowid DESC LIMIT ");
    qb.push_bind(limit as i64);

    qb.build_query_as::<TweetView>().fetch_all(pool).await
}
