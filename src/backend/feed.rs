//! Feed Query Fragments
//!
//! Building blocks shared by every aggregation query that assembles a
//! composite view: the owner profile projection, like and comment counts,
//! and the "liked by the requester" flag.
//!
//! Column and alias arguments are always static strings from this crate;
//! request values only ever go through `push_bind`.

use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};
use uuid::Uuid;

/// Owner profile embedded in videos, tweets and comments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub email: String,
}

impl OwnerSummary {
    /// Read the columns pushed by [`push_owner_columns`]
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("owner_id")?,
            username: row.try_get("owner_username")?,
            full_name: row.try_get("owner_full_name")?,
            avatar: row.try_get("owner_avatar")?,
            email: row.try_get("owner_email")?,
        })
    }
}

/// Likeable targets and their column in the `likes` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Video,
    Comment,
    Tweet,
}

impl LikeTarget {
    /// Column of `likes` referencing this target
    pub fn column(self) -> &'static str {
        match self {
            Self::Video => "video_id",
            Self::Comment => "comment_id",
            Self::Tweet => "tweet_id",
        }
    }

    /// Table holding the target rows
    pub fn table(self) -> &'static str {
        match self {
            Self::Video => "videos",
            Self::Comment => "comments",
            Self::Tweet => "tweets",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Comment => "Comment",
            Self::Tweet => "Tweet",
        }
    }
}

/// `owner_*` columns from the users table aliased `u`
pub fn push_owner_columns(qb: &mut QueryBuilder<'_, Sqlite>) {
    qb.push(
        "u.id AS owner_id, u.username AS owner_username, u.full_name AS owner_full_name, \
         u.avatar AS owner_avatar, u.email AS owner_email",
    );
}

/// `likes_count` and `is_liked` for the row whose id expression is `id_expr`
pub fn push_like_stats(
    qb: &mut QueryBuilder<'_, Sqlite>,
    target: LikeTarget,
    id_expr: &str,
    viewer: Uuid,
) {
    let column = target.column();
    qb.push(format!(
        "(SELECT COUNT(*) FROM likes lc WHERE lc.{column} = {id_expr}) AS likes_count, \
         EXISTS(SELECT 1 FROM likes lv WHERE lv.{column} = {id_expr} AND lv.liked_by = "
    ));
    qb.push_bind(viewer);
    qb.push(") AS is_liked");
}

/// `comments_count` for a video or tweet
pub fn push_comment_count(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, id_expr: &str) {
    qb.push(format!(
        "(SELECT COUNT(*) FROM comments cc WHERE cc.{column} = {id_expr}) AS comments_count"
    ));
}

/// Read a SQL boolean expression (`EXISTS`, comparisons) as `bool`
pub fn get_flag(row: &SqliteRow, column: &str) -> Result<bool, sqlx::Error> {
    let value: i64 = row.try_get(column)?;
    Ok(value != 0)
}
