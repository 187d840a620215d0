use crate::{PostId, UserId};
use jiff::Timestamp;
#[cfg(feature = "use-sqlx")]
use jiff_sqlx::Timestamp as SqlxTs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The logged in user's own account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    /// Unset until the user fills in their profile after signup.
    pub username: Option<String>,
    /// The suffix every new post must contain.
    pub gobi: Option<String>,
    /// Changes on every avatar upload, so it doubles as a cache buster.
    pub avatar_updated_at: Option<Timestamp>,
}

impl UserProfile {
    /// Users may only post once both a username and a gobi are set.
    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.gobi.is_some()
    }
}

/// Another user's profile as seen from their profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub user_id: UserId,
    pub username: Option<String>,
    pub gobi: Option<String>,
    pub avatar_updated_at: Option<Timestamp>,
    /// How many users this user follows.
    pub following_count: i64,
    /// How many users follow this user.
    pub follower_count: i64,
}

/// Author details embedded in each post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub user_id: UserId,
    pub username: Option<String>,
    pub avatar_updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: PostAuthor,
    pub content: String,
    /// The author's gobi at the time of posting.
    pub gobi: String,
    pub like_count: i64,
    pub created_at: Timestamp,
}

/// Flat row shape used by the api to read posts joined with their author.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::FromRow))]
pub struct PostRow {
    pub id: PostId,
    pub user_id: UserId,
    pub username: Option<String>,
    #[cfg_attr(feature = "use-sqlx", sqlx(try_from = "OptionalTimestamp"))]
    pub avatar_updated_at: Option<Timestamp>,
    pub content: String,
    pub gobi: String,
    pub like_count: i64,
    #[cfg_attr(feature = "use-sqlx", sqlx(try_from = "SqlxTs"))]
    pub created_at: Timestamp,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            author: PostAuthor {
                user_id: row.user_id,
                username: row.username,
                avatar_updated_at: row.avatar_updated_at,
            },
            content: row.content,
            gobi: row.gobi,
            like_count: row.like_count,
            created_at: row.created_at,
        }
    }
}

/// Helper for decoding nullable timestamp columns with sqlx.
#[cfg(feature = "use-sqlx")]
#[derive(Debug, Clone, sqlx::Type)]
#[sqlx(transparent)]
pub struct OptionalTimestamp(pub Option<SqlxTs>);

#[cfg(feature = "use-sqlx")]
impl From<OptionalTimestamp> for Option<Timestamp> {
    fn from(value: OptionalTimestamp) -> Self {
        value.0.map(|ts| ts.to_jiff())
    }
}

/// What the logged in user has already liked and followed.
///
/// Fetched once per page render and handed to the components that need it,
/// rather than living in global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    pub user_id: Option<UserId>,
    pub liked_post_ids: HashSet<PostId>,
    pub following_user_ids: HashSet<UserId>,
}

impl ViewerContext {
    pub fn is_own(&self, user_id: &UserId) -> bool {
        self.user_id.as_ref() == Some(user_id)
    }

    pub fn has_liked(&self, post_id: &PostId) -> bool {
        self.liked_post_ids.contains(post_id)
    }

    pub fn is_following(&self, user_id: &UserId) -> bool {
        self.following_user_ids.contains(user_id)
    }

    /// Record the outcome of a like or unlike that the server confirmed.
    pub fn set_liked(&mut self, post_id: PostId, liked: bool) {
        if liked {
            self.liked_post_ids.insert(post_id);
        } else {
            self.liked_post_ids.remove(&post_id);
        }
    }

    pub fn set_following(&mut self, user_id: UserId, following: bool) {
        if following {
            self.following_user_ids.insert(user_id);
        } else {
            self.following_user_ids.remove(&user_id);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub message: String,
}
