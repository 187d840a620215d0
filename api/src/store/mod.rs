//! Database store for the Gobi API.
//!
//! ## Design Decisions
//!
//! ### Cascading deletes
//! Every table hanging off `users` and `posts` uses `ON DELETE CASCADE`, so
//! deleting an account removes its avatar, posts, likes and follow edges in
//! one statement, and deleting a post removes its likes.
//!
//! ### Idempotent relations
//! Likes and follows are keyed on the pair of ids and inserted with
//! `ON CONFLICT DO NOTHING`. Repeating a like or follow is a no-op, and so is
//! removing one that does not exist. Foreign key violations on insert are
//! reported as the missing post or user.
//!
//! ### Stable ordering
//! Posts are ordered by `created_at DESC, id DESC`. The id tiebreak keeps
//! offset pages disjoint when several posts share a timestamp, which is the
//! norm under mocked time.
//!
//! ### Time Source Dependency
//! Functions that write timestamps take a `TimeSource` rather than reading
//! the clock, so tests control ordering.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTs;
use sqlx::FromRow;

use payloads::{UserId, responses::OptionalTimestamp};

mod avatars;
mod feeds;
mod posts;
mod social;
mod users;

pub use avatars::{delete_avatar, read_avatar, set_avatar};
pub use feeds::{
    escape_like_pattern, liked_posts, search_posts, timeline, user_posts,
};
pub use posts::{create_post, delete_post, like_post, read_post, unlike_post};
pub use social::{follow_user, read_viewer_context, unfollow_user};
pub use users::{
    create_user, delete_user, get_user_by_email, read_public_profile,
    read_user, update_user_profile,
};

/// A complete user row that stays in the backend.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub username: Option<String>,
    pub gobi: Option<String>,
    #[sqlx(try_from = "OptionalTimestamp")]
    pub avatar_updated_at: Option<Timestamp>,
    #[sqlx(try_from = "SqlxTs")]
    pub created_at: Timestamp,
    #[sqlx(try_from = "SqlxTs")]
    pub updated_at: Timestamp,
}

impl From<User> for payloads::responses::UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            username: user.username,
            gobi: user.gobi,
            avatar_updated_at: user.avatar_updated_at,
        }
    }
}

/// A stored avatar image.
#[derive(Debug, Clone, FromRow)]
pub struct Avatar {
    pub user_id: UserId,
    pub image_data: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User not found")]
    UserNotFound,
    #[error("Post not found")]
    PostNotFound,
    #[error("Avatar not found")]
    AvatarNotFound,
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Profile incomplete: set a username and gobi before posting")]
    ProfileIncomplete,
    #[error("{0}")]
    InvalidProfile(String),
    #[error("{0}")]
    InvalidPost(String),
    #[error("Avatar must be at most {} MiB", payloads::MAX_AVATAR_SIZE / (1024 * 1024))]
    AvatarTooLarge,
    #[error("Avatar must be a PNG or JPEG image")]
    UnsupportedAvatarType,
    #[error("You cannot follow yourself")]
    CannotFollowSelf,
    #[error("Unique constraint violation")]
    NotUnique(#[source] sqlx::Error),
    #[error("Database error")]
    Database(#[source] sqlx::Error),
    #[error("Unexpected error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return StoreError::NotUnique(e);
        }
        StoreError::Database(e)
    }
}

/// Map a foreign key violation to `missing`, anything else through the
/// default conversion.
fn map_foreign_key_error(e: sqlx::Error, missing: StoreError) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return missing;
    }
    e.into()
}
