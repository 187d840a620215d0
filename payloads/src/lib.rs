pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of posts in one page of any feed. The server-rendered first page
/// and every subsequent infinite-scroll fetch use the same value, which is
/// how a short page is recognized as the end of a feed.
pub const PAGE_SIZE: u32 = 10;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Avatars larger than this are rejected by the api and by the upload form.
pub const MAX_AVATAR_SIZE: usize = 5 * 1024 * 1024;

/// Id type wrapper helps ensure we don't mix up ids for different tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "use-sqlx", sqlx(transparent))]
pub struct UserId(pub Uuid);

/// Parses the hyphenated form used in profile urls.
impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Posts use a database sequence, so ids increase with insertion order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "use-sqlx", sqlx(transparent))]
pub struct PostId(pub i64);

/// Which slice of the global post stream a home timeline shows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TimelineScope {
    /// Every post from every user.
    #[default]
    All,
    /// Only posts by users the viewer follows.
    Following,
}
