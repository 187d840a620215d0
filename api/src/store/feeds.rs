//! Paged post listings. Every feed is newest first with the id as tiebreak,
//! so consecutive offset pages never overlap.

use sqlx::PgPool;

use payloads::{
    TimelineScope, UserId,
    requests::PageRequest,
    responses::{Post, PostRow},
};

use super::StoreError;
use super::posts::POST_COLUMNS;

fn into_posts(rows: Vec<PostRow>) -> Vec<Post> {
    rows.into_iter().map(Post::from).collect()
}

/// The home timeline. `Following` shows only posts by users `viewer` follows.
pub async fn timeline(
    viewer: &UserId,
    scope: TimelineScope,
    page: &PageRequest,
    pool: &PgPool,
) -> Result<Vec<Post>, StoreError> {
    let rows = match scope {
        TimelineScope::All => {
            sqlx::query_as::<_, PostRow>(&format!(
                "SELECT {POST_COLUMNS}
                FROM posts p JOIN users u ON u.id = p.user_id
                ORDER BY p.created_at DESC, p.id DESC
                LIMIT $1 OFFSET $2"
            ))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?
        }
        TimelineScope::Following => {
            sqlx::query_as::<_, PostRow>(&format!(
                "SELECT {POST_COLUMNS}
                FROM posts p JOIN users u ON u.id = p.user_id
                WHERE p.user_id IN (
                    SELECT following_id FROM follows WHERE follower_id = $1
                )
                ORDER BY p.created_at DESC, p.id DESC
                LIMIT $2 OFFSET $3"
            ))
            .bind(viewer)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?
        }
    };
    Ok(into_posts(rows))
}

/// Posts written by `author`. An unknown author has no posts.
pub async fn user_posts(
    author: &UserId,
    page: &PageRequest,
    pool: &PgPool,
) -> Result<Vec<Post>, StoreError> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
        "SELECT {POST_COLUMNS}
        FROM posts p JOIN users u ON u.id = p.user_id
        WHERE p.user_id = $1
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $2 OFFSET $3"
    ))
    .bind(author)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(pool)
    .await?;
    Ok(into_posts(rows))
}

/// Posts `liker` has liked, most recently liked first.
pub async fn liked_posts(
    liker: &UserId,
    page: &PageRequest,
    pool: &PgPool,
) -> Result<Vec<Post>, StoreError> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
        "SELECT {POST_COLUMNS}
        FROM likes lk
        JOIN posts p ON p.id = lk.post_id
        JOIN users u ON u.id = p.user_id
        WHERE lk.user_id = $1
        ORDER BY lk.created_at DESC, lk.post_id DESC
        LIMIT $2 OFFSET $3"
    ))
    .bind(liker)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(pool)
    .await?;
    Ok(into_posts(rows))
}

/// Escape `\`, `%` and `_` so a user query matches literally inside an
/// `ILIKE` pattern.
pub fn escape_like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring search over post content. A blank query
/// matches nothing.
pub async fn search_posts(
    query: &str,
    page: &PageRequest,
    pool: &PgPool,
) -> Result<Vec<Post>, StoreError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = format!("%{}%", escape_like_pattern(query));

    let rows = sqlx::query_as::<_, PostRow>(&format!(
        r"SELECT {POST_COLUMNS}
        FROM posts p JOIN users u ON u.id = p.user_id
        WHERE p.content ILIKE $1 ESCAPE '\'
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $2 OFFSET $3"
    ))
    .bind(pattern)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(pool)
    .await?;
    Ok(into_posts(rows))
}
