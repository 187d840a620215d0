use jiff_sqlx::ToSqlx;
use sqlx::PgPool;

use payloads::{
    PostId, UserId,
    requests::validate_post_content,
    responses::{Post, PostRow},
};

use super::{StoreError, User, map_foreign_key_error};
use crate::time::TimeSource;

/// Columns of [`PostRow`], for queries over `posts p JOIN users u`.
pub(super) const POST_COLUMNS: &str = "
    p.id,
    p.user_id,
    u.username,
    u.avatar_updated_at,
    p.content,
    p.gobi,
    (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
    p.created_at";

pub async fn read_post(
    post_id: &PostId,
    pool: &PgPool,
) -> Result<Post, StoreError> {
    let row = sqlx::query_as::<_, PostRow>(&format!(
        "SELECT {POST_COLUMNS}
        FROM posts p JOIN users u ON u.id = p.user_id
        WHERE p.id = $1"
    ))
    .bind(post_id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::PostNotFound)?;
    Ok(row.into())
}

/// Create a post as `user_id`.
///
/// The author must have a username and gobi, and the content must contain
/// the gobi they have right now. That gobi is stored with the post so later
/// gobi changes leave old posts valid.
#[tracing::instrument(skip(content, pool, time_source))]
pub async fn create_post(
    user_id: &UserId,
    content: &str,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<Post, StoreError> {
    let mut tx = pool.begin().await?;

    // lock the author row so a concurrent gobi change can't slip in between
    // validation and insert
    let author = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE id = $1 FOR SHARE",
    )
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(StoreError::UserNotFound)?;

    let (Some(_), Some(gobi)) = (&author.username, &author.gobi) else {
        return Err(StoreError::ProfileIncomplete);
    };

    if let Some(message) = validate_post_content(content, gobi).error_message()
    {
        return Err(StoreError::InvalidPost(message));
    }

    let post_id = sqlx::query_scalar::<_, PostId>(
        "INSERT INTO posts (user_id, content, gobi, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id",
    )
    .bind(user_id)
    .bind(content)
    .bind(gobi)
    .bind(time_source.now().to_sqlx())
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    read_post(&post_id, pool).await
}

/// Delete a post. Posts that don't exist and posts by other users are both
/// reported as not found.
pub async fn delete_post(
    user_id: &UserId,
    post_id: &PostId,
    pool: &PgPool,
) -> Result<(), StoreError> {
    let result =
        sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(pool)
            .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::PostNotFound);
    }
    Ok(())
}

pub async fn like_post(
    user_id: &UserId,
    post_id: &PostId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO likes (user_id, post_id, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, post_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(post_id)
    .bind(time_source.now().to_sqlx())
    .execute(pool)
    .await
    .map_err(|e| map_foreign_key_error(e, StoreError::PostNotFound))?;
    Ok(())
}

pub async fn unlike_post(
    user_id: &UserId,
    post_id: &PostId,
    pool: &PgPool,
) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
        .bind(user_id)
        .bind(post_id)
        .execute(pool)
        .await?;
    Ok(())
}
