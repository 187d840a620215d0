use jiff_sqlx::ToSqlx;
use sqlx::PgPool;

use payloads::{PostId, UserId, responses::ViewerContext};

use super::{StoreError, map_foreign_key_error};
use crate::time::TimeSource;

pub async fn follow_user(
    follower_id: &UserId,
    following_id: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<(), StoreError> {
    if follower_id == following_id {
        return Err(StoreError::CannotFollowSelf);
    }
    sqlx::query(
        "INSERT INTO follows (follower_id, following_id, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (follower_id, following_id) DO NOTHING",
    )
    .bind(follower_id)
    .bind(following_id)
    .bind(time_source.now().to_sqlx())
    .execute(pool)
    .await
    .map_err(|e| map_foreign_key_error(e, StoreError::UserNotFound))?;
    Ok(())
}

pub async fn unfollow_user(
    follower_id: &UserId,
    following_id: &UserId,
    pool: &PgPool,
) -> Result<(), StoreError> {
    sqlx::query(
        "DELETE FROM follows WHERE follower_id = $1 AND following_id = $2",
    )
    .bind(follower_id)
    .bind(following_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Everything `user_id` has liked and everyone they follow.
pub async fn read_viewer_context(
    user_id: &UserId,
    pool: &PgPool,
) -> Result<ViewerContext, StoreError> {
    let liked_post_ids = sqlx::query_scalar::<_, PostId>(
        "SELECT post_id FROM likes WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let following_user_ids = sqlx::query_scalar::<_, UserId>(
        "SELECT following_id FROM follows WHERE follower_id = $1",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(ViewerContext {
        user_id: Some(*user_id),
        liked_post_ids: liked_post_ids.into_iter().collect(),
        following_user_ids: following_user_ids.into_iter().collect(),
    })
}
