use jiff_sqlx::ToSqlx;
use sqlx::PgPool;

use payloads::{MAX_AVATAR_SIZE, UserId};

use super::{Avatar, StoreError, User};
use crate::time::TimeSource;

const ALLOWED_AVATAR_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// Sniff the image type from its magic bytes. The declared type of an upload
/// is never trusted.
fn avatar_content_type(image_data: &[u8]) -> Result<&'static str, StoreError> {
    if image_data.len() > MAX_AVATAR_SIZE {
        return Err(StoreError::AvatarTooLarge);
    }
    infer::get(image_data)
        .map(|kind| kind.mime_type())
        .filter(|mime| ALLOWED_AVATAR_TYPES.contains(mime))
        .ok_or(StoreError::UnsupportedAvatarType)
}

/// Store `image_data` as the user's avatar, replacing any previous one, and
/// bump `avatar_updated_at` so clients refetch it.
#[tracing::instrument(skip(image_data, pool, time_source), fields(size = image_data.len()))]
pub async fn set_avatar(
    user_id: &UserId,
    image_data: &[u8],
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<User, StoreError> {
    let content_type = avatar_content_type(image_data)?;
    let now = time_source.now().to_sqlx();

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO avatars (user_id, image_data, content_type, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id) DO UPDATE
        SET image_data = EXCLUDED.image_data,
            content_type = EXCLUDED.content_type,
            created_at = EXCLUDED.created_at
        "#,
    )
    .bind(user_id)
    .bind(image_data)
    .bind(content_type)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| super::map_foreign_key_error(e, StoreError::UserNotFound))?;

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET avatar_updated_at = $2, updated_at = $2
        WHERE id = $1
        RETURNING *",
    )
    .bind(user_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(user)
}

pub async fn read_avatar(
    user_id: &UserId,
    pool: &PgPool,
) -> Result<Avatar, StoreError> {
    sqlx::query_as::<_, Avatar>(
        "SELECT user_id, image_data, content_type FROM avatars
        WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::AvatarNotFound)
}

/// Remove the user's avatar, if any.
pub async fn delete_avatar(
    user_id: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<User, StoreError> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM avatars WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET avatar_updated_at = NULL, updated_at = $2
        WHERE id = $1
        RETURNING *",
    )
    .bind(user_id)
    .bind(time_source.now().to_sqlx())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => StoreError::UserNotFound,
        e => StoreError::Database(e),
    })?;
    tx.commit().await?;
    Ok(user)
}
