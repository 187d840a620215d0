use jiff::Timestamp;
use jiff_sqlx::ToSqlx;
use sqlx::{FromRow, PgPool};

use payloads::{
    UserId, requests,
    responses::{OptionalTimestamp, PublicProfile},
};

use super::{StoreError, User};
use crate::time::TimeSource;

/// Emails are compared case-insensitively and without surrounding space.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Insert a new user with an already hashed password. Username and gobi are
/// left unset.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    time_source: &TimeSource,
) -> Result<User, StoreError> {
    let email = normalize_email(email);
    if email.chars().count() > requests::EMAIL_MAX_LEN {
        return Err(StoreError::InvalidProfile(format!(
            "Email must be at most {} characters",
            requests::EMAIL_MAX_LEN
        )));
    }
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $3)
        RETURNING *;",
    )
    .bind(&email)
    .bind(password_hash)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await
    .map_err(|e| match StoreError::from(e) {
        StoreError::NotUnique(_) => StoreError::EmailTaken,
        e => e,
    })
}

pub async fn read_user(pool: &PgPool, id: &UserId) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1;")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::UserNotFound,
            e => StoreError::Database(e),
        })
}

pub async fn get_user_by_email(
    email: &str,
    pool: &PgPool,
) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1;")
        .bind(normalize_email(email))
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::UserNotFound,
            e => StoreError::Database(e),
        })
}

/// Set username and gobi. Both are trimmed and must be non-empty and within
/// their length limits.
pub async fn update_user_profile(
    user_id: &UserId,
    details: &requests::UpdateProfile,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<User, StoreError> {
    let username = details.username.trim();
    let gobi = details.gobi.trim();

    if let Some(message) =
        requests::username_error_message(requests::validate_username(username))
    {
        return Err(StoreError::InvalidProfile(message));
    }
    if let Some(message) =
        requests::gobi_error_message(requests::validate_gobi(gobi))
    {
        return Err(StoreError::InvalidProfile(message));
    }

    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET username = $2, gobi = $3, updated_at = $4
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(gobi)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => StoreError::UserNotFound,
        e => StoreError::Database(e),
    })
}

/// Delete a user account. Posts, likes, follows and the avatar go with it.
#[tracing::instrument(skip(pool))]
pub async fn delete_user(pool: &PgPool, id: &UserId) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::UserNotFound);
    }
    Ok(())
}

#[derive(Debug, FromRow)]
struct PublicProfileRow {
    user_id: UserId,
    username: Option<String>,
    gobi: Option<String>,
    #[sqlx(try_from = "OptionalTimestamp")]
    avatar_updated_at: Option<Timestamp>,
    following_count: i64,
    follower_count: i64,
}

pub async fn read_public_profile(
    user_id: &UserId,
    pool: &PgPool,
) -> Result<PublicProfile, StoreError> {
    let row = sqlx::query_as::<_, PublicProfileRow>(
        r#"
        SELECT
            u.id AS user_id,
            u.username,
            u.gobi,
            u.avatar_updated_at,
            (SELECT COUNT(*) FROM follows WHERE follower_id = u.id)
                AS following_count,
            (SELECT COUNT(*) FROM follows WHERE following_id = u.id)
                AS follower_count
        FROM users u
        WHERE u.id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::UserNotFound)?;

    Ok(PublicProfile {
        user_id: row.user_id,
        username: row.username,
        gobi: row.gobi,
        avatar_updated_at: row.avatar_updated_at,
        following_count: row.following_count,
        follower_count: row.follower_count,
    })
}
