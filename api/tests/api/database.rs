//! Store-level tests.
//!
//! Most behaviour is covered at the http route level; these check the
//! database constraints that back it up.

use api::store::{self, StoreError};
use payloads::{PostId, UserId, requests::UpdateProfile};

use test_helpers::spawn_app;

async fn insert_user(
    app: &test_helpers::TestApp,
    email: &str,
    gobi: &str,
) -> anyhow::Result<UserId> {
    let user =
        store::create_user(&app.db_pool, email, "not-a-real-hash", &app.time_source)
            .await?;
    store::update_user_profile(
        &user.id,
        &UpdateProfile {
            username: email.split('@').next().unwrap_or("user").into(),
            gobi: gobi.into(),
        },
        &app.db_pool,
        &app.time_source,
    )
    .await?;
    Ok(user.id)
}

#[tokio::test]
async fn self_follow_blocked_by_constraint() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice = insert_user(&app, "alice@example.com", "nya").await?;

    let result = sqlx::query(
        "INSERT INTO follows (follower_id, following_id, created_at)
        VALUES ($1, $1, now())",
    )
    .bind(alice)
    .execute(&app.db_pool)
    .await;
    assert!(result.is_err());

    assert!(matches!(
        store::follow_user(&alice, &alice, &app.db_pool, &app.time_source)
            .await,
        Err(StoreError::CannotFollowSelf)
    ));

    Ok(())
}

#[tokio::test]
async fn email_uniqueness() -> anyhow::Result<()> {
    let app = spawn_app().await;
    insert_user(&app, "alice@example.com", "nya").await?;

    let result = store::create_user(
        &app.db_pool,
        "Alice@Example.com",
        "hash",
        &app.time_source,
    )
    .await;
    assert!(matches!(result, Err(StoreError::EmailTaken)));

    Ok(())
}

#[tokio::test]
async fn email_limit_counts_characters() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let domain = "@example.com";
    let local = "ü".repeat(
        payloads::requests::EMAIL_MAX_LEN - domain.chars().count(),
    );

    let user = store::create_user(
        &app.db_pool,
        &format!("{local}{domain}"),
        "hash",
        &app.time_source,
    )
    .await?;
    assert_eq!(user.email.chars().count(), payloads::requests::EMAIL_MAX_LEN);

    let result = store::create_user(
        &app.db_pool,
        &format!("ü{local}{domain}"),
        "hash",
        &app.time_source,
    )
    .await;
    assert!(matches!(result, Err(StoreError::InvalidProfile(_))));

    Ok(())
}

#[tokio::test]
async fn deleting_user_cascades() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice = insert_user(&app, "alice@example.com", "nya").await?;
    let bob = insert_user(&app, "bob@example.com", "desu").await?;

    let post =
        store::create_post(&alice, "hello nya", &app.db_pool, &app.time_source)
            .await?;
    store::like_post(&bob, &post.id, &app.db_pool, &app.time_source).await?;
    store::follow_user(&bob, &alice, &app.db_pool, &app.time_source).await?;

    store::delete_user(&app.db_pool, &alice).await?;

    for table in ["posts", "likes", "follows", "avatars"] {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&app.db_pool)
                .await?;
        assert_eq!(count, 0, "{table} should be empty");
    }

    assert!(matches!(
        store::delete_user(&app.db_pool, &alice).await,
        Err(StoreError::UserNotFound)
    ));

    Ok(())
}

#[tokio::test]
async fn post_ids_increase() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice = insert_user(&app, "alice@example.com", "nya").await?;

    let first =
        store::create_post(&alice, "one nya", &app.db_pool, &app.time_source)
            .await?;
    let second =
        store::create_post(&alice, "two nya", &app.db_pool, &app.time_source)
            .await?;
    assert!(second.id > first.id);

    assert!(matches!(
        store::read_post(&PostId(second.id.0 + 1), &app.db_pool).await,
        Err(StoreError::PostNotFound)
    ));

    Ok(())
}
