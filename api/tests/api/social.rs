use payloads::UserId;
use reqwest::StatusCode;
use uuid::Uuid;

use test_helpers::{assert_status_code, spawn_app};

#[tokio::test]
async fn follow_and_unfollow() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;
    let bob_id = app.create_bob_user().await?;

    app.client.follow_user(&alice_id).await?;
    // following twice changes nothing
    app.client.follow_user(&alice_id).await?;

    let viewer = app.client.viewer_context().await?;
    assert_eq!(viewer.user_id, Some(bob_id));
    assert!(viewer.is_following(&alice_id));

    let alice = app.client.public_profile(&alice_id).await?;
    assert_eq!(alice.username.as_deref(), Some("alice"));
    assert_eq!(alice.gobi.as_deref(), Some("nya"));
    assert_eq!(alice.follower_count, 1);
    assert_eq!(alice.following_count, 0);

    let bob = app.client.public_profile(&bob_id).await?;
    assert_eq!(bob.follower_count, 0);
    assert_eq!(bob.following_count, 1);

    app.client.unfollow_user(&alice_id).await?;
    app.client.unfollow_user(&alice_id).await?;
    assert!(!app.client.viewer_context().await?.is_following(&alice_id));
    assert_eq!(app.client.public_profile(&alice_id).await?.follower_count, 0);

    Ok(())
}

#[tokio::test]
async fn cannot_follow_self() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;

    assert_status_code(
        app.client.follow_user(&alice_id).await,
        StatusCode::BAD_REQUEST,
    );
    assert!(app.client.viewer_context().await?.following_user_ids.is_empty());

    Ok(())
}

#[tokio::test]
async fn unknown_users() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let nobody = UserId(Uuid::new_v4());

    assert_status_code(
        app.client.follow_user(&nobody).await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client.public_profile(&nobody).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn viewer_context_requires_login() -> anyhow::Result<()> {
    let app = spawn_app().await;
    assert_status_code(
        app.client.viewer_context().await,
        StatusCode::UNAUTHORIZED,
    );
    Ok(())
}

#[tokio::test]
async fn viewer_context_is_per_user() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;
    let alice_post = app.post_with_gobi("hi ").await?;

    let bob_id = app.create_bob_user().await?;
    app.client.like_post(&alice_post.id).await?;
    app.client.follow_user(&alice_id).await?;

    app.login_alice().await?;
    let viewer = app.client.viewer_context().await?;
    assert_eq!(viewer.user_id, Some(alice_id));
    assert!(viewer.is_own(&alice_id));
    assert!(!viewer.is_own(&bob_id));
    assert!(!viewer.has_liked(&alice_post.id));
    assert!(!viewer.is_following(&bob_id));

    Ok(())
}
