use payloads::{PostId, requests};
use reqwest::StatusCode;

use test_helpers::{alice_credentials, assert_status_code, spawn_app};

fn post(content: &str) -> requests::CreatePost {
    requests::CreatePost {
        content: content.into(),
    }
}

#[tokio::test]
async fn create_post_with_gobi() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;

    let created = app.client.create_post(&post("today was sunny nya")).await?;
    assert_eq!(created.content, "today was sunny nya");
    assert_eq!(created.gobi, "nya");
    assert_eq!(created.author.user_id, alice_id);
    assert_eq!(created.author.username.as_deref(), Some("alice"));
    assert_eq!(created.like_count, 0);
    assert_eq!(created.created_at, app.time_source.now());

    // the gobi may appear anywhere
    app.client.create_post(&post("nya, good morning")).await?;

    Ok(())
}

#[tokio::test]
async fn post_without_gobi_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;

    let result = app.client.create_post(&post("no suffix here")).await;
    match result {
        Err(payloads::ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert!(text.contains("nya"), "{text}");
        }
        _ => panic!("Expected APIError"),
    }

    Ok(())
}

#[tokio::test]
async fn post_length_and_blank_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;

    assert_status_code(
        app.client.create_post(&post("   ")).await,
        StatusCode::BAD_REQUEST,
    );

    let too_long = format!("{}nya", "a".repeat(198));
    assert_status_code(
        app.client.create_post(&post(&too_long)).await,
        StatusCode::BAD_REQUEST,
    );

    // exactly 200 characters, multi-byte included
    let longest = format!("{}nya", "あ".repeat(197));
    app.client.create_post(&post(&longest)).await?;

    Ok(())
}

#[tokio::test]
async fn incomplete_profile_cannot_post() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.client.create_account(&alice_credentials()).await?;
    app.login_alice().await?;

    let result = app.client.create_post(&post("hello nya")).await;
    match result {
        Err(payloads::ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert!(text.contains("Profile incomplete"), "{text}");
        }
        _ => panic!("Expected APIError"),
    }

    Ok(())
}

#[tokio::test]
async fn posting_requires_login() -> anyhow::Result<()> {
    let app = spawn_app().await;
    assert_status_code(
        app.client.create_post(&post("hello nya")).await,
        StatusCode::UNAUTHORIZED,
    );
    Ok(())
}

#[tokio::test]
async fn gobi_change_applies_to_new_posts_only() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let old = app.client.create_post(&post("first nya")).await?;

    app.client
        .update_profile(&requests::UpdateProfile {
            username: "alice".into(),
            gobi: "wan".into(),
        })
        .await?;

    assert_status_code(
        app.client.create_post(&post("second nya")).await,
        StatusCode::BAD_REQUEST,
    );
    let new = app.client.create_post(&post("second wan")).await?;
    assert_eq!(new.gobi, "wan");

    let alice_id = app.client.user_profile().await?.user_id;
    let posts = app
        .client
        .user_posts(&requests::UserPosts {
            user_id: alice_id,
            page: requests::PageRequest::first(),
        })
        .await?;
    let old_again = posts.iter().find(|p| p.id == old.id).unwrap();
    assert_eq!(old_again.gobi, "nya");

    Ok(())
}

#[tokio::test]
async fn only_author_can_delete() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let alice_post = app.post_with_gobi("mine ").await?;

    app.create_bob_user().await?;
    assert_status_code(
        app.client.delete_post(&alice_post.id).await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client.delete_post(&PostId(alice_post.id.0 + 1000)).await,
        StatusCode::NOT_FOUND,
    );

    app.login_alice().await?;
    app.client.delete_post(&alice_post.id).await?;
    assert_status_code(
        app.client.delete_post(&alice_post.id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn likes_are_idempotent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let alice_post = app.post_with_gobi("like me ").await?;

    app.create_bob_user().await?;
    app.client.like_post(&alice_post.id).await?;
    app.client.like_post(&alice_post.id).await?;

    let viewer = app.client.viewer_context().await?;
    assert!(viewer.has_liked(&alice_post.id));

    app.create_charlie_user().await?;
    app.client.like_post(&alice_post.id).await?;

    let timeline = app
        .client
        .timeline(&requests::Timeline {
            scope: payloads::TimelineScope::All,
            page: requests::PageRequest::first(),
        })
        .await?;
    assert_eq!(timeline[0].like_count, 2);

    app.client.unlike_post(&alice_post.id).await?;
    app.client.unlike_post(&alice_post.id).await?;
    let viewer = app.client.viewer_context().await?;
    assert!(!viewer.has_liked(&alice_post.id));

    Ok(())
}

#[tokio::test]
async fn like_missing_post() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;

    assert_status_code(
        app.client.like_post(&PostId(424242)).await,
        StatusCode::NOT_FOUND,
    );
    // removing a like that doesn't exist is fine
    app.client.unlike_post(&PostId(424242)).await?;

    Ok(())
}

#[tokio::test]
async fn deleting_post_removes_likes() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    let alice_post = app.post_with_gobi("fleeting ").await?;

    let bob_id = app.create_bob_user().await?;
    app.client.like_post(&alice_post.id).await?;

    app.login_alice().await?;
    app.client.delete_post(&alice_post.id).await?;

    app.login_bob().await?;
    assert!(app.client.viewer_context().await?.liked_post_ids.is_empty());
    let liked = app
        .client
        .liked_posts(&requests::LikedPosts {
            user_id: bob_id,
            page: requests::PageRequest::first(),
        })
        .await?;
    assert!(liked.is_empty());

    Ok(())
}
