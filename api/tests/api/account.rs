use payloads::{MAX_AVATAR_SIZE, requests};
use reqwest::StatusCode;

use test_helpers::{
    alice_credentials, alice_login_credentials, assert_status_code, jpeg_bytes,
    red_png, spawn_app,
};

#[tokio::test]
async fn complete_profile() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;

    let profile = app.client.user_profile().await?;
    assert_eq!(profile.user_id, alice_id);
    assert_eq!(profile.username.as_deref(), Some("alice"));
    assert_eq!(profile.gobi.as_deref(), Some("nya"));
    assert!(profile.is_complete());
    assert_eq!(profile.avatar_updated_at, None);

    // surrounding whitespace is dropped
    let updated = app
        .client
        .update_profile(&requests::UpdateProfile {
            username: "  alice2 ".into(),
            gobi: " にゃん ".into(),
        })
        .await?;
    assert_eq!(updated.username.as_deref(), Some("alice2"));
    assert_eq!(updated.gobi.as_deref(), Some("にゃん"));

    Ok(())
}

#[tokio::test]
async fn invalid_profile_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;

    let long_username = "x".repeat(21);
    let cases = [
        ("", "nya"),
        ("alice", "   "),
        (long_username.as_str(), "nya"),
        ("alice", "abcdefghijk"),
    ];
    for (username, gobi) in cases {
        let result = app
            .client
            .update_profile(&requests::UpdateProfile {
                username: username.into(),
                gobi: gobi.into(),
            })
            .await;
        assert_status_code(result, StatusCode::BAD_REQUEST);
    }

    // limits count characters, so ten multi-byte characters fit
    app.client
        .update_profile(&requests::UpdateProfile {
            username: "あ".repeat(20),
            gobi: "ぴ".repeat(10),
        })
        .await?;

    let profile = app.client.user_profile().await?;
    assert_eq!(profile.gobi, Some("ぴ".repeat(10)));

    Ok(())
}

#[tokio::test]
async fn avatar_upload_and_fetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;

    let profile = app
        .client
        .upload_avatar(&requests::UploadAvatar {
            image_data: red_png(),
        })
        .await?;
    let first_update = profile
        .avatar_updated_at
        .expect("avatar timestamp should be set");

    assert_eq!(app.client.get_avatar(&alice_id).await?, red_png());

    // the avatar url is public and carries a cache buster
    let url = app.client.avatar_url(&alice_id, &first_update);
    assert!(url.contains(&format!("t={}", first_update.as_millisecond())));
    app.client.logout().await?;
    let response = app.client.inner_client.get(&url).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );

    // replacing bumps the timestamp
    app.client.login(&alice_login_credentials()).await?;
    app.time_source.advance(jiff::Span::new().seconds(5));
    let profile = app
        .client
        .upload_avatar(&requests::UploadAvatar {
            image_data: jpeg_bytes(),
        })
        .await?;
    assert!(profile.avatar_updated_at.unwrap() > first_update);
    assert_eq!(app.client.get_avatar(&alice_id).await?, jpeg_bytes());

    Ok(())
}

#[tokio::test]
async fn avatar_type_and_size_checked() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;

    let gif = b"GIF89a\x01\x00\x01\x00\x80\x00\x00".to_vec();
    let result = app
        .client
        .upload_avatar(&requests::UploadAvatar { image_data: gif })
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    let mut too_big = red_png();
    too_big.resize(MAX_AVATAR_SIZE + 1, 0);
    let result = app
        .client
        .upload_avatar(&requests::UploadAvatar {
            image_data: too_big,
        })
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    assert_status_code(
        app.client.get_avatar(&alice_id).await,
        StatusCode::NOT_FOUND,
    );
    assert_eq!(app.client.user_profile().await?.avatar_updated_at, None);

    Ok(())
}

#[tokio::test]
async fn avatar_removal() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;

    app.client
        .upload_avatar(&requests::UploadAvatar {
            image_data: red_png(),
        })
        .await?;
    let profile = app.client.delete_avatar().await?;
    assert_eq!(profile.avatar_updated_at, None);
    assert_status_code(
        app.client.get_avatar(&alice_id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn delete_account_requires_password() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;

    let result = app
        .client
        .delete_account(&requests::DeleteAccount {
            password: "wrong-password".into(),
        })
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    assert!(app.client.login_check().await?);

    app.client
        .delete_account(&requests::DeleteAccount {
            password: alice_credentials().password,
        })
        .await?;

    // session is gone and so is the account
    assert!(!app.client.login_check().await?);
    assert_status_code(
        app.client.login(&alice_login_credentials()).await,
        StatusCode::UNAUTHORIZED,
    );

    // the email can be used again
    app.client.create_account(&alice_credentials()).await?;

    Ok(())
}

#[tokio::test]
async fn delete_account_removes_content() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let bob_id = app.create_bob_user().await?;
    let bob_post = app.post_with_gobi("bob was here ").await?;

    let alice_id = app.create_alice_user().await?;
    let alice_post = app.post_with_gobi("hello ").await?;
    app.client
        .upload_avatar(&requests::UploadAvatar {
            image_data: red_png(),
        })
        .await?;
    app.client.like_post(&bob_post.id).await?;
    app.client.follow_user(&bob_id).await?;

    app.login_bob().await?;
    app.client.like_post(&alice_post.id).await?;
    app.client.follow_user(&alice_id).await?;

    app.login_alice().await?;
    app.client
        .delete_account(&requests::DeleteAccount {
            password: alice_credentials().password,
        })
        .await?;

    app.login_bob().await?;
    assert_status_code(
        app.client.public_profile(&alice_id).await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client.get_avatar(&alice_id).await,
        StatusCode::NOT_FOUND,
    );

    let bob = app.client.public_profile(&bob_id).await?;
    assert_eq!(bob.follower_count, 0);
    assert_eq!(bob.following_count, 0);

    let viewer = app.client.viewer_context().await?;
    assert!(viewer.liked_post_ids.is_empty());
    assert!(viewer.following_user_ids.is_empty());

    let page = requests::PageRequest::first();
    let timeline = app
        .client
        .timeline(&requests::Timeline {
            scope: payloads::TimelineScope::All,
            page,
        })
        .await?;
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].id, bob_post.id);
    assert_eq!(timeline[0].like_count, 0);

    Ok(())
}
