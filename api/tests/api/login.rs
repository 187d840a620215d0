use payloads::requests;
use reqwest::StatusCode;

use test_helpers::{
    alice_credentials, alice_login_credentials, assert_status_code, spawn_app,
};

#[tokio::test]
async fn login_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;

    // test a login with an unknown user
    let body = requests::LoginCredentials {
        email: "random@example.com".into(),
        password: "random-password".into(),
    };
    let result = app.client.login(&body).await;

    match result {
        Err(payloads::ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::UNAUTHORIZED);
            assert_eq!(text, "Authentication failed: Invalid credentials");
        }
        _ => {
            panic!("Expected APIError");
        }
    }

    // login check should fail
    let is_logged_in = app.client.login_check().await?;
    assert!(!is_logged_in);

    Ok(())
}

#[tokio::test]
async fn wrong_password_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    app.client.logout().await?;

    let body = requests::LoginCredentials {
        email: "alice@example.com".into(),
        password: "not-alices-password".into(),
    };
    assert_status_code(app.client.login(&body).await, StatusCode::UNAUTHORIZED);
    assert!(!app.client.login_check().await?);

    Ok(())
}

#[tokio::test]
async fn create_account_does_not_log_in() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.create_account(&alice_credentials()).await?;
    assert!(!app.client.login_check().await?);

    app.client.login(&alice_login_credentials()).await?;
    assert!(app.client.login_check().await?);

    // a fresh account has no username or gobi yet
    let profile = app.client.user_profile().await?;
    assert_eq!(profile.email, "alice@example.com");
    assert!(!profile.is_complete());

    Ok(())
}

#[tokio::test]
async fn email_is_case_insensitive() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.client.create_account(&alice_credentials()).await?;

    let body = requests::LoginCredentials {
        email: "  Alice@Example.com".into(),
        password: alice_credentials().password,
    };
    app.client.login(&body).await?;

    let mut duplicate = alice_credentials();
    duplicate.email = "ALICE@example.com".into();
    assert_status_code(
        app.client.create_account(&duplicate).await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}

#[tokio::test]
async fn invalid_signups_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let mut body = alice_credentials();
    body.email = "not-an-email".into();
    assert_status_code(
        app.client.create_account(&body).await,
        StatusCode::BAD_REQUEST,
    );

    let mut body = alice_credentials();
    body.email =
        format!("{}@example.com", (0..300).map(|_| "X").collect::<String>());
    assert_status_code(
        app.client.create_account(&body).await,
        StatusCode::BAD_REQUEST,
    );

    let mut body = alice_credentials();
    body.password = "short".into();
    body.password_confirm = "short".into();
    assert_status_code(
        app.client.create_account(&body).await,
        StatusCode::BAD_REQUEST,
    );

    let mut body = alice_credentials();
    body.password_confirm = "something-else".into();
    assert_status_code(
        app.client.create_account(&body).await,
        StatusCode::BAD_REQUEST,
    );

    // none of the above created an account
    assert_status_code(
        app.client.login(&alice_login_credentials()).await,
        StatusCode::UNAUTHORIZED,
    );

    Ok(())
}

#[tokio::test]
async fn duplicate_email_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.client.create_account(&alice_credentials()).await?;

    let result = app.client.create_account(&alice_credentials()).await;
    match result {
        Err(payloads::ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert!(text.contains("already exists"), "{text}");
        }
        _ => panic!("Expected APIError"),
    }

    Ok(())
}

#[tokio::test]
async fn logout_ends_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;
    assert!(app.client.login_check().await?);

    app.client.logout().await?;
    assert!(!app.client.login_check().await?);
    assert_status_code(
        app.client.user_profile().await,
        StatusCode::UNAUTHORIZED,
    );

    // logging out again is harmless
    app.client.logout().await?;

    Ok(())
}
