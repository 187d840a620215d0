use anyhow::Result;

use test_helpers::spawn_app;

#[tokio::test]
async fn test_security_headers_on_authenticated_endpoints() -> Result<()> {
    let app = spawn_app().await;
    app.create_alice_user().await?;

    let url = format!("{}/api/user_profile", app.client.address);
    let response = app.client.inner_client.get(&url).send().await?;
    assert!(response.status().is_success());

    let headers = response.headers();

    let cache_control = headers
        .get("cache-control")
        .expect("Cache-Control header should be present")
        .to_str()?;
    assert!(cache_control.contains("no-store"), "Should contain no-store");
    assert!(cache_control.contains("no-cache"), "Should contain no-cache");
    assert!(
        cache_control.contains("must-revalidate"),
        "Should contain must-revalidate"
    );
    assert!(cache_control.contains("private"), "Should contain private");

    let pragma = headers
        .get("pragma")
        .expect("Pragma header should be present")
        .to_str()?;
    assert_eq!(pragma, "no-cache", "Pragma should be no-cache");

    let expires = headers
        .get("expires")
        .expect("Expires header should be present")
        .to_str()?;
    assert_eq!(expires, "0", "Expires should be 0");

    Ok(())
}

#[tokio::test]
async fn test_error_responses_are_not_cached() -> Result<()> {
    let app = spawn_app().await;

    // not logged in, so this is a 401
    let url = format!("{}/api/viewer_context", app.client.address);
    let response = app.client.inner_client.get(&url).send().await?;
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("cache-control").is_some());

    Ok(())
}

#[tokio::test]
async fn test_health_check_does_not_have_security_headers() -> Result<()> {
    let app = spawn_app().await;

    let url = format!("{}/api/health_check", app.client.address);
    let response = app.client.inner_client.get(&url).send().await?;

    let headers = response.headers();
    assert!(
        headers.get("cache-control").is_none(),
        "Health check should not have Cache-Control header"
    );
    assert!(
        headers.get("pragma").is_none(),
        "Health check should not have Pragma header"
    );
    assert!(
        headers.get("expires").is_none(),
        "Health check should not have Expires header"
    );

    Ok(())
}

#[tokio::test]
async fn test_avatars_are_publicly_cacheable() -> Result<()> {
    let app = spawn_app().await;
    let alice_id = app.create_alice_user().await?;
    app.client
        .upload_avatar(&payloads::requests::UploadAvatar {
            image_data: test_helpers::red_png(),
        })
        .await?;

    let url = format!("{}/api/avatars/{alice_id}", app.client.address);
    let response = app.client.inner_client.get(&url).send().await?;
    let cache_control = response
        .headers()
        .get("cache-control")
        .expect("Avatars should set Cache-Control")
        .to_str()?;
    assert!(cache_control.starts_with("public"));
    assert!(response.headers().get("pragma").is_none());

    Ok(())
}
