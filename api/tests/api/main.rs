mod account;
mod database;
mod feeds;
mod login;
mod posts;
mod security_headers;
mod social;
mod timeline;

use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.health_check().await?;

    Ok(())
}
