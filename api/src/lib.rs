pub mod password;
pub mod routes;
pub mod store;
pub mod telemetry;
pub mod time;

use actix_cors::Cors;
use actix_identity::IdentityMiddleware;
use actix_session::{
    SessionMiddleware, config::BrowserSession, storage::CookieSessionStore,
};
use actix_web::cookie::{Key, time::Duration};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use base64::Engine;
use secrecy::{ExposeSecret, SecretBox};
use sqlx::PgPool;
use std::net::TcpListener;

use crate::time::TimeSource;

/// Avatars arrive as JSON byte arrays, which take up to four characters per
/// byte. This leaves room for the largest accepted image.
const JSON_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub async fn build(
    config: &mut Config,
    time_source: TimeSource,
) -> std::io::Result<Server> {
    let secret_key = match &config.session_master_key {
        Some(encoded) => session_key_from_base64(encoded.expose_secret())
            .map_err(std::io::Error::other)?,
        None => {
            tracing::warn!(
                "SESSION_MASTER_KEY is not set; sessions will not survive a restart"
            );
            Key::generate()
        }
    };
    let db_pool = web::Data::new(
        PgPool::connect(&config.database_url)
            .await
            .map_err(std::io::Error::other)?,
    );
    let time_source = web::Data::new(time_source);

    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = if allowed_origins.iter().any(|origin| origin == "*") {
            // development only
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        } else {
            allowed_origins.iter().fold(
                Cors::default()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
                |cors, origin| cors.allowed_origin(origin),
            )
        };

        App::new()
            .wrap(cors)
            // Use signed cookie to track user id
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(
                    CookieSessionStore::default(),
                    secret_key.clone(),
                )
                .cookie_name("gobi".into())
                .session_lifecycle(
                    BrowserSession::default().state_ttl(Duration::days(30)),
                )
                .build(),
            )
            .app_data(web::JsonConfig::default().limit(JSON_BODY_LIMIT))
            .service(routes::api_services())
            .app_data(db_pool.clone())
            .app_data(time_source.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

/// Decode a base64 session key. Cookie signing needs at least 64 bytes.
pub fn session_key_from_base64(encoded: &str) -> anyhow::Result<Key> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .context("SESSION_MASTER_KEY is not valid base64")?;
    Key::try_from(bytes.as_slice())
        .context("SESSION_MASTER_KEY must decode to at least 64 bytes")
}

pub struct Config {
    pub database_url: String,
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin (development only)
    pub allowed_origins: Vec<String>,
    /// Base64 key for signing session cookies. A random key is generated
    /// when absent, which logs everyone out on restart.
    pub session_master_key: Option<SecretBox<String>>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            database_url: var("DATABASE_URL").context("DATABASE_URL")?,
            ip: var("IP_ADDRESS").context("IP_ADDRESS")?,
            port: var("PORT")
                .context("PORT")?
                .parse()
                .context("PORT must be a port number")?,
            allowed_origins,
            session_master_key: var("SESSION_MASTER_KEY")
                .ok()
                .map(|key| SecretBox::new(Box::new(key))),
        })
    }
}
