use crate::store::{self, StoreError};
use crate::telemetry::spawn_blocking_with_tracing;
use crate::time::TimeSource;
use anyhow::Context;
use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use payloads::UserId;
use secrecy::{ExposeSecret, SecretBox};
use sqlx::PgPool;

/// Verified against when the account doesn't exist, so unknown emails take as
/// long as wrong passwords.
const FALLBACK_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$\
    gZiV/M1gPc22ElAH/Jh1Hw$\
    CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

#[derive(serde::Deserialize)]
pub struct Credentials {
    pub email: String,
    password: SecretBox<String>,
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, pool))]
pub async fn validate_credentials(
    credentials: Credentials,
    pool: &PgPool,
) -> Result<UserId, AuthError> {
    let stored = match store::get_user_by_email(&credentials.email, pool).await
    {
        Ok(user) => Some((user.id, user.password_hash)),
        Err(StoreError::UserNotFound) => None,
        Err(e) => {
            return Err(anyhow::Error::from(e)
                .context("Failed to retrieve stored credentials.")
                .into());
        }
    };
    check_password(stored, credentials.password).await
}

/// Re-check the password of a logged in user, e.g. before deleting their
/// account.
#[tracing::instrument(name = "Confirm password", skip(password, pool))]
pub async fn confirm_password(
    user_id: &UserId,
    password: SecretBox<String>,
    pool: &PgPool,
) -> Result<UserId, AuthError> {
    let stored = match store::read_user(pool, user_id).await {
        Ok(user) => Some((user.id, user.password_hash)),
        Err(StoreError::UserNotFound) => None,
        Err(e) => {
            return Err(anyhow::Error::from(e)
                .context("Failed to retrieve stored credentials.")
                .into());
        }
    };
    check_password(stored, password).await
}

/// Verify `password` against the stored hash, or against the fallback hash
/// when there is no such user.
async fn check_password(
    stored: Option<(UserId, String)>,
    password: SecretBox<String>,
) -> Result<UserId, AuthError> {
    let (user_id, expected_password_hash) = match stored {
        Some((user_id, hash)) => (Some(user_id), SecretBox::new(Box::new(hash))),
        None => (
            None,
            SecretBox::new(Box::new(FALLBACK_PASSWORD_HASH.to_string())),
        ),
    };

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, password)
    })
    .await
    .context("Failed to spawn blocking task.")??;

    user_id
        .ok_or_else(|| anyhow::anyhow!("Unknown email."))
        .map_err(AuthError::InvalidCredentials)
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: SecretBox<String>,
    password_candidate: SecretBox<String>,
) -> Result<(), AuthError> {
    let expected_password_hash =
        PasswordHash::new(expected_password_hash.expose_secret())
            .context("Failed to parse hash in PHC string format.")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .context("Invalid password.")
        .map_err(AuthError::InvalidCredentials)
}

#[tracing::instrument(
    name = "Create user",
    skip(email, password, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
pub async fn create_user(
    email: &str,
    password: SecretBox<String>,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<UserId, StoreError> {
    let password_hash =
        spawn_blocking_with_tracing(move || compute_password_hash(password))
            .await
            .map_err(anyhow::Error::from)?
            .context("Failed to hash password")?;
    let new_user_id = store::create_user(
        pool,
        email,
        password_hash.expose_secret(),
        time_source,
    )
    .await?
    .id;
    tracing::Span::current()
        .record("user_id", tracing::field::display(&new_user_id));
    Ok(new_user_id)
}

fn compute_password_hash(
    password: SecretBox<String>,
) -> Result<SecretBox<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {e}"))?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)?
        .to_string();
    Ok(SecretBox::new(Box::new(password_hash)))
}
