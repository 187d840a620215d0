use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, post, web};
use secrecy::SecretBox;
use sqlx::PgPool;

use payloads::requests::{self, validate_signup};

use crate::password::{
    AuthError, Credentials, confirm_password, create_user,
    validate_credentials,
};
use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

impl From<AuthError> for APIError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials(_) => APIError::AuthError(e.into()),
            AuthError::UnexpectedError(_) => {
                APIError::UnexpectedError(e.into())
            }
        }
    }
}

#[tracing::instrument(
    skip(credentials, pool),
    fields(user_id=tracing::field::Empty),
    ret,
)]
#[post("/login")]
pub async fn login(
    request: HttpRequest,
    credentials: web::Json<Credentials>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let user_id = validate_credentials(credentials.0, &pool).await?;
    tracing::Span::current()
        .record("user_id", tracing::field::display(&user_id));
    Identity::login(&request.extensions(), user_id.to_string())
        .map_err(|e| APIError::UnexpectedError(e.into()))?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(user), fields(user_id=tracing::field::Empty))]
#[post("/login_check")]
pub async fn login_check(user: Identity) -> Result<HttpResponse, APIError> {
    get_user_id(&user)?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(user), fields(user_id=tracing::field::Empty))]
#[post("/logout")]
pub async fn logout(user: Option<Identity>) -> HttpResponse {
    if let Some(user) = user {
        let _ = get_user_id(&user); // to instrument the user_id, if exists
        user.logout();
    }
    HttpResponse::Ok().finish()
}

/// Sign up with email and password. The new account still has to set a
/// username and gobi, and has to log in separately.
#[tracing::instrument(skip(details, pool, time_source), ret)]
#[post("/create_account")]
pub async fn create_account(
    details: web::Json<requests::CreateAccount>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    if let Some(message) = validate_signup(&details).error_message() {
        return Err(APIError::BadRequest(anyhow::anyhow!(message)));
    }
    let requests::CreateAccount { email, password, .. } = details.into_inner();
    create_user(&email, SecretBox::new(Box::new(password)), &pool, &time_source)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(serde::Deserialize)]
pub struct DeleteAccountRequest {
    password: SecretBox<String>,
}

/// Permanently delete the logged in user's account after re-checking their
/// password, then end the session.
#[tracing::instrument(skip(user, details, pool), fields(user_id=tracing::field::Empty), ret)]
#[post("/delete_account")]
pub async fn delete_account(
    user: Identity,
    details: web::Json<DeleteAccountRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    confirm_password(&user_id, details.into_inner().password, &pool).await?;
    store::delete_user(&pool, &user_id).await?;
    user.logout();
    tracing::info!("Account deleted");
    Ok(HttpResponse::Ok().finish())
}
