pub mod feeds;
pub mod login;
pub mod posts;
pub mod profile;
pub mod social;

use actix_identity::Identity;
use actix_web::{
    HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, http::header, middleware::DefaultHeaders,
    web,
};
use payloads::{MAX_PAGE_SIZE, requests::PageRequest};
use uuid::Uuid;

use crate::store::StoreError;

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        // public, cacheable
        .service(health_check)
        .service(profile::get_avatar)
        // everything else is per-user and must never be cached
        .service(
            web::scope("")
                .wrap(private_headers())
                .service(login::login)
                .service(login::login_check)
                .service(login::logout)
                .service(login::create_account)
                .service(login::delete_account)
                .service(profile::user_profile)
                .service(profile::update_profile)
                .service(profile::upload_avatar)
                .service(profile::delete_avatar)
                .service(profile::public_profile)
                .service(social::viewer_context)
                .service(social::follow_user)
                .service(social::unfollow_user)
                .service(posts::create_post)
                .service(posts::delete_post)
                .service(posts::like_post)
                .service(posts::unlike_post)
                .service(feeds::timeline)
                .service(feeds::user_posts)
                .service(feeds::liked_posts)
                .service(feeds::search_posts),
        )
}

fn private_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((
            header::CACHE_CONTROL,
            "no-store, no-cache, must-revalidate, private",
        ))
        .add((header::PRAGMA, "no-cache"))
        .add((header::EXPIRES, "0"))
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::AuthError(e) => {
                HttpResponse::Unauthorized().body(format!("{self}: {e}"))
            }
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::UnexpectedError(e) => {
                tracing::error!("{e:#}");
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Database(_)
            | StoreError::NotUnique(_)
            | StoreError::UnexpectedError(_) => {
                APIError::UnexpectedError(e.into())
            }
            StoreError::UserNotFound
            | StoreError::PostNotFound
            | StoreError::AvatarNotFound => APIError::NotFound(e.into()),
            StoreError::EmailTaken
            | StoreError::ProfileIncomplete
            | StoreError::InvalidProfile(_)
            | StoreError::InvalidPost(_)
            | StoreError::AvatarTooLarge
            | StoreError::UnsupportedAvatarType
            | StoreError::CannotFollowSelf => APIError::BadRequest(e.into()),
        }
    }
}

fn get_user_id(user: &Identity) -> Result<payloads::UserId, APIError> {
    let id_str = user.id().map_err(|e| {
        APIError::AuthError(
            anyhow::Error::from(e).context("Invalid login session"),
        )
    })?;
    // special case: since this is used in so many routes, the user_id is
    // recorded here, but attaches to the span for the api route itself
    tracing::Span::current()
        .record("user_id", tracing::field::display(&id_str));
    Ok(payloads::UserId(
        Uuid::parse_str(&id_str).map_err(anyhow::Error::from)?,
    ))
}

fn validate_page(page: &PageRequest) -> Result<(), APIError> {
    if !page.is_valid() {
        return Err(APIError::BadRequest(anyhow::anyhow!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}
