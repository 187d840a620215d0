use actix_identity::Identity;
use actix_web::{HttpResponse, post, web};
use sqlx::PgPool;

use payloads::requests;

use crate::store;

use super::{APIError, get_user_id, validate_page};

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty))]
#[post("/timeline")]
pub async fn timeline(
    user: Identity,
    details: web::Json<requests::Timeline>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    validate_page(&details.page)?;
    let posts =
        store::timeline(&user_id, details.scope, &details.page, &pool).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty))]
#[post("/user_posts")]
pub async fn user_posts(
    user: Identity,
    details: web::Json<requests::UserPosts>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    get_user_id(&user)?;
    validate_page(&details.page)?;
    let posts =
        store::user_posts(&details.user_id, &details.page, &pool).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty))]
#[post("/liked_posts")]
pub async fn liked_posts(
    user: Identity,
    details: web::Json<requests::LikedPosts>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    get_user_id(&user)?;
    validate_page(&details.page)?;
    let posts =
        store::liked_posts(&details.user_id, &details.page, &pool).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty))]
#[post("/search_posts")]
pub async fn search_posts(
    user: Identity,
    details: web::Json<requests::SearchPosts>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    get_user_id(&user)?;
    validate_page(&details.page)?;
    let posts =
        store::search_posts(&details.query, &details.page, &pool).await?;
    Ok(HttpResponse::Ok().json(posts))
}
