use actix_identity::Identity;
use actix_web::{HttpResponse, get, post, web};
use sqlx::PgPool;

use payloads::UserId;

use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

/// Liked post ids and followed user ids for the session user. Clients fetch
/// this alongside a page and pass it down to like and follow buttons.
#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty))]
#[get("/viewer_context")]
pub async fn viewer_context(
    user: Identity,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let context = store::read_viewer_context(&user_id, &pool).await?;
    Ok(HttpResponse::Ok().json(context))
}

#[tracing::instrument(skip(user, pool, time_source), fields(user_id=tracing::field::Empty), ret)]
#[post("/follow_user")]
pub async fn follow_user(
    user: Identity,
    target: web::Json<UserId>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    store::follow_user(&user_id, &target, &pool, &time_source).await?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty), ret)]
#[post("/unfollow_user")]
pub async fn unfollow_user(
    user: Identity,
    target: web::Json<UserId>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    store::unfollow_user(&user_id, &target, &pool).await?;
    Ok(HttpResponse::Ok().finish())
}
