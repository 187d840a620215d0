use actix_identity::Identity;
use actix_web::{HttpResponse, post, web};
use sqlx::PgPool;

use payloads::{PostId, requests};

use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

#[tracing::instrument(skip(user, pool, time_source), fields(user_id=tracing::field::Empty))]
#[post("/create_post")]
pub async fn create_post(
    user: Identity,
    details: web::Json<requests::CreatePost>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let post =
        store::create_post(&user_id, &details.content, &pool, &time_source)
            .await?;
    tracing::info!(post_id = %post.id, "Post created");
    Ok(HttpResponse::Ok().json(post))
}

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty), ret)]
#[post("/delete_post")]
pub async fn delete_post(
    user: Identity,
    post_id: web::Json<PostId>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    store::delete_post(&user_id, &post_id, &pool).await?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(user, pool, time_source), fields(user_id=tracing::field::Empty), ret)]
#[post("/like_post")]
pub async fn like_post(
    user: Identity,
    post_id: web::Json<PostId>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    store::like_post(&user_id, &post_id, &pool, &time_source).await?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty), ret)]
#[post("/unlike_post")]
pub async fn unlike_post(
    user: Identity,
    post_id: web::Json<PostId>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    store::unlike_post(&user_id, &post_id, &pool).await?;
    Ok(HttpResponse::Ok().finish())
}
