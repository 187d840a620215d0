use actix_identity::Identity;
use actix_web::{HttpResponse, get, http::header, post, web};
use sqlx::PgPool;

use payloads::{UserId, requests, responses::UserProfile};

use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty))]
#[get("/user_profile")]
pub async fn user_profile(
    user: Identity,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let user_data = store::read_user(&pool, &user_id).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user_data)))
}

#[tracing::instrument(skip(user, pool, time_source), fields(user_id=tracing::field::Empty))]
#[post("/update_profile")]
pub async fn update_profile(
    user: Identity,
    details: web::Json<requests::UpdateProfile>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let updated =
        store::update_user_profile(&user_id, &details, &pool, &time_source)
            .await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(updated)))
}

#[tracing::instrument(skip(user, details, pool, time_source), fields(user_id=tracing::field::Empty))]
#[post("/upload_avatar")]
pub async fn upload_avatar(
    user: Identity,
    details: web::Json<requests::UploadAvatar>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let updated =
        store::set_avatar(&user_id, &details.image_data, &pool, &time_source)
            .await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(updated)))
}

#[tracing::instrument(skip(user, pool, time_source), fields(user_id=tracing::field::Empty))]
#[post("/delete_avatar")]
pub async fn delete_avatar(
    user: Identity,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let updated = store::delete_avatar(&user_id, &pool, &time_source).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(updated)))
}

/// Raw avatar bytes. Public so `<img>` tags can load it directly; clients add
/// the update time as a query parameter, so a long cache lifetime is safe.
#[tracing::instrument(skip(pool))]
#[get("/avatars/{user_id}")]
pub async fn get_avatar(
    path: web::Path<UserId>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let avatar = store::read_avatar(&path, &pool).await?;
    Ok(HttpResponse::Ok()
        .content_type(avatar.content_type)
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(avatar.image_data))
}

#[tracing::instrument(skip(user, pool), fields(user_id=tracing::field::Empty))]
#[post("/public_profile")]
pub async fn public_profile(
    user: Identity,
    target: web::Json<UserId>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    get_user_id(&user)?;
    let profile = store::read_public_profile(&target, &pool).await?;
    Ok(HttpResponse::Ok().json(profile))
}
