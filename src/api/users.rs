use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::{
    api::StoreData,
    models::{CreateUserForm, UserResponse},
    services::user_service,
    utils::ErrorResponse,
};

/// POST /api/users - Creates a user from the `username` form field
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body(content = CreateUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    db: StoreData,
    form: web::Form<CreateUserForm>,
) -> impl Responder {
    let username = form.into_inner().username;

    log::info!("📝 users.create.started username={:?}", username);

    match user_service::create_user(db.get_ref(), &username).await {
        Ok(user) => {
            log::info!("✅ users.create.success _id={}", user.id);
            HttpResponse::Ok().json(user)
        }
        Err(e) => {
            log::error!("❌ users.create.failed: {}", e);
            e.error_response()
        }
    }
}

/// GET /api/users - Lists every user as `{_id, username}`
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_users(db: StoreData) -> impl Responder {
    log::info!("📋 users.list.started");

    match user_service::list_users(db.get_ref()).await {
        Ok(users) => {
            log::info!("✅ users.list.success count={}", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => {
            log::error!("❌ users.list.failed: {}", e);
            e.error_response()
        }
    }
}
