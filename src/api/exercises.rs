use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::{
    api::StoreData,
    models::{ExerciseForm, ExerciseResponse, LogQueryParams, LogResponse},
    services::exercise_service,
    utils::{AppError, ErrorResponse},
};

fn log_failure(event: &str, user_id: &str, err: &AppError) {
    match err {
        AppError::NotFound(_) => log::info!("🔍 {}.userNotFound _id={}", event, user_id),
        AppError::InvalidRequest(msg) => log::warn!("⚠️  {}.invalid _id={}: {}", event, user_id, msg),
        AppError::DatabaseError(_) => log::error!("❌ {}.failed _id={}: {}", event, user_id, err),
    }
}

/// POST /api/users/{_id}/exercises - Adds an exercise for an existing user
#[utoipa::path(
    post,
    path = "/api/users/{_id}/exercises",
    tag = "Exercises",
    params(
        ("_id" = String, Path, description = "User id")
    ),
    request_body(content = ExerciseForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Exercise added", body = ExerciseResponse),
        (status = 400, description = "Invalid duration or date", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn add_exercise(
    db: StoreData,
    user_id: web::Path<String>,
    form: web::Form<ExerciseForm>,
) -> impl Responder {
    let user_id = user_id.into_inner();
    let form = form.into_inner();

    log::info!(
        "📝 exercises.add.started _id={} description={:?} duration={:?} date={:?}",
        user_id, form.description, form.duration, form.date
    );

    match exercise_service::add_exercise(db.get_ref(), &user_id, form, chrono::Utc::now()).await {
        Ok(exercise) => {
            log::info!("✅ exercises.add.success _id={} date={}", user_id, exercise.date);
            HttpResponse::Ok().json(exercise)
        }
        Err(e) => {
            log_failure("exercises.add", &user_id, &e);
            e.error_response()
        }
    }
}

/// GET /api/users/{_id}/logs - Exercise log, optionally bounded by date and count
#[utoipa::path(
    get,
    path = "/api/users/{_id}/logs",
    tag = "Exercises",
    params(
        ("_id" = String, Path, description = "User id"),
        LogQueryParams
    ),
    responses(
        (status = 200, description = "Exercise log", body = LogResponse),
        (status = 400, description = "Invalid date bound", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_logs(
    db: StoreData,
    user_id: web::Path<String>,
    query: web::Query<LogQueryParams>,
) -> impl Responder {
    let user_id = user_id.into_inner();
    let params = query.into_inner();

    log::info!(
        "📊 logs.get.started _id={} from={:?} to={:?} limit={:?}",
        user_id, params.from, params.to, params.limit
    );

    match exercise_service::get_log(db.get_ref(), &user_id, params).await {
        Ok(response) => {
            log::info!("✅ logs.get.success _id={} count={}", user_id, response.count);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log_failure("logs.get", &user_id, &e);
            e.error_response()
        }
    }
}
