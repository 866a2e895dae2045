// Exercise pipeline: validate -> find user -> write/read exercises.
// Each step short-circuits, so a missing user never gets an exercise written.

use chrono::{DateTime, Utc};

use crate::{
    database::ExerciseStore,
    models::{ExerciseForm, ExerciseResponse, LogEntry, LogQueryParams, LogResponse},
    utils::{date, AppError},
};

pub async fn add_exercise(
    store: &dyn ExerciseStore,
    user_id: &str,
    form: ExerciseForm,
    now: DateTime<Utc>,
) -> Result<ExerciseResponse, AppError> {
    let new_exercise = form.validate(now)?;

    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(AppError::user_not_found)?;

    let exercise = store.create_exercise(user.id, new_exercise).await?;

    Ok(ExerciseResponse {
        username: user.username,
        description: exercise.description,
        duration: exercise.duration,
        date: date::bson_to_display(exercise.date),
        id: user.id.to_hex(),
    })
}

pub async fn get_log(
    store: &dyn ExerciseStore,
    user_id: &str,
    params: LogQueryParams,
) -> Result<LogResponse, AppError> {
    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(AppError::user_not_found)?;

    let filter = params.validate(user.id)?;
    let exercises = store.find_exercises(&filter).await?;

    let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();

    Ok(LogResponse {
        id: user.id.to_hex(),
        username: user.username,
        count: log.len(),
        log,
    })
}
