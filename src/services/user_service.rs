use crate::{
    database::ExerciseStore,
    models::UserResponse,
    utils::AppError,
};

/// Inserts a user. Usernames are stored as given, duplicates included.
pub async fn create_user(store: &dyn ExerciseStore, username: &str) -> Result<UserResponse, AppError> {
    let user = store.create_user(username).await?;
    Ok(UserResponse::from(user))
}

pub async fn list_users(store: &dyn ExerciseStore) -> Result<Vec<UserResponse>, AppError> {
    let users = store.list_users().await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}
