mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Exercise, LogFilter, NewExercise, User};
use crate::utils::AppError;

pub const USERS_COLLECTION: &str = "users";
pub const EXERCISES_COLLECTION: &str = "exercises";

/// Document store behind the HTTP handlers.
///
/// Handlers receive it as `web::Data<dyn ExerciseStore>` so tests can swap
/// MongoDB for [`MemoryStore`]. Every failure surfaces as
/// [`AppError::DatabaseError`].
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    async fn create_user(&self, username: &str) -> Result<User, AppError>;

    /// All users in store-natural order
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// `Ok(None)` when the id is unknown or not a valid ObjectId
    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn create_exercise(&self, user: ObjectId, exercise: NewExercise)
        -> Result<Exercise, AppError>;

    async fn find_exercises(&self, filter: &LogFilter) -> Result<Vec<Exercise>, AppError>;

    /// Round trip used by the health check
    async fn ping(&self) -> Result<(), AppError>;
}
