use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::ExerciseStore;
use crate::models::{Exercise, LogFilter, NewExercise, User};
use crate::utils::{date, AppError};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    exercises: Vec<Exercise>,
}

/// In-process store keeping documents in insertion order.
/// Used for local runs without MongoDB (`STORE_BACKEND=memory`) and in tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn exercise_count(&self) -> usize {
        self.collections.read().await.exercises.len()
    }
}

#[async_trait]
impl ExerciseStore for MemoryStore {
    async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let user = User {
            id: ObjectId::new(),
            username: username.to_string(),
        };

        self.collections.write().await.users.push(user.clone());

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.collections.read().await.users.clone())
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let collections = self.collections.read().await;
        Ok(collections.users.iter().find(|u| u.id == object_id).cloned())
    }

    async fn create_exercise(
        &self,
        user: ObjectId,
        exercise: NewExercise,
    ) -> Result<Exercise, AppError> {
        let exercise = Exercise {
            id: ObjectId::new(),
            user,
            description: exercise.description,
            duration: exercise.duration,
            date: date::to_bson(exercise.date),
        };

        self.collections.write().await.exercises.push(exercise.clone());

        Ok(exercise)
    }

    async fn find_exercises(&self, filter: &LogFilter) -> Result<Vec<Exercise>, AppError> {
        let collections = self.collections.read().await;
        let limit = filter
            .limit
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(usize::MAX);

        Ok(collections
            .exercises
            .iter()
            .filter(|exercise| filter.matches(exercise))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
