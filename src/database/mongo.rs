use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

use super::{ExerciseStore, EXERCISES_COLLECTION, USERS_COLLECTION};
use crate::models::{Exercise, LogFilter, NewExercise, User};
use crate::utils::{date, AppError};

const DEFAULT_DATABASE: &str = "exercise_tracker";

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connects, verifies the connection and creates indexes.
    ///
    /// The database name comes from `database`, then from the URI path,
    /// then falls back to `exercise_tracker`.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = database
            .map(str::to_string)
            .or_else(|| client_options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;
        log::info!("✅ Connected to MongoDB database: {}", db_name);

        let store = Self { db };
        store.ensure_indexes().await?;

        Ok(store)
    }

    /// Index backing the per-user log query
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let exercises = self.db.collection::<Document>(EXERCISES_COLLECTION);
        let log_index = IndexModel::builder()
            .keys(doc! { "user": 1, "date": 1 })
            .build();

        match exercises.create_index(log_index).await {
            Ok(_) => log::info!("   ✅ Index created: exercises(user, date)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        Ok(())
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS_COLLECTION)
    }

    fn exercises(&self) -> Collection<Exercise> {
        self.db.collection(EXERCISES_COLLECTION)
    }
}

/// Mongo filter for a user's log: `{user, date: {$gte, $lte}}`
fn log_filter_document(filter: &LogFilter) -> Document {
    let mut query = doc! { "user": filter.user };

    let mut range = Document::new();
    if let Some(from) = filter.from {
        range.insert("$gte", date::to_bson(from));
    }
    if let Some(to) = filter.to {
        range.insert("$lte", date::to_bson(to));
    }
    if !range.is_empty() {
        query.insert("date", range);
    }

    query
}

#[async_trait]
impl ExerciseStore for MongoStore {
    async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let user = User {
            id: ObjectId::new(),
            username: username.to_string(),
        };

        self.users().insert_one(&user).await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let mut cursor = self
            .users()
            .find(doc! {})
            .projection(doc! { "_id": 1, "username": 1 })
            .await?;

        let mut users = Vec::new();
        while let Some(result) = cursor.next().await {
            users.push(result?);
        }

        Ok(users)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        Ok(self.users().find_one(doc! { "_id": object_id }).await?)
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

        self.exercises().insert_one(&exercise).await?;

        Ok(exercise)
    }

    async fn find_exercises(&self, filter: &LogFilter) -> Result<Vec<Exercise>, AppError> {
        let collection = self.exercises();
        let mut find = collection.find(log_filter_document(filter));
        if let Some(limit) = filter.limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let mut cursor = find.await?;
        let mut exercises = Vec::new();
        while let Some(result) = cursor.next().await {
            exercises.push(result?);
        }

        Ok(exercises)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
