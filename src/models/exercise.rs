use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::utils::{date, AppError};

/// Exercise document (collection `exercises`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Owning user `_id`
    pub user: ObjectId,

    pub description: String,

    /// Minutes
    pub duration: i64,

    pub date: bson::DateTime,
}

fn bad_date(field: &str) -> AppError {
    AppError::InvalidRequest(format!("{} must be YYYY-MM-DD or an RFC 3339 timestamp", field))
}

/// Exercise that passed validation and is ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub description: String,
    pub duration: i64,
    pub date: DateTime<Utc>,
}

/// Raw form body for POST /api/users/{_id}/exercises
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ExerciseForm {
    #[serde(default)]
    pub description: String,
    pub duration: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339; defaults to now
    pub date: Option<String>,
}

impl ExerciseForm {
    /// Validates the form. `now` fills in a missing or empty date.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewExercise, AppError> {
        let duration = self
            .duration
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::InvalidRequest("duration is required".to_string()))?
            .parse::<i64>()
            .ok()
            .filter(|minutes| *minutes >= 0)
            .ok_or_else(|| {
                AppError::InvalidRequest("duration must be a whole number of minutes".to_string())
            })?;

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => now,
            Some(raw) => date::parse_date(raw).ok_or_else(|| bad_date("date"))?,
        };

        Ok(NewExercise {
            description: self.description,
            duration,
            date,
        })
    }
}

/// Query string for GET /api/users/{_id}/logs
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQueryParams {
    /// Inclusive lower bound (`YYYY-MM-DD`)
    pub from: Option<String>,
    /// Inclusive upper bound (`YYYY-MM-DD`)
    pub to: Option<String>,
    /// Maximum number of entries
    pub limit: Option<String>,
}

/// Validated log filter scoped to one user
#[derive(Debug, Clone, PartialEq)]
pub struct LogFilter {
    pub user: ObjectId,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
}

impl LogFilter {
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let when = date::from_bson(exercise.date);
        exercise.user == self.user
            && self.from.map_or(true, |from| when >= from)
            && self.to.map_or(true, |to| when <= to)
    }
}

impl LogQueryParams {
    pub fn validate(self, user: ObjectId) -> Result<LogFilter, AppError> {
        let from = parse_bound(self.from.as_deref(), "from")?;
        let to = parse_bound(self.to.as_deref(), "to")?;

        // Non-numeric limits are ignored. Fractions truncate; anything below 1 means no cap.
        let limit = self
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite() && *n >= 1.0)
            .map(|n| n.trunc() as u64);

        Ok(LogFilter { user, from, to, limit })
    }
}

fn parse_bound(raw: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => date::parse_date(value)
            .map(Some)
            .ok_or_else(|| bad_date(field)),
    }
}

/// Response for a newly added exercise
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: i64,
    /// e.g. "Sun Jan 15 2023"
    pub date: String,
    /// `_id` of the user
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: date::bson_to_display(exercise.date),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    /// Always equal to `log.len()`
    pub count: usize,
    pub log: Vec<LogEntry>,
}
