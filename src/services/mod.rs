pub mod exercise_service;
pub mod user_service;
