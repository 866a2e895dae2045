use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise Tracker API",
        version = "1.0.0",
        description = "Track users and their exercise logs.\n\nForm bodies are `application/x-www-form-urlencoded`. Dates are `YYYY-MM-DD` and come back as `Sun Jan 15 2023`."
    ),
    paths(
        // Health
        crate::api::health::hello,
        crate::api::health::health_check,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,

        // Exercises
        crate::api::exercises::add_exercise,
        crate::api::exercises::get_logs,
    ),
    components(
        schemas(
            crate::api::health::HelloResponse,
            crate::api::health::HealthResponse,
            crate::models::CreateUserForm,
            crate::models::UserResponse,
            crate::models::ExerciseForm,
            crate::models::ExerciseResponse,
            crate::models::LogEntry,
            crate::models::LogResponse,
            crate::utils::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Greeting and health check endpoints."),
        (name = "Users", description = "Create and list users."),
        (name = "Exercises", description = "Add exercises and read a user's exercise log."),
    )
)]
pub struct ApiDoc;
