pub mod exercises;
pub mod health;
pub mod swagger;
pub mod users;

use actix_web::{
    error::{QueryPayloadError, UrlencodedError},
    web, HttpRequest,
};

use crate::{database::ExerciseStore, utils::AppError};

/// Shared store handle extracted by the handlers
pub type StoreData = web::Data<dyn ExerciseStore>;

fn form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  request.form.invalid {} {}: {}", req.method(), req.path(), err);
    AppError::InvalidRequest("body must be an application/x-www-form-urlencoded form".to_string())
        .into()
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  request.query.invalid {} {}: {}", req.method(), req.path(), err);
    AppError::InvalidRequest("invalid query string".to_string()).into()
}

/// Registers every route. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Extractor failures answer with the same JSON error body as the handlers
    cfg.app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));

    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/hello", web::get().to(health::hello))
                .route("/users", web::post().to(users::create_user))
                .route("/users", web::get().to(users::list_users))
                .route("/users/{_id}/exercises", web::post().to(exercises::add_exercise))
                .route("/users/{_id}/logs", web::get().to(exercises::get_logs)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::{Exercise, LogFilter, NewExercise, User};
    use crate::utils::AppError;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use serde_json::Value;
    use std::sync::Arc;

    /// Store whose every operation fails
    struct BrokenStore;

    #[async_trait]
    impl ExerciseStore for BrokenStore {
        async fn create_user(&self, _: &str) -> Result<User, AppError> {
            Err(AppError::DatabaseError("socket closed".into()))
        }
        async fn list_users(&self) -> Result<Vec<User>, AppError> {
            Err(AppError::DatabaseError("socket closed".into()))
        }
        async fn find_user(&self, _: &str) -> Result<Option<User>, AppError> {
            Err(AppError::DatabaseError("socket closed".into()))
        }
        async fn create_exercise(&self, _: ObjectId, _: NewExercise) -> Result<Exercise, AppError> {
            Err(AppError::DatabaseError("socket closed".into()))
        }
        async fn find_exercises(&self, _: &LogFilter) -> Result<Vec<Exercise>, AppError> {
            Err(AppError::DatabaseError("socket closed".into()))
        }
        async fn ping(&self) -> Result<(), AppError> {
            Err(AppError::DatabaseError("socket closed".into()))
        }
    }

    fn app_data(store: Arc<dyn ExerciseStore>) -> StoreData {
        web::Data::from(store)
    }

    macro_rules! init_app {
        ($store:expr) => {
            test::init_service(App::new().app_data(app_data($store)).configure(configure)).await
        };
    }

    macro_rules! create_user {
        ($app:expr, $username:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/users")
                .set_form(vec![("username", $username)])
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            body["_id"].as_str().unwrap().to_string()
        }};
    }

    #[actix_web::test]
    async fn test_hello() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let req = test::TestRequest::get().uri("/api/hello").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, serde_json::json!({ "greeting": "hello API" }));
    }

    #[actix_web::test]
    async fn test_landing_page() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("Exercise Tracker"));
    }

    #[actix_web::test]
    async fn test_create_then_list_users() {
        let app = init_app!(Arc::new(MemoryStore::new()));

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_form(vec![("username", "alice")])
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["username"], "alice");
        let id = created["_id"].as_str().unwrap();
        assert!(!id.is_empty());

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let users: Value = test::call_and_read_body_json(&app, req).await;
        let users = users.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["_id"], id);
        assert_eq!(users[0]["username"], "alice");
    }

    #[actix_web::test]
    async fn test_concurrent_duplicate_usernames() {
        let app = init_app!(Arc::new(MemoryStore::new()));

        let first = test::TestRequest::post()
            .uri("/api/users")
            .set_form(vec![("username", "sam")])
            .to_request();
        let second = test::TestRequest::post()
            .uri("/api/users")
            .set_form(vec![("username", "sam")])
            .to_request();
        let (a, b) = futures::join!(
            test::call_and_read_body_json::<_, _, Value>(&app, first),
            test::call_and_read_body_json::<_, _, Value>(&app, second),
        );

        assert_eq!(a["username"], "sam");
        assert_eq!(b["username"], "sam");
        assert_ne!(a["_id"], b["_id"]);
    }

    #[actix_web::test]
    async fn test_add_exercise_with_date() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let id = create_user!(app, "alice");

        let req = test::TestRequest::post()
            .uri(&format!("/api/users/{}/exercises", id))
            .set_form(vec![("description", "run"), ("duration", "30"), ("date", "2023-01-15")])
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            serde_json::json!({
                "username": "alice",
                "description": "run",
                "duration": 30,
                "date": "Sun Jan 15 2023",
                "_id": id,
            })
        );
    }

    #[actix_web::test]
    async fn test_add_exercise_without_date_uses_today() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let id = create_user!(app, "alice");

        let before = crate::utils::date::to_display(chrono::Utc::now());
        let req = test::TestRequest::post()
            .uri(&format!("/api/users/{}/exercises", id))
            .set_form(vec![("description", "yoga"), ("duration", "45")])
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let after = crate::utils::date::to_display(chrono::Utc::now());

        let date = body["date"].as_str().unwrap();
        assert!(date == before || date == after, "unexpected date {}", date);
    }

    #[actix_web::test]
    async fn test_add_exercise_unknown_user_is_404() {
        let store = Arc::new(MemoryStore::new());
        let app = init_app!(store.clone());

        for id in [ObjectId::new().to_hex(), "not-an-object-id".to_string()] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/users/{}/exercises", id))
                .set_form(vec![("description", "run"), ("duration", "30")])
                .to_request();
            let res = test::call_service(&app, req).await;

            assert_eq!(res.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body, serde_json::json!({ "error": "User Not Found!" }));
        }

        assert_eq!(store.exercise_count().await, 0);
    }

    #[actix_web::test]
    async fn test_add_exercise_rejects_bad_duration() {
        let store = Arc::new(MemoryStore::new());
        let app = init_app!(store.clone());
        let id = create_user!(app, "alice");

        let req = test::TestRequest::post()
            .uri(&format!("/api/users/{}/exercises", id))
            .set_form(vec![("description", "run"), ("duration", "half an hour")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.exercise_count().await, 0);
    }

    #[actix_web::test]
    async fn test_logs_with_range_and_limit() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let id = create_user!(app, "alice");

        for (description, date) in [("a", "2023-01-01"), ("b", "2023-01-10"), ("c", "2023-01-20")] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/users/{}/exercises", id))
                .set_form(vec![("description", description), ("duration", "10"), ("date", date)])
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}/logs", id))
            .to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all["_id"], id.as_str());
        assert_eq!(all["username"], "alice");
        assert_eq!(all["count"], 3);

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}/logs?from=2023-01-10&to=2023-01-20", id))
            .to_request();
        let ranged: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ranged["count"], 2);
        assert_eq!(
            ranged["log"],
            serde_json::json!([
                { "description": "b", "duration": 10, "date": "Tue Jan 10 2023" },
                { "description": "c", "duration": 10, "date": "Fri Jan 20 2023" },
            ])
        );

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}/logs?limit=1", id))
            .to_request();
        let limited: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(limited["count"], 1);
        assert_eq!(limited["log"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}/logs?limit=lots", id))
            .to_request();
        let ignored: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ignored["count"], 3);
    }

    #[actix_web::test]
    async fn test_logs_limit_accepts_numeric_text() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let id = create_user!(app, "alice");

        for date in ["2023-01-01", "2023-01-02"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/users/{}/exercises", id))
                .set_form(vec![("description", "swim"), ("duration", "20"), ("date", date)])
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}/logs?limit=1.0", id))
            .to_request();
        let limited: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(limited["count"], 1);
        assert_eq!(limited["log"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_create_user_without_form_body_is_json_400() {
        let store = Arc::new(MemoryStore::new());
        let app = init_app!(store.clone());

        let req = test::TestRequest::post().uri("/api/users").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert!(body["error"].as_str().unwrap().contains("form"));

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let users: Value = test::call_and_read_body_json(&app, req).await;
        assert!(users.as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_logs_duplicate_query_key_is_json_400() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let id = create_user!(app, "alice");

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}/logs?from=2023-01-01&from=2023-02-01", id))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "error": "invalid query string" }));
    }

    #[actix_web::test]
    async fn test_logs_unknown_user_is_404() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}/logs", ObjectId::new().to_hex()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_store_failures_are_500_without_detail() {
        let app = init_app!(Arc::new(BrokenStore));
        let id = ObjectId::new().to_hex();

        let requests = vec![
            test::TestRequest::post()
                .uri("/api/users")
                .set_form(vec![("username", "alice")])
                .to_request(),
            test::TestRequest::get().uri("/api/users").to_request(),
            test::TestRequest::post()
                .uri(&format!("/api/users/{}/exercises", id))
                .set_form(vec![("description", "run"), ("duration", "30")])
                .to_request(),
            test::TestRequest::get()
                .uri(&format!("/api/users/{}/logs", id))
                .to_request(),
        ];

        for req in requests {
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body, serde_json::json!({ "error": "Internal Server Error" }));
        }
    }

    #[actix_web::test]
    async fn test_health_reports_store_state() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let app = init_app!(Arc::new(BrokenStore));
        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["store"], "down");
    }
}
