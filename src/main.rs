mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Config, StoreBackend};
use crate::database::{ExerciseStore, MemoryStore, MongoStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting Exercise Tracker...");

    let store: Arc<dyn ExerciseStore> = match &config.store {
        StoreBackend::MongoDB { uri, database } => {
            let store = MongoStore::connect(uri, database.as_deref())
                .await
                .map_err(|e| {
                    log::error!("❌ Failed to connect to MongoDB: {}", e);
                    std::io::Error::new(std::io::ErrorKind::Other, e)
                })?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            log::warn!("⚠️  Using in-memory store, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let store_data: web::Data<dyn ExerciseStore> = web::Data::from(store);

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b %Dms rid=%{x-request-id}o"#,
            ))
            .wrap(cors)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
