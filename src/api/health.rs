use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::api::StoreData;

const LANDING_PAGE: &str = include_str!("../../views/index.html");

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HelloResponse {
    pub greeting: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    /// "up" or "down"
    pub store: String,
}

/// GET / - landing page with forms for the API
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(LANDING_PAGE)
}

#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "Health",
    responses(
        (status = 200, description = "Greeting", body = HelloResponse)
    )
)]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok().json(HelloResponse {
        greeting: "hello API".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Document store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(db: StoreData) -> impl Responder {
    let store_up = match db.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("⚠️  health.store.failed: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if store_up { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        store: if store_up { "up" } else { "down" }.to_string(),
    };

    if store_up {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
