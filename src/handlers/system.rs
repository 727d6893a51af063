use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::services::{Customers, Products, Resource, Sales, Stores};

use super::AppState;

/// GET /api - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    let resources: Vec<Value> = [
        (Customers::NAME, Customers::PLURAL),
        (Products::NAME, Products::PLURAL),
        (Stores::NAME, Stores::PLURAL),
        (Sales::NAME, Sales::PLURAL),
    ]
    .into_iter()
    .map(|(name, plural)| {
        json!({
            "name": plural,
            "collection": format!("/api/{}", name),
            "record": format!("/api/{}/:id", name),
        })
    })
    .collect();

    Json(json!({
        "name": "Store Manager API",
        "version": version,
        "description": "Customers, products, stores and sales",
        "resources": resources,
        "health": "/health",
    }))
}

/// GET /api/openapi.json - development only
pub async fn openapi() -> Json<&'static utoipa::openapi::OpenApi> {
    Json(crate::api::openapi::document())
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable",
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
