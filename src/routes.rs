use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{crud, system, AppState};
use crate::services::{Customers, Products, Resource, Sales, Stores};

/// Build the full application router
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(system::health))
        .route("/api", get(system::root))
        .merge(resource_routes::<Customers>())
        .merge(resource_routes::<Products>())
        .merge(resource_routes::<Stores>())
        .merge(resource_routes::<Sales>());

    if config.is_development() {
        tracing::debug!("Publishing OpenAPI document at /api/openapi.json");
        router = router.route("/api/openapi.json", get(system::openapi));
    }

    // Serve the built client, falling back to index.html for client-side routes
    if let Some(dir) = config.client.dist_dir.as_ref().filter(|dir| dir.is_dir()) {
        tracing::info!("Serving client from {}", dir.display());
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback(move |request: Request| spa_fallback(spa.clone(), request));
    }

    let mut router = router
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }

    router
}

/// The five CRUD routes for one resource under `/api/{name}`
fn resource_routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/api/{}", R::NAME),
            get(crud::list::<R>).post(crud::create::<R>),
        )
        .route(
            &format!("/api/{}/:id", R::NAME),
            get(crud::get::<R>)
                .put(crud::update::<R>)
                .delete(crud::delete::<R>),
        )
}

/// Unknown API paths stay 404; anything else is handed to the client bundle
async fn spa_fallback(spa: ServeDir<ServeFile>, request: Request) -> Response {
    let path = request.uri().path();
    if path == "/api" || path.starts_with("/api/") {
        return StatusCode::NOT_FOUND.into_response();
    }
    match spa.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([axum::http::header::LOCATION])
}
