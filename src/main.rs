use anyhow::Context;
use tracing_subscriber::EnvFilter;

use store_manager::config;
use store_manager::database::DatabaseManager;
use store_manager::handlers::AppState;
use store_manager::routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("store_manager=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Store Manager API in {:?} mode", config.environment);
    if store_manager::is_development!() {
        tracing::debug!("Configuration: {:?}", config);
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    DatabaseManager::bootstrap(&pool)
        .await
        .context("failed to create schema")?;

    let app = routes::app(AppState::new(pool.clone()), config);

    let bind_addr = config.api.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Store Manager API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
