#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use sqlx::SqlitePool;

use store_manager::config::AppConfig;
use store_manager::database::DatabaseManager;
use store_manager::handlers::AppState;
use store_manager::routes;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    /// The server's own database, for tests that need to break it
    pub pool: SqlitePool,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a body and return the created DTO, failing unless the answer is 201
    pub async fn create(&self, resource: &str, body: Value) -> Result<Value> {
        let res = self
            .client
            .post(self.url(&format!("/api/{}", resource)))
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let body = res.json::<Value>().await?;
        anyhow::ensure!(status == StatusCode::CREATED, "expected 201, got {}: {}", status, body);
        Ok(body)
    }

    pub async fn list(&self, resource: &str) -> Result<Vec<Value>> {
        let res = self
            .client
            .get(self.url(&format!("/api/{}", resource)))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "expected 200, got {}", res.status());
        Ok(res.json::<Vec<Value>>().await?)
    }

    /// One product, customer and store; returns their ids
    pub async fn seed_references(&self) -> Result<(i64, i64, i64)> {
        let product = self
            .create("product", serde_json::json!({"name": "Widget", "price": 9.99}))
            .await?;
        let customer = self
            .create("customer", serde_json::json!({"name": "Ada", "address": "1 Main St"}))
            .await?;
        let store = self
            .create("store", serde_json::json!({"name": "Downtown", "address": "5 High St"}))
            .await?;
        Ok((id_of(&product)?, id_of(&customer)?, id_of(&store)?))
    }
}

pub fn id_of(dto: &Value) -> Result<i64> {
    dto.get("id")
        .and_then(Value::as_i64)
        .with_context(|| format!("missing id in {}", dto))
}

/// Start the API in-process on a free port with its own in-memory database
pub async fn spawn_server() -> Result<TestServer> {
    spawn_with_config(AppConfig::development()).await
}

/// Same as `spawn_server`, also serving a built client from `dist_dir`
pub async fn spawn_server_with_client(dist_dir: PathBuf) -> Result<TestServer> {
    let mut config = AppConfig::development();
    config.client.dist_dir = Some(dist_dir);
    spawn_with_config(config).await
}

/// Start the API with the given settings; the database is always in-memory
pub async fn spawn_with_config(config: AppConfig) -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let pool = DatabaseManager::connect_url("sqlite::memory:", 1, Duration::from_secs(5)).await?;
    DatabaseManager::bootstrap(&pool).await?;

    let app = routes::app(AppState::new(pool.clone()), &config);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let server = TestServer {
        port,
        base_url,
        client: reqwest::Client::new(),
        pool,
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            if tokio::time::Instant::now() > deadline {
                anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout);
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
}
