use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Errors from the entity store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Schema for the four tables. Sales cascade with the rows they reference.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS stores (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS sales (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
        store_id INTEGER NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        quantity INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_sales_product_id ON sales(product_id)",
    "CREATE INDEX IF NOT EXISTS idx_sales_customer_id ON sales(customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_sales_store_id ON sales(store_id)",
];

/// Connection pool setup and schema bootstrap for the entity store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool from application config
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        Self::connect_url(
            &config.url,
            config.max_connections,
            Duration::from_secs(config.connection_timeout),
        )
        .await
    }

    /// Open a pool for `url`. Foreign keys are enforced on every connection.
    pub async fn connect_url(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(url.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives and dies with its connection, so pin exactly one
        let pool = if Self::is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(acquire_timeout)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .acquire_timeout(acquire_timeout)
                .connect_with(options)
                .await?
        };

        info!("Created database pool for: {}", url);
        Ok(pool)
    }

    /// Create any missing tables and indexes
    pub async fn bootstrap(pool: &SqlitePool) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }
        debug!("Schema bootstrap complete ({} statements)", SCHEMA.len());
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn is_memory_url(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }
}
