// handlers/mod.rs - HTTP handlers
//
// crud:   the five generic operations, mounted once per resource
// system: service info and health
pub mod crud;
pub mod system;

use sqlx::SqlitePool;

/// Shared router state. Each request builds its service around a clone of
/// the pool handle; the connection goes back to the pool when the request ends.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
