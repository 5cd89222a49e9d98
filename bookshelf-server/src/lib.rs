//! bookshelf-server: HTTP API over authors and books
//!
//! CRUD endpoints for two related tables, gated by a static API key and
//! backed by PostgreSQL (or an in-memory store for tests and demos).

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod state;

pub use config::{DatabaseConfig, ServerConfig};
pub use db::{MemoryStore, PgStore, Store, StoreError};
pub use error::{Error, Result};
pub use state::AppState;

/// Open the pool and make sure both tables exist.
pub async fn connect_store(config: &DatabaseConfig) -> Result<PgStore> {
    tracing::info!(db = %config.display_target(), "Connecting to database");
    let pool = db::create_pool(config).await?;

    db::migrations::run(&pool).await.map_err(Error::Migration)?;

    Ok(PgStore::new(pool))
}
