//! HTTP server command
//!
//! Runs the bookshelf API with the API-key gate in front of all resources.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bookshelf_server::db::Store;
use bookshelf_server::http::{run_server, ApiKey};
use bookshelf_server::{connect_store, AppState, MemoryStore, ServerConfig};
use clap::Parser;

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BOOKSHELF_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Shared secret expected in the x-api-key header
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep data in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let api_key = ApiKey::new(&args.api_key).context("Invalid API_KEY")?;

    let store: Arc<dyn Store> = if args.in_memory {
        tracing::warn!("Using in-memory store - data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let store = connect_store(&args.database.into())
            .await
            .context("Failed to open database")?;
        Arc::new(store)
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.timeout),
    };

    tracing::info!("Starting bookshelf server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(AppState::new(store, api_key), config)
        .await
        .context("Server error")?;

    Ok(())
}
