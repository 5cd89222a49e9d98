//! Command implementations for bookshelf CLI

pub mod migrate;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use serve::run_serve;

use bookshelf_server::config::{DatabaseConfig, DEFAULT_MAX_CONNECTIONS};
use clap::Args;

/// Database connection arguments shared by commands that touch PostgreSQL
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (overrides the individual connection settings)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "DATABASE_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DATABASE_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "DATABASE_NAME", default_value = "bookshelf")]
    pub db_name: String,

    /// Database user
    #[arg(long, env = "DATABASE_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DATABASE_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl From<DatabaseArgs> for DatabaseConfig {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            url: args.database_url,
            host: args.db_host,
            port: args.db_port,
            name: args.db_name,
            user: args.db_user,
            password: args.db_password,
            max_connections: args.max_connections,
        }
    }
}
