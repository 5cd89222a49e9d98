//! Error types for bookshelf-server bootstrap

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::pool::PoolError;
use crate::http::ServerError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Migration failed: {0}")]
    Migration(#[source] sqlx::Error),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}
