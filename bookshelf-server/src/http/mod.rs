//! HTTP server layer
//!
//! Axum server with:
//! - Static API-key gate (`x-api-key`)
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod auth;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use auth::{ApiKey, API_KEY_HEADER};
pub use error::ApiError;
pub use server::{build_router, run_server, ServerError};
