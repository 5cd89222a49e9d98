//! Database layer - storage contract, connection pool and repositories
//!
//! # Design Principles
//!
//! - Handlers only see `dyn Store`; PostgreSQL and in-memory share one contract
//! - Connection pool, one checkout per operation - no shared connection
//! - Integrity rules (known author, no orphaned books) enforced here, not by
//!   storage defaults
//! - Transactions for multi-step operations

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use store::{Store, StoreError};
