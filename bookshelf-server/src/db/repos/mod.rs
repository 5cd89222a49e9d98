//! Repository implementations for PostgreSQL access
//!
//! Each repository follows these patterns:
//! - Borrows the pool; every statement checks out its own connection
//! - Uses RETURNING so writes come back in a single round trip
//! - Uses transactions for multi-step operations

pub mod authors;
pub mod books;

pub use authors::AuthorRepo;
pub use books::BookRepo;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::PgPool;

    /// Connect to `DATABASE_URL` and make sure the schema exists.
    pub async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");
        crate::db::migrations::run(&pool)
            .await
            .expect("migrations failed");
        pool
    }
}
