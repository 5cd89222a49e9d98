//! Schema bootstrap for the authors and books tables
//!
//! Create-if-not-exists only; safe to run on every startup.

use sqlx::PgPool;

/// Ensure both tables exist
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            nationality VARCHAR(100) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // RESTRICT backs up the no-orphans check in the author repository
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id SERIAL PRIMARY KEY,
            title VARCHAR(200) NOT NULL,
            author_id INTEGER NOT NULL REFERENCES authors(id) ON DELETE RESTRICT,
            publication_date DATE NOT NULL DEFAULT CURRENT_DATE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id)")
        .execute(pool)
        .await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}
