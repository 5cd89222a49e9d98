//! Book repository
//!
//! Handles book CRUD with:
//! - create: verifies the author inside the insert transaction
//! - update: relies on the foreign key, mapped to `UnknownAuthor`
//! - list by author: `None` when the author is missing

use sqlx::PgPool;

use crate::db::StoreError;
use crate::models::{Book, EntityId, NewBook};

use super::AuthorRepo;

/// Book repository
pub struct BookRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, publication_date FROM books ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }

    pub async fn list_by_author(
        &self,
        author_id: EntityId,
    ) -> Result<Option<Vec<Book>>, StoreError> {
        if !AuthorRepo::new(self.pool).exists(author_id).await? {
            return Ok(None);
        }

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author_id, publication_date
            FROM books
            WHERE author_id = $1
            ORDER BY id
            "#,
        )
        .bind(author_id.get())
        .fetch_all(self.pool)
        .await?;

        Ok(Some(books))
    }

    pub async fn get(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, publication_date FROM books WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?;

        Ok(book)
    }

    /// Create a book for an existing author.
    pub async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let author_id = book.author_id;
        let mut tx = self.pool.begin().await?;

        // Verify author exists
        let (author_exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
                .bind(author_id.get())
                .fetch_one(&mut *tx)
                .await?;

        if !author_exists {
            return Err(StoreError::UnknownAuthor {
                author_id: author_id.get(),
            });
        }

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, publication_date)
            VALUES ($1, $2, $3)
            RETURNING id, title, author_id, publication_date
            "#,
        )
        .bind(book.title.as_str())
        .bind(author_id.get())
        .bind(book.publication_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::from_book_write(e, author_id))?;

        tx.commit().await?;

        tracing::debug!(book_id = book.id, author_id = book.author_id, "book created");
        Ok(book)
    }

    pub async fn update(&self, id: EntityId, book: NewBook) -> Result<Option<Book>, StoreError> {
        let author_id = book.author_id;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, publication_date = $4
            WHERE id = $1
            RETURNING id, title, author_id, publication_date
            "#,
        )
        .bind(id.get())
        .bind(book.title.as_str())
        .bind(author_id.get())
        .bind(book.publication_date)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StoreError::from_book_write(e, author_id))?;

        Ok(book)
    }

    pub async fn delete(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            DELETE FROM books
            WHERE id = $1
            RETURNING id, title, author_id, publication_date
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?;

        Ok(book)
    }
}
