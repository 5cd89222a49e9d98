//! Storage contract shared by the PostgreSQL and in-memory backends
//!
//! Not-found is an absent result (`None`), never an error: the HTTP layer
//! decides how to answer it.

use async_trait::async_trait;

use crate::models::{Author, Book, EntityId, NewAuthor, NewBook};

/// Data-access error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A book referenced an author that does not exist
    #[error("author {author_id} does not exist")]
    UnknownAuthor { author_id: i32 },

    /// Deleting an author that still has books
    #[error("author {author_id} still has {books} book(s)")]
    AuthorHasBooks { author_id: i32, books: i64 },

    /// The id sequence of a table has no values left
    #[error("{table} id sequence exhausted")]
    IdsExhausted { table: &'static str },
}

impl StoreError {
    /// Translate a foreign-key violation on a book write into `UnknownAuthor`.
    pub(crate) fn from_book_write(err: sqlx::Error, author_id: EntityId) -> Self {
        match err.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => Self::UnknownAuthor {
                author_id: author_id.get(),
            },
            _ => Self::Sqlx(err),
        }
    }
}

/// CRUD operations over authors and books.
///
/// Every call acquires and releases its own storage resources; implementations
/// hold no per-request state.
#[async_trait]
pub trait Store: Send + Sync {
    /// All authors, ordered by id.
    async fn list_authors(&self) -> Result<Vec<Author>, StoreError>;

    async fn get_author(&self, id: EntityId) -> Result<Option<Author>, StoreError>;

    async fn create_author(&self, author: NewAuthor) -> Result<Author, StoreError>;

    /// Overwrite both fields. `None` if the author does not exist.
    async fn update_author(
        &self,
        id: EntityId,
        author: NewAuthor,
    ) -> Result<Option<Author>, StoreError>;

    /// Remove the author and return the pre-deletion snapshot.
    ///
    /// Fails with [`StoreError::AuthorHasBooks`] while any book references it.
    async fn delete_author(&self, id: EntityId) -> Result<Option<Author>, StoreError>;

    /// Books written by an author. `None` if the author does not exist.
    async fn list_books_by_author(
        &self,
        author_id: EntityId,
    ) -> Result<Option<Vec<Book>>, StoreError>;

    /// All books, ordered by id.
    async fn list_books(&self) -> Result<Vec<Book>, StoreError>;

    async fn get_book(&self, id: EntityId) -> Result<Option<Book>, StoreError>;

    /// Fails with [`StoreError::UnknownAuthor`] if `author_id` has no row.
    async fn create_book(&self, book: NewBook) -> Result<Book, StoreError>;

    /// Overwrite all fields. `None` if the book does not exist; an existing
    /// book pointed at a missing author fails with [`StoreError::UnknownAuthor`].
    async fn update_book(&self, id: EntityId, book: NewBook) -> Result<Option<Book>, StoreError>;

    async fn delete_book(&self, id: EntityId) -> Result<Option<Book>, StoreError>;

    /// Release pooled resources. Called once on shutdown.
    async fn close(&self) {}
}
