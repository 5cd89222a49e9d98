//! PostgreSQL-backed [`Store`]

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{AuthorRepo, BookRepo};
use super::{Store, StoreError};
use crate::models::{Author, Book, EntityId, NewAuthor, NewBook};

/// Store backed by a connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn authors(&self) -> AuthorRepo<'_> {
        AuthorRepo::new(&self.pool)
    }

    fn books(&self) -> BookRepo<'_> {
        BookRepo::new(&self.pool)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_authors(&self) -> Result<Vec<Author>, StoreError> {
        self.authors().list().await
    }

    async fn get_author(&self, id: EntityId) -> Result<Option<Author>, StoreError> {
        self.authors().get(id).await
    }

    async fn create_author(&self, author: NewAuthor) -> Result<Author, StoreError> {
        self.authors().create(author).await
    }

    async fn update_author(
        &self,
        id: EntityId,
        author: NewAuthor,
    ) -> Result<Option<Author>, StoreError> {
        self.authors().update(id, author).await
    }

    async fn delete_author(&self, id: EntityId) -> Result<Option<Author>, StoreError> {
        self.authors().delete(id).await
    }

    async fn list_books_by_author(
        &self,
        author_id: EntityId,
    ) -> Result<Option<Vec<Book>>, StoreError> {
        self.books().list_by_author(author_id).await
    }

    async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        self.books().list().await
    }

    async fn get_book(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        self.books().get(id).await
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, StoreError> {
        self.books().create(book).await
    }

    async fn update_book(&self, id: EntityId, book: NewBook) -> Result<Option<Book>, StoreError> {
        self.books().update(id, book).await
    }

    async fn delete_book(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        self.books().delete(id).await
    }

    async fn close(&self) {
        if !self.pool.is_closed() {
            tracing::info!("Closing database pool");
            self.pool.close().await;
        }
    }
}
