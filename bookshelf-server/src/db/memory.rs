//! In-memory [`Store`] for tests and `serve --in-memory`
//!
//! Applies the same integrity rules as the PostgreSQL store. Data is lost
//! when the process exits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::models::{Author, Book, EntityId, NewAuthor, NewBook};

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i32, Author>,
    books: BTreeMap<i32, Book>,
    next_author_id: i32,
    next_book_id: i32,
}

impl Tables {
    /// Advance a `SERIAL`-like counter; fails instead of wrapping at `i32::MAX`.
    fn next_id(counter: &mut i32, table: &'static str) -> Result<i32, StoreError> {
        *counter = counter
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { table })?;
        Ok(*counter)
    }

    fn require_author(&self, author_id: EntityId) -> Result<(), StoreError> {
        if self.authors.contains_key(&author_id.get()) {
            Ok(())
        } else {
            Err(StoreError::UnknownAuthor {
                author_id: author_id.get(),
            })
        }
    }
}

/// Store holding both tables behind one lock
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_authors(&self) -> Result<Vec<Author>, StoreError> {
        Ok(self.tables.read().await.authors.values().cloned().collect())
    }

    async fn get_author(&self, id: EntityId) -> Result<Option<Author>, StoreError> {
        Ok(self.tables.read().await.authors.get(&id.get()).cloned())
    }

    async fn create_author(&self, author: NewAuthor) -> Result<Author, StoreError> {
        let mut tables = self.tables.write().await;
        let id = Tables::next_id(&mut tables.next_author_id, "authors")?;
        let author = author.into_author(id);
        tables.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_author(
        &self,
        id: EntityId,
        author: NewAuthor,
    ) -> Result<Option<Author>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.authors.get_mut(&id.get()).map(|slot| {
            *slot = author.into_author(id.get());
            slot.clone()
        }))
    }

    async fn delete_author(&self, id: EntityId) -> Result<Option<Author>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&id.get()) {
            return Ok(None);
        }

        let books = tables
            .books
            .values()
            .filter(|b| b.author_id == id.get())
            .count() as i64;
        if books > 0 {
            return Err(StoreError::AuthorHasBooks {
                author_id: id.get(),
                books,
            });
        }

        Ok(tables.authors.remove(&id.get()))
    }

    async fn list_books_by_author(
        &self,
        author_id: EntityId,
    ) -> Result<Option<Vec<Book>>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.authors.contains_key(&author_id.get()) {
            return Ok(None);
        }

        Ok(Some(
            tables
                .books
                .values()
                .filter(|b| b.author_id == author_id.get())
                .cloned()
                .collect(),
        ))
    }

    async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.tables.read().await.books.values().cloned().collect())
    }

    async fn get_book(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        Ok(self.tables.read().await.books.get(&id.get()).cloned())
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_author(book.author_id)?;

        let id = Tables::next_id(&mut tables.next_book_id, "books")?;
        let book = book.into_book(id);
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: EntityId, book: NewBook) -> Result<Option<Book>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&id.get()) {
            return Ok(None);
        }
        tables.require_author(book.author_id)?;

        let book = book.into_book(id.get());
        tables.books.insert(book.id, book.clone());
        Ok(Some(book))
    }

    async fn delete_book(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        Ok(self.tables.write().await.books.remove(&id.get()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn id(raw: i32) -> EntityId {
        EntityId::new(raw.into(), "id").unwrap()
    }

    fn author(name: &str) -> NewAuthor {
        NewAuthor::new(name, "Argentine").unwrap()
    }

    fn book(title: &str, author_id: i32) -> NewBook {
        let date = NaiveDate::from_ymd_opt(1944, 1, 1).unwrap();
        NewBook::new(title, author_id.into(), date).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_author() {
        let store = MemoryStore::new();
        let created = store.create_author(author("Borges")).await.unwrap();

        let fetched = store.get_author(id(created.id)).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Borges");
        assert_eq!(fetched.nationality, "Argentine");
    }

    #[tokio::test]
    async fn list_returns_exactly_what_was_created() {
        let store = MemoryStore::new();
        for name in ["Borges", "Cortázar", "Sábato"] {
            store.create_author(author(name)).await.unwrap();
        }

        let names: Vec<_> = store
            .list_authors()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["Borges", "Cortázar", "Sábato"]);
    }

    #[tokio::test]
    async fn update_missing_author_leaves_storage_unchanged() {
        let store = MemoryStore::new();
        let existing = store.create_author(author("Borges")).await.unwrap();

        let updated = store.update_author(id(99), author("Ghost")).await.unwrap();
        assert_eq!(updated, None);
        assert_eq!(store.list_authors().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn delete_author_returns_snapshot_once() {
        let store = MemoryStore::new();
        let created = store.create_author(author("Borges")).await.unwrap();

        assert_eq!(
            store.delete_author(id(created.id)).await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(store.delete_author(id(created.id)).await.unwrap(), None);
        assert_eq!(store.get_author(id(created.id)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create_author(author("Borges")).await.unwrap();
        store.delete_author(id(first.id)).await.unwrap();

        let second = store.create_author(author("Cortázar")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn exhausted_ids_fail_without_inserting() {
        let store = MemoryStore::new();
        let borges = store.create_author(author("Borges")).await.unwrap();
        {
            let mut tables = store.tables.write().await;
            tables.next_author_id = i32::MAX;
            tables.next_book_id = i32::MAX;
        }

        let err = store.create_author(author("Cortázar")).await.unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted { table: "authors" }));
        assert_eq!(store.list_authors().await.unwrap(), vec![borges.clone()]);

        let err = store
            .create_book(book("Ficciones", borges.id))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted { table: "books" }));
        assert!(store.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn book_requires_known_author() {
        let store = MemoryStore::new();
        let err = store.create_book(book("Ficciones", 7)).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownAuthor { author_id: 7 }));
        assert!(store.list_books().await.unwrap().is_empty());

        let borges = store.create_author(author("Borges")).await.unwrap();
        let created = store.create_book(book("Ficciones", borges.id)).await.unwrap();
        assert_eq!(store.get_book(id(created.id)).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn update_book_checks_book_before_author() {
        let store = MemoryStore::new();
        let borges = store.create_author(author("Borges")).await.unwrap();
        let created = store.create_book(book("Ficciones", borges.id)).await.unwrap();

        // Missing book wins over missing author
        assert_eq!(store.update_book(id(42), book("X", 99)).await.unwrap(), None);

        let err = store
            .update_book(id(created.id), book("Ficciones", 99))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownAuthor { author_id: 99 }));

        let updated = store
            .update_book(id(created.id), book("El Aleph", borges.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "El Aleph");
        assert_eq!(updated.id, created.id);
    }

    #[tokio::test]
    async fn author_with_books_is_not_deleted() {
        let store = MemoryStore::new();
        let borges = store.create_author(author("Borges")).await.unwrap();
        let ficciones = store.create_book(book("Ficciones", borges.id)).await.unwrap();

        let err = store.delete_author(id(borges.id)).await.unwrap_err();
        assert!(matches!(err, StoreError::AuthorHasBooks { books: 1, .. }));
        assert!(store.get_author(id(borges.id)).await.unwrap().is_some());

        store.delete_book(id(ficciones.id)).await.unwrap();
        assert!(store.delete_author(id(borges.id)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn books_by_author() {
        let store = MemoryStore::new();
        let borges = store.create_author(author("Borges")).await.unwrap();
        let cortazar = store.create_author(author("Cortázar")).await.unwrap();
        store.create_book(book("Ficciones", borges.id)).await.unwrap();
        store.create_book(book("Rayuela", cortazar.id)).await.unwrap();
        store.create_book(book("El Aleph", borges.id)).await.unwrap();

        let titles: Vec<_> = store
            .list_books_by_author(id(borges.id))
            .await
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, ["Ficciones", "El Aleph"]);

        assert_eq!(store.list_books_by_author(id(99)).await.unwrap(), None);
    }
}
