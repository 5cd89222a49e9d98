//! Author repository
//!
//! Handles author CRUD:
//! - update/delete: single statement with RETURNING, absent row = `None`
//! - delete: transaction that locks the row and refuses while books remain

use sqlx::PgPool;

use crate::db::StoreError;
use crate::models::{Author, EntityId, NewAuthor};

/// Author repository
pub struct AuthorRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthorRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Author>, StoreError> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, name, nationality FROM authors ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(authors)
    }

    pub async fn get(&self, id: EntityId) -> Result<Option<Author>, StoreError> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, nationality FROM authors WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?;

        Ok(author)
    }

    pub async fn exists(&self, id: EntityId) -> Result<bool, StoreError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
                .bind(id.get())
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn create(&self, author: NewAuthor) -> Result<Author, StoreError> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, nationality)
            VALUES ($1, $2)
            RETURNING id, name, nationality
            "#,
        )
        .bind(author.name.as_str())
        .bind(author.nationality.as_str())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(author_id = author.id, "author created");
        Ok(author)
    }

    pub async fn update(
        &self,
        id: EntityId,
        author: NewAuthor,
    ) -> Result<Option<Author>, StoreError> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET name = $2, nationality = $3
            WHERE id = $1
            RETURNING id, name, nationality
            "#,
        )
        .bind(id.get())
        .bind(author.name.as_str())
        .bind(author.nationality.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(author)
    }

    /// Delete an author that has no books.
    ///
    /// The author row is locked `FOR UPDATE` so a concurrent book insert
    /// (which takes a key-share lock through the foreign key) cannot slip in
    /// between the count and the delete.
    pub async fn delete(&self, id: EntityId) -> Result<Option<Author>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, nationality FROM authors WHERE id = $1 FOR UPDATE",
        )
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(author) = author else {
            return Ok(None);
        };

        let (books,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(id.get())
            .fetch_one(&mut *tx)
            .await?;

        if books > 0 {
            return Err(StoreError::AuthorHasBooks {
                author_id: author.id,
                books,
            });
        }

        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(author_id = author.id, "author deleted");
        Ok(Some(author))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::test_support;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p bookshelf-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_round_trips() {
        let pool = test_support::pool().await;
        let repo = AuthorRepo::new(&pool);

        let created = repo
            .create(NewAuthor::new("Frank Herbert", "American").unwrap())
            .await
            .unwrap();
        let id = EntityId::new(created.id.into(), "id").unwrap();

        assert_eq!(repo.get(id).await.unwrap(), Some(created.clone()));
        assert!(repo.exists(id).await.unwrap());

        assert_eq!(repo.delete(id).await.unwrap(), Some(created));
        assert_eq!(repo.get(id).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_is_none() {
        let pool = test_support::pool().await;
        let repo = AuthorRepo::new(&pool);

        let id = EntityId::new(i64::from(i32::MAX), "id").unwrap();
        let updated = repo
            .update(id, NewAuthor::new("Nobody", "Nowhere").unwrap())
            .await
            .unwrap();
        assert_eq!(updated, None);
    }
}
