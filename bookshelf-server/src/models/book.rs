//! Book record and input validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::bounded_text;
use super::{EntityId, ValidationError};

/// Maximum length for book titles (matches `books.title VARCHAR(200)`)
const MAX_TITLE_LEN: usize = 200;

/// Book record as persisted
///
/// `publication_date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub publication_date: NaiveDate,
}

/// Validated book title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    /// Create a new book title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 200 characters
    ///
    /// # Example
    /// ```
    /// use bookshelf_server::models::BookTitle;
    ///
    /// assert!(BookTitle::new("Dune").is_ok());
    /// assert!(BookTitle::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "title", MAX_TITLE_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated input for create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: BookTitle,
    pub author_id: EntityId,
    pub publication_date: NaiveDate,
}

impl NewBook {
    pub fn new(
        title: &str,
        author_id: i64,
        publication_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: BookTitle::new(title)?,
            author_id: EntityId::new(author_id, "author_id")?,
            publication_date,
        })
    }

    /// Materialize the record once storage has assigned an id.
    pub fn into_book(self, id: i32) -> Book {
        Book {
            id,
            title: self.title.0,
            author_id: self.author_id.get(),
            publication_date: self.publication_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn valid_book() {
        let book = NewBook::new("Dune", 1, date(1965, 8, 1)).unwrap();
        assert_eq!(book.title.as_str(), "Dune");
        assert_eq!(book.author_id.get(), 1);
    }

    #[test]
    fn rejects_bad_author_id() {
        let err = NewBook::new("Dune", 0, date(1965, 8, 1)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFormat {
                field: "author_id",
                ..
            }
        ));
    }

    #[test]
    fn max_length() {
        assert!(BookTitle::new(&"t".repeat(200)).is_ok());
        assert!(matches!(
            BookTitle::new(&"t".repeat(201)).unwrap_err(),
            ValidationError::TooLong { max: 200, .. }
        ));
    }

    #[test]
    fn serializes_date_as_iso() {
        let book = NewBook::new("Dune", 3, date(1965, 8, 1))
            .unwrap()
            .into_book(9);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 9,
                "title": "Dune",
                "author_id": 3,
                "publication_date": "1965-08-01"
            })
        );
    }
}
