//! Author record and input validation

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::bounded_text;
use super::ValidationError;

/// Maximum length for author names (matches `authors.name VARCHAR(100)`)
const MAX_NAME_LEN: usize = 100;

/// Maximum length for nationalities (matches `authors.nationality VARCHAR(100)`)
const MAX_NATIONALITY_LEN: usize = 100;

/// Author record as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub nationality: String,
}

/// Validated author name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    /// Create a new author name.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 100 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "name", MAX_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated nationality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nationality(String);

impl Nationality {
    /// Same rules as [`AuthorName`].
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "nationality", MAX_NATIONALITY_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated input for create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: AuthorName,
    pub nationality: Nationality,
}

impl NewAuthor {
    pub fn new(name: &str, nationality: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: AuthorName::new(name)?,
            nationality: Nationality::new(nationality)?,
        })
    }

    /// Materialize the record once storage has assigned an id.
    pub fn into_author(self, id: i32) -> Author {
        Author {
            id,
            name: self.name.0,
            nationality: self.nationality.0,
        }
    }
}
