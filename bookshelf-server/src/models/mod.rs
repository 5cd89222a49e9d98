//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod author;
pub mod book;
pub mod validation;

pub use author::{Author, AuthorName, NewAuthor, Nationality};
pub use book::{Book, BookTitle, NewBook};
pub use validation::{EntityId, ValidationError};
