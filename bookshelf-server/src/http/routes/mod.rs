//! Route handlers organized by resource

pub mod authors;
pub mod books;
pub mod health;
