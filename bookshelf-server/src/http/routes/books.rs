//! Book endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::models::{Book, NewBook, ValidationError};
use crate::state::AppState;

/// Create/update book request
///
/// `publication_date` is `YYYY-MM-DD`. Create falls back to today's date;
/// update requires it.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author_id: i64,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
}

impl BookRequest {
    fn validate(&self, publication_date: NaiveDate) -> Result<NewBook, ApiError> {
        Ok(NewBook::new(&self.title, self.author_id, publication_date)?)
    }
}

/// GET /books - list all books
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.store().list_books().await?))
}

/// POST /books - create a new book
async fn create_book(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<BookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let date = req
        .publication_date
        .unwrap_or_else(|| Local::now().date_naive());
    let book = state.store().create_book(req.validate(date)?).await?;
    tracing::info!(book_id = book.id, author_id = book.author_id, "book created");

    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /books/{id} - get a single book
async fn get_book(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Book>, ApiError> {
    state
        .store()
        .get_book(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("book", id))
}

/// PUT /books/{id} - overwrite all fields
async fn update_book(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<BookRequest>,
) -> Result<Json<Book>, ApiError> {
    let date = req.publication_date.ok_or(ValidationError::Empty {
        field: "publication_date",
    })?;
    let book = req.validate(date)?;

    state
        .store()
        .update_book(id, book)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("book", id))
}

/// DELETE /books/{id} - delete and return the removed book
async fn delete_book(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .store()
        .delete_book(id)
        .await?
        .ok_or_else(|| ApiError::not_found("book", id))?;
    tracing::info!(book_id = book.id, "book deleted");

    Ok(Json(book))
}

/// Book routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
}
