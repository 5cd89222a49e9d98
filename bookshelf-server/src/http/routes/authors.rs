//! Author endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::models::{Author, Book, NewAuthor};
use crate::state::AppState;

/// Create/update author request
#[derive(Debug, Deserialize)]
pub struct AuthorRequest {
    pub name: String,
    pub nationality: String,
}

impl AuthorRequest {
    fn validate(&self) -> Result<NewAuthor, ApiError> {
        Ok(NewAuthor::new(&self.name, &self.nationality)?)
    }
}

/// GET /authors - list all authors
async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<Author>>, ApiError> {
    Ok(Json(state.store().list_authors().await?))
}

/// POST /authors - create a new author
async fn create_author(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AuthorRequest>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    let author = state.store().create_author(req.validate()?).await?;
    tracing::info!(author_id = author.id, "author created");

    Ok((StatusCode::CREATED, Json(author)))
}

/// GET /authors/{id} - get a single author
async fn get_author(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Author>, ApiError> {
    state
        .store()
        .get_author(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("author", id))
}

/// PUT /authors/{id} - overwrite name and nationality
async fn update_author(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<AuthorRequest>,
) -> Result<Json<Author>, ApiError> {
    let author = req.validate()?;
    state
        .store()
        .update_author(id, author)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("author", id))
}

/// DELETE /authors/{id} - delete and return the removed author
async fn delete_author(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Author>, ApiError> {
    let author = state
        .store()
        .delete_author(id)
        .await?
        .ok_or_else(|| ApiError::not_found("author", id))?;
    tracing::info!(author_id = author.id, "author deleted");

    Ok(Json(author))
}

/// GET /authors/{id}/books - books written by an author
async fn list_author_books(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Vec<Book>>, ApiError> {
    state
        .store()
        .list_books_by_author(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("author", id))
}

/// Author routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
        .route("/authors/{id}/books", get(list_author_books))
}
