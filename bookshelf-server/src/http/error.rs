//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::{EntityId, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body or path could not be parsed (400)
    BadRequest { message: String },

    /// Missing or wrong API key (403, fixed body)
    Forbidden,

    /// Resource not found (404)
    NotFound { resource: &'static str, id: EntityId },

    /// Operation blocked by dependent rows (409)
    Conflict { message: String },

    /// Reference to a row that does not exist (422)
    Integrity { message: String },

    /// Storage error (500, logged)
    Database(StoreError),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: EntityId) -> Self {
        Self::NotFound { resource, id }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({
                    "status": false,
                    "status_code": StatusCode::FORBIDDEN.as_u16(),
                    "message": "Unauthorized"
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} {} not found", resource, id)
                }),
            ),
            Self::Conflict { message } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": message
                }),
            ),
            Self::Integrity { message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "integrity_error",
                    "message": message
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownAuthor { .. } => Self::Integrity {
                message: e.to_string(),
            },
            StoreError::AuthorHasBooks { .. } => Self::Conflict {
                message: e.to_string(),
            },
            StoreError::Sqlx(_) | StoreError::IdsExhausted { .. } => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::not_found("author", EntityId::new(3, "id").unwrap());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "author 3 not found");
    }

    #[tokio::test]
    async fn forbidden_has_fixed_body() {
        let response = ApiError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await,
            json!({"status": false, "status_code": 403, "message": "Unauthorized"})
        );
    }

    #[tokio::test]
    async fn store_errors_map_to_status() {
        let unknown: ApiError = StoreError::UnknownAuthor { author_id: 5 }.into();
        assert_eq!(
            unknown.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let blocked: ApiError = StoreError::AuthorHasBooks {
            author_id: 5,
            books: 2,
        }
        .into();
        let response = blocked.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await["message"],
            "author 5 still has 2 book(s)"
        );

        for err in [
            StoreError::Sqlx(sqlx::Error::PoolTimedOut),
            StoreError::IdsExhausted { table: "books" },
        ] {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body_json(response).await["message"],
                "an internal error occurred"
            );
        }
    }
}
