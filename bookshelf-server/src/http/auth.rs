//! Static API-key gate
//!
//! Protected routes require the `x-api-key` header to equal the configured
//! secret. Anything else is answered with the fixed 403 body before the
//! handler runs.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use super::error::ApiError;
use crate::config::ConfigError;
use crate::state::AppState;

/// Header carrying the key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Process-wide shared secret
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    /// # Errors
    ///
    /// Rejects an empty key, which would otherwise match a blank header.
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(Arc::from(secret)))
    }

    /// Exact comparison, constant time in the key length.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

// Keep the secret out of logs
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Middleware rejecting requests without the right key
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    let header_present = provided.is_some();
    let authorized = provided.is_some_and(|key| state.api_key().matches(key));

    if !authorized {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            header_present,
            "rejected request with invalid API key"
        );
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let key = ApiKey::new("s3cret").unwrap();
        assert!(key.matches("s3cret"));
        assert!(!key.matches("s3cre"));
        assert!(!key.matches("s3cret "));
        assert!(!key.matches("S3CRET"));
        assert!(!key.matches(""));
    }

    #[test]
    fn empty_key_rejected() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn debug_hides_secret() {
        let key = ApiKey::new("s3cret").unwrap();
        assert!(!format!("{:?}", key).contains("s3cret"));
    }
}
