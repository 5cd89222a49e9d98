//! Application state shared across handlers

use std::sync::Arc;

use crate::db::Store;
use crate::http::auth::ApiKey;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn Store>,
    api_key: ApiKey,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, api_key: ApiKey) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, api_key }),
        }
    }

    /// Storage handle passed to every data-access call
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.inner.api_key
    }
}
