//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one pooled HTTP client and the record backend the `/api` forwarder
//! targets. Cloning is cheap; handlers share the same connection pool.

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    /// Backend base URL without trailing slash.
    pub backend_url: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(backend_url: &str) -> Self {
        Self { http: reqwest::Client::new(), backend_url: Arc::from(backend_url.trim_end_matches('/')) }
    }
}
