//! `/api/*` forwarding to the record backend.
//!
//! DESIGN
//! ======
//! The grid page fetches `/api/{resource}` from its own origin. Requests are
//! relayed with method, query string, `content-type` and body intact, and the
//! upstream status and body come back untouched so backend error payloads
//! such as `{"error": "Invalid field"}` reach the page as sent.
//!
//! ERROR HANDLING
//! ==============
//! An unreachable backend, or one that drops the body mid-stream, becomes
//! `502` with `{"error": "backend unavailable"}`.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::state::AppState;

pub const BACKEND_UNAVAILABLE: &str = "backend unavailable";

/// Upstream URL for `path` (without the `/api/` prefix) and an optional query.
#[must_use]
pub fn upstream_url(backend_url: &str, path: &str, query: Option<&str>) -> String {
    let base = format!("{}/api/{}", backend_url.trim_end_matches('/'), path.trim_start_matches('/'));
    match query {
        Some(q) if !q.is_empty() => format!("{base}?{q}"),
        _ => base,
    }
}

pub async fn forward(
    State(state): State<AppState>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = upstream_url(&state.backend_url, &path, uri.query());
    tracing::debug!(%method, %url, "forwarding");

    let mut request = state.http.request(method, &url);
    if let Some(content_type) = headers.get(CONTENT_TYPE) {
        request = request.header(CONTENT_TYPE, content_type.clone());
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = match request.send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::warn!(error = %e, %url, "backend request failed");
            return backend_unavailable();
        }
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, %url, "backend body read failed");
            return backend_unavailable();
        }
    };

    let mut response = (status, bytes).into_response();
    match content_type {
        Some(value) => {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    response
}

fn backend_unavailable() -> Response {
    (StatusCode::BAD_GATEWAY, Json(json!({ "error": BACKEND_UNAVAILABLE }))).into_response()
}
