//! REST calls against the record backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend exposes `GET/POST /api/{resource}` and `PUT/DELETE
//! /api/{resource}/{id}`. Collections come wrapped as `{ "data": [...] }`;
//! rejected writes may carry `{ "error": "..." }`.
//!
//! DESIGN
//! ======
//! [`Transport`] is the only seam: it moves one request and hands back the
//! raw status and body. Everything that interprets a response (envelope
//! parsing, error extraction) lives here so it is shared by the browser
//! transport, the `reqwest` transport and the in-memory test backend.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::record::Record;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// HTTP verbs used by the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing call. `body` is sent as JSON when present.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into(), body: None }
    }

    #[must_use]
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Post, url: url.into(), body: Some(body) }
    }

    #[must_use]
    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Put, url: url.into(), body: Some(body) }
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self { method: Method::Delete, url: url.into(), body: None }
    }
}

/// Raw response as seen by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (DNS, refused connection, CORS, ...).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Moves one request to the backend.
///
/// Futures are not required to be `Send` so browser fetch futures qualify.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Send `request` and return the status and body text.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

// =============================================================================
// ERRORS
// =============================================================================

/// Failure of a backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network or transport failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The backend answered with a non-2xx status.
    #[error("rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
}

impl ApiError {
    /// Server-provided error message, if the rejection carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message: Some(m), .. } => Some(m),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e.0)
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<Value>,
}

/// Parse a collection body `{ "data": [ {...}, ... ] }`.
///
/// A missing or non-array `data` means no records; non-object elements are
/// skipped.
///
/// # Errors
///
/// Returns [`ApiError::Malformed`] when the body is not a JSON object.
pub fn parse_collection(body: &str) -> Result<Vec<Record>, ApiError> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    let Value::Array(items) = envelope.data else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect())
}

/// Extract a non-empty `error` string from a rejection body.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.error? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Turn a raw response into `Ok(body)` or a [`ApiError::Rejected`].
fn check_status(response: ApiResponse) -> Result<String, ApiError> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(ApiError::Rejected { status: response.status, message: error_message(&response.body) })
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Typed record operations over a [`Transport`].
#[derive(Clone, Debug)]
pub struct RecordClient<T> {
    transport: T,
}

impl<T: Transport> RecordClient<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// `GET url` and parse the `data` array.
    ///
    /// # Errors
    ///
    /// Transport failure, non-2xx status, or a body that is not a JSON object.
    pub async fn fetch_records(&self, url: &str) -> Result<Vec<Record>, ApiError> {
        let response = self.transport.send(ApiRequest::get(url)).await?;
        let body = check_status(response)?;
        parse_collection(&body)
    }

    /// Send a write request; any 2xx counts as success and the body is ignored.
    ///
    /// # Errors
    ///
    /// Transport failure or non-2xx status.
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        let response = self.transport.send(request).await?;
        check_status(response).map(drop)
    }
}
