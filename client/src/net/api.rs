//! Browser HTTP transport for the grid's REST calls.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every request fails with a transport error, which the
//! grid loaders turn into an empty table until the page hydrates.
//!
//! ERROR HANDLING
//! ==============
//! Network and body-read failures become [`TransportError`]; status codes are
//! passed through untouched so the grid can read `{"error": ...}` bodies.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use grid::{ApiRequest, ApiResponse, Transport, TransportError};

/// [`Transport`] backed by the browser's `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(any(test, not(feature = "hydrate")))]
fn unavailable_message(request: &ApiRequest) -> String {
    format!("{} {} is only available in the browser", request.method, request.url)
}

#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;
            use grid::Method;

            let builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            let outgoing = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError(e.to_string()))?;
            let resp = outgoing.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(ApiResponse::new(status, body))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(TransportError(unavailable_message(&request)))
        }
    }
}
