//! `reqwest` transport for the grid controller.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use grid::{ApiRequest, ApiResponse, Method, Transport, TransportError};

/// Sends grid requests to `base_url`; relative grid URLs are joined onto it.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Absolute URL for `url`; absolute inputs pass through.
    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_owned()
        } else if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            format!("{}/{url}", self.base_url)
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.resolve(&request.url);
        tracing::debug!(method = %request.method, %url, "grid request");

        let builder = self.client.request(to_reqwest(request.method), &url);
        let builder = if let Some(json) = &request.body { builder.json(json) } else { builder };

        let response = builder.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;
        Ok(ApiResponse::new(status, body))
    }
}
