//! Browser HTTP transport backed by `gloo-net`.
//!
//! Client-side (csr): real Fetch calls. Featureless builds (native unit
//! tests) keep the type but fail any attempted send, mirroring how the rest
//! of the browser glue degrades off-target.

use async_trait::async_trait;
use session::error::ApiError;
use session::http::{HttpRequest, HttpResponse, HttpSend, Method};

/// Transport that hands [`HttpRequest`]s to the browser Fetch API.
#[derive(Debug, Default)]
pub struct RestTransport;

impl RestTransport {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl HttpSend for RestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let builder = match request.method {
                Method::Get => gloo_net::http::Request::get(&request.url),
                Method::Post => gloo_net::http::Request::post(&request.url),
                Method::Put => gloo_net::http::Request::put(&request.url),
                Method::Delete => gloo_net::http::Request::delete(&request.url),
            };
            let builder = match &request.bearer {
                Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
                None => builder,
            };
            let sent = match &request.body {
                Some(body) => builder
                    .json(body)
                    .map_err(|e| ApiError::Network(e.to_string()))?
                    .send()
                    .await,
                None => builder.send().await,
            };
            let response = sent.map_err(|e| {
                leptos::logging::warn!("fetch failed for {}: {e}", request.url);
                ApiError::Network(e.to_string())
            })?;
            let status = response.status();
            // A body that cannot be read decodes like an empty body.
            let body = response.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Network("browser fetch is not available in this build".to_owned()))
        }
    }
}
