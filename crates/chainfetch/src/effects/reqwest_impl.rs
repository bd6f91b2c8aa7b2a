use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::data::{RequestOptions, Response};
use crate::effects::Transport;
use crate::error::BoxError;

/// Production transport implementation using `reqwest`.
///
/// Uses the `method`, `headers` and `body` options; header values that are
/// not strings are skipped. Other options are ignored.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest::Client`.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. one with timeouts or a proxy.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Response, BoxError> {
        let method = match options.method() {
            Some(method) => Method::from_bytes(method.to_ascii_uppercase().as_bytes())?,
            None => Method::GET,
        };
        trace!(target: "chainfetch::reqwest", %method, url, "building request");

        let mut request = self.client.request(method, url);

        if let Some(headers) = options.headers() {
            for (name, value) in headers {
                if let JsonValue::String(value) = value {
                    request = request.header(name.as_str(), value.as_str());
                }
            }
        }
        if let Some(body) = options.body() {
            request = request.body(body.to_owned());
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_owned(), value.to_owned()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(Response::new(status, body).with_headers(headers))
    }
}
