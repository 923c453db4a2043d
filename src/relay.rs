//! HTTP client for the download relay.
//!
//! The relay is an external service that performs the actual remote fetch
//! and streams the bytes back. The contract is a single `POST` to a fixed
//! endpoint with a JSON body naming the action and the source URL; the
//! response body is the file content.

use std::time::Duration;

use bytes::Bytes;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use serde::Serialize;

use crate::error::{Error, Result};

/// JSON body sent to the relay endpoint.
#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    action: &'static str,
    url: &'a str,
}

/// A successfully opened relay response.
pub struct RelayResponse {
    /// Declared body length, when the relay sent a positive `Content-Length`.
    pub total: Option<u64>,
    /// The streaming response body.
    pub stream: BoxStream<'static, Result<Bytes>>,
}

impl std::fmt::Debug for RelayResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayResponse")
            .field("total", &self.total)
            .field("stream", &"<stream>")
            .finish()
    }
}

/// Client for the relay's request/response contract.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    /// Creates a relay client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(build_http_client()?, endpoint))
    }

    /// Creates a relay client reusing an existing HTTP client.
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the configured relay endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Asks the relay to download `url` and returns the streaming body.
    ///
    /// A `Content-Length` of zero, or none at all, yields an unknown total;
    /// progress percentages are only meaningful for positive declared sizes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Status`] for any non-success HTTP status, or
    /// [`Error::Http`] for transport failures. No retry is attempted.
    pub async fn fetch(&self, url: &str) -> Result<RelayResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&RelayRequest {
                action: "download",
                url,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let total = response.content_length().filter(|&len| len > 0);
        let stream = response.bytes_stream().map_err(Error::Http);

        Ok(RelayResponse {
            total,
            stream: Box::pin(stream),
        })
    }
}

/// Builds a configured HTTP client for relay requests.
fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(60))
        .pool_max_idle_per_host(8)
        .tcp_keepalive(Duration::from_secs(30))
        .build()
}
