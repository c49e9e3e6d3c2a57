//! HTTP transport used by the API client.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use super::{ApiRequest, RawOutcome, RawResponse, TransportError};

/// HTTP request timeout in seconds.
/// Applied to every request; an expired request surfaces as a transport error.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Sends a fully prepared request and reports what came back.
///
/// Implementations never interpret status codes; that is the job of the
/// client's refresh and normalization stages.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> RawOutcome;
}

/// `Transport` backed by reqwest, resolving every path against one base URL.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(REQUEST_TIMEOUT_SECS)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> RawOutcome {
        let url = self.url(request.path());

        let mut builder = self
            .client
            .request(request.method().clone(), &url)
            .header(header::ACCEPT, "application/json");

        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        if let Some(token) = request.bearer() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(Self::classify)?;
        let status = response.status();
        let body = response.text().await.map_err(Self::classify)?;

        debug!(
            method = %request.method(),
            path = request.path(),
            status = status.as_u16(),
            "Response received"
        );

        Ok(RawResponse { status, body })
    }
}
