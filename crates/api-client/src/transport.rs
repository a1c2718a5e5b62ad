//! HTTP transport
//!
//! The [`Transport`] trait is the seam between the pipeline and the network.
//! [`ReqwestTransport`] is the production implementation; any completed HTTP
//! exchange, whatever its status, comes back as a [`ResponseEnvelope`].

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{Headers, RequestDescriptor};
use crate::response::ResponseEnvelope;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Performs one HTTP exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request`; fails only when no HTTP exchange completed
    async fn execute(&self, request: &RequestDescriptor) -> ApiResult<ResponseEnvelope>;
}

/// `reqwest`-backed transport with a shared connection pool
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl ReqwestTransport {
    /// Build a transport for `config`
    pub fn new(config: Arc<ClientConfig>) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&config.user_agent) {
            default_headers.insert(USER_AGENT, value);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { inner, config })
    }

    /// Timeout enforced on every exchange
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    fn map_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else {
            ApiError::from(err)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &RequestDescriptor) -> ApiResult<ResponseEnvelope> {
        let url = self.config.url_for(&request.path);
        let mut builder = self.inner.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        let url = response.url().to_string();
        let headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        debug!(status = status.as_u16(), url = %url, "Exchange completed");

        Ok(ResponseEnvelope {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
            url,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}
