//! HTTP transport seam
//!
//! Registry clients never talk to `reqwest` directly; they go through
//! [`HttpTransport`] so a scripted transport can be swapped in.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::RegistryConfig;
use crate::error::TransportError;

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET. Non-2xx statuses are responses, not errors.
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

/// Pooled `reqwest` transport
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &RegistryConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
