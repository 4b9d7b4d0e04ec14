//! GLEIF API Client
//!
//! Fetches single LEI records. Concurrency is bounded by a semaphore acting as
//! the worker pool and every request carries a hard timeout. Outcomes are
//! returned as a [`LeiLookup`], never as an error.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::config::RegistryConfig;
use crate::error::TransportError;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Result of one registry exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeiLookup {
    /// 2xx with the raw JSON body
    Found(String),
    /// Registry answered 404
    NotFound,
    /// Any other non-2xx status
    ApiError { status: u16 },
    /// Timeout or connection-level failure
    Exception(TransportError),
}

#[derive(Clone)]
pub struct GleifClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    timeout: Duration,
    workers: Arc<Semaphore>,
}

impl GleifClient {
    /// Client over a pooled `reqwest` transport
    pub fn new(config: &RegistryConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &RegistryConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: config.gleif_base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            workers: Arc::new(Semaphore::new(config.worker_count.max(1))),
        }
    }

    pub fn record_url(&self, lei: &str) -> String {
        format!("{}/lei-records/{}", self.base_url, lei)
    }

    /// Fetch a single LEI record by LEI. The identifier is expected to be pre-validated.
    pub async fn fetch_lei_record(&self, lei: &str) -> LeiLookup {
        tracing::info!(lei, "Looking up LEI in GLEIF");

        let _permit = match self.workers.acquire().await {
            Ok(permit) => permit,
            Err(_) => return LeiLookup::Exception(TransportError::WorkerPoolClosed),
        };

        let url = self.record_url(lei);
        let response =
            match tokio::time::timeout(self.timeout, self.transport.get(&url, self.timeout)).await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => return LeiLookup::Exception(e),
                Err(_) => return LeiLookup::Exception(TransportError::Timeout),
            };

        tracing::debug!(lei, status = response.status, "Got response from GLEIF");

        match response.status {
            404 => LeiLookup::NotFound,
            _ if response.is_success() => LeiLookup::Found(response.body),
            status => LeiLookup::ApiError { status },
        }
    }
}

impl std::fmt::Debug for GleifClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GleifClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("available_workers", &self.workers.available_permits())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedTransport {
        result: Result<HttpResponse, TransportError>,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn get(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, TransportError> {
            self.urls.lock().unwrap().push(url.to_string());
            self.result.clone()
        }
    }

    fn client(result: Result<HttpResponse, TransportError>) -> (GleifClient, Arc<FixedTransport>) {
        let transport = Arc::new(FixedTransport {
            result,
            urls: Mutex::new(Vec::new()),
        });
        let client = GleifClient::with_transport(&RegistryConfig::default(), transport.clone());
        (client, transport)
    }

    #[tokio::test]
    async fn test_classifies_statuses() {
        let (c, transport) = client(Ok(HttpResponse::new(200, "{}")));
        assert_eq!(
            c.fetch_lei_record("529900W18LQJJN6SJ336").await,
            LeiLookup::Found("{}".to_string())
        );
        assert_eq!(
            transport.urls.lock().unwrap().as_slice(),
            ["https://api.gleif.org/api/v1/lei-records/529900W18LQJJN6SJ336"]
        );

        let (c, _) = client(Ok(HttpResponse::new(404, "")));
        assert_eq!(c.fetch_lei_record("529900W18LQJJN6SJ336").await, LeiLookup::NotFound);

        let (c, _) = client(Ok(HttpResponse::new(400, "bad request")));
        assert_eq!(
            c.fetch_lei_record("529900W18LQJJN6SJ336").await,
            LeiLookup::ApiError { status: 400 }
        );

        let (c, _) = client(Err(TransportError::Connect("refused".to_string())));
        assert_eq!(
            c.fetch_lei_record("529900W18LQJJN6SJ336").await,
            LeiLookup::Exception(TransportError::Connect("refused".to_string()))
        );
    }

    #[test]
    fn test_record_url_ignores_trailing_slash() {
        let config = RegistryConfig {
            gleif_base_url: "http://localhost:9000/api/v1/".to_string(),
            ..Default::default()
        };
        let (_, transport) = client(Ok(HttpResponse::new(200, "")));
        let c = GleifClient::with_transport(&config, transport);
        assert_eq!(
            c.record_url("5493001KJTIIGC8Y1R12"),
            "http://localhost:9000/api/v1/lei-records/5493001KJTIIGC8Y1R12"
        );
    }
}
