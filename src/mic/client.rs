//! ISO 10383 dataset client

use std::sync::Arc;
use std::time::Duration;

use crate::config::RegistryConfig;
use crate::error::{MicLoadError, TransportError};
use crate::transport::{HttpTransport, ReqwestTransport};

#[derive(Clone)]
pub struct IsoMicClient {
    transport: Arc<dyn HttpTransport>,
    dataset_url: String,
    timeout: Duration,
}

impl IsoMicClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &RegistryConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            dataset_url: config.mic_dataset_url.clone(),
            timeout: config.timeout,
        }
    }

    /// Fetch the complete published list as raw XML
    pub async fn fetch_dataset(&self) -> Result<String, MicLoadError> {
        tracing::info!(url = %self.dataset_url, "Loading ISO10383_MIC data");

        let response = tokio::time::timeout(
            self.timeout,
            self.transport.get(&self.dataset_url, self.timeout),
        )
        .await
        .map_err(|_| TransportError::Timeout)??;

        tracing::debug!(status = response.status, bytes = response.body.len(), "Got MIC dataset response");

        if !response.is_success() {
            return Err(MicLoadError::Status(response.status));
        }
        Ok(response.body)
    }
}

impl std::fmt::Debug for IsoMicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsoMicClient")
            .field("dataset_url", &self.dataset_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
