//! MIC resolver over an eagerly loaded, never evicted dataset

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::adaptor::adapt_mic_dataset;
use super::client::IsoMicClient;
use super::types::MarketIdentifierRecord;
use crate::cache::MemoCache;
use crate::config::RegistryConfig;
use crate::error::{MicLoadError, TransportError};
use crate::policy::{self, Resolver};

pub struct MicResolver {
    client: IsoMicClient,
    cache: MemoCache<String, MarketIdentifierRecord>,
    /// Set once the whole dataset is in `cache`; unset after a failed load
    loaded: OnceCell<()>,
}

impl MicResolver {
    pub fn new(client: IsoMicClient) -> Self {
        Self {
            client,
            cache: MemoCache::unbounded(),
            loaded: OnceCell::new(),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, TransportError> {
        Ok(Self::new(IsoMicClient::new(config)?))
    }

    /// Look up a MIC, loading the full dataset first if the cache is empty.
    ///
    /// A failed load is returned to the caller and not remembered; the next
    /// call tries again.
    pub async fn resolve(&self, mic: &str) -> Result<Option<MarketIdentifierRecord>, MicLoadError> {
        self.ensure_loaded().await?;

        let record = self.cache.get(mic).await;
        tracing::info!(mic, found = record.is_some(), "Looked up MIC");
        Ok(record)
    }

    pub async fn decide(
        &self,
        existing: &[MarketIdentifierRecord],
        candidate: Option<&str>,
    ) -> Result<Option<MarketIdentifierRecord>, MicLoadError> {
        policy::decide(self, existing, candidate).await
    }

    pub fn is_cached(&self, mic: &str) -> bool {
        self.cache.contains(mic)
    }

    pub async fn cached_entries(&self) -> u64 {
        self.cache.len().await
    }

    /// Callers arriving while a load runs wait for it to finish
    async fn ensure_loaded(&self) -> Result<(), MicLoadError> {
        self.loaded.get_or_try_init(|| self.load()).await?;
        Ok(())
    }

    async fn load(&self) -> Result<(), MicLoadError> {
        let body = self.client.fetch_dataset().await.inspect_err(|e| {
            tracing::error!(error = %e, "Exception occurred getting ISO10383_MIC data");
        })?;
        let records = adapt_mic_dataset(&body).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to adapt ISO10383_MIC data");
        })?;

        let total = records.len();
        for record in records {
            match record.mic.clone() {
                Some(mic) => self.cache.insert(mic, record).await,
                None => tracing::warn!(?record, "Skipping MIC entry without a code"),
            }
        }

        let cached = self.cache.len().await;
        tracing::info!(records = total, cached, "Loaded ISO10383_MIC data");
        Ok(())
    }
}

#[async_trait]
impl Resolver for MicResolver {
    type Record = MarketIdentifierRecord;
    type Error = MicLoadError;

    async fn resolve(&self, identifier: &str) -> Result<Option<MarketIdentifierRecord>, MicLoadError> {
        MicResolver::resolve(self, identifier).await
    }
}
