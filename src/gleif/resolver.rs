//! Caching LEI resolver
//!
//! validator → cache → client → adaptor. Every outcome of a registry call is
//! cached, including not-found and failures, so an identifier is queried at
//! most once for as long as its entry survives in the bounded cache.

use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;

use super::adaptor::adapt_lei_record;
use super::client::{GleifClient, LeiLookup};
use super::types::LegalEntityRecord;
use super::validate::is_valid_lei;
use crate::cache::MemoCache;
use crate::config::RegistryConfig;
use crate::error::TransportError;
use crate::policy::{self, Resolver};

pub struct LeiResolver {
    client: GleifClient,
    cache: MemoCache<String, Option<LegalEntityRecord>>,
}

impl LeiResolver {
    pub fn new(client: GleifClient, capacity: u64) -> Self {
        Self {
            client,
            cache: MemoCache::bounded(capacity),
        }
    }

    /// Resolver over the default `reqwest` transport
    pub fn from_config(config: &RegistryConfig) -> Result<Self, TransportError> {
        Ok(Self::new(GleifClient::new(config)?, config.lei_cache_capacity))
    }

    /// Seed the cache with raw registry payloads. `None` or unparseable
    /// payloads become negative entries; nothing touches the network.
    pub async fn with_preload(
        client: GleifClient,
        capacity: u64,
        preload: HashMap<String, Option<String>>,
    ) -> Self {
        let resolver = Self::new(client, capacity);
        for (lei, payload) in preload {
            let record = payload.as_deref().and_then(|json| adapt_or_log(&lei, json));
            resolver.cache.insert(lei, record).await;
        }
        resolver
    }

    /// Resolve an LEI, consulting the cache first.
    ///
    /// Malformed identifiers resolve to `None` without touching the cache or
    /// the network.
    pub async fn resolve(&self, lei: &str) -> Option<LegalEntityRecord> {
        if !is_valid_lei(lei) {
            tracing::debug!(lei, "Rejected malformed LEI");
            return None;
        }

        let record = self
            .cache
            .get_or_compute(lei.to_string(), self.fetch_uncached(lei))
            .await;

        if record.is_none() {
            tracing::debug!(lei, "LEI data not found");
        }
        record
    }

    /// Fetch and adapt without reading or writing the cache
    pub async fn fetch_uncached(&self, lei: &str) -> Option<LegalEntityRecord> {
        match self.client.fetch_lei_record(lei).await {
            LeiLookup::Found(body) => adapt_or_log(lei, &body),
            LeiLookup::NotFound => {
                tracing::warn!(lei, "LEI not found in GLEIF");
                None
            }
            LeiLookup::ApiError { status } => {
                tracing::error!(lei, status, "Got error code from GLEIF");
                None
            }
            LeiLookup::Exception(e) => {
                tracing::error!(lei, error = %e, "Exception occurred getting LEI record from GLEIF");
                None
            }
        }
    }

    /// Policy-gated resolution against previously collected records
    pub async fn decide(
        &self,
        existing: &[LegalEntityRecord],
        candidate: Option<&str>,
    ) -> Option<LegalEntityRecord> {
        match policy::decide(self, existing, candidate).await {
            Ok(record) => record,
            Err(never) => match never {},
        }
    }

    /// Whether an outcome (positive or negative) is cached for `lei`
    pub fn is_cached(&self, lei: &str) -> bool {
        self.cache.contains(lei)
    }

    pub async fn cached_entries(&self) -> u64 {
        self.cache.len().await
    }
}

#[async_trait]
impl Resolver for LeiResolver {
    type Record = LegalEntityRecord;
    type Error = Infallible;

    async fn resolve(&self, identifier: &str) -> Result<Option<LegalEntityRecord>, Infallible> {
        Ok(LeiResolver::resolve(self, identifier).await)
    }
}

fn adapt_or_log(lei: &str, json: &str) -> Option<LegalEntityRecord> {
    match adapt_lei_record(json) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::error!(lei, error = %e, "Error occurred parsing GLEIF JSON response");
            None
        }
    }
}
