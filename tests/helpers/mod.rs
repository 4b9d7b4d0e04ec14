//! Scripted HTTP transport shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use refdata_enrichment::{HttpResponse, HttpTransport, RegistryConfig, TransportError};

pub const GLEIF_BASE: &str = "http://gleif.test/api/v1";
pub const MIC_DATASET: &str = "http://iso.test/ISO10383_MIC.xml";

/// Serves canned responses by URL (falling back to a default) and counts calls
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, Result<HttpResponse, TransportError>>>,
    fallback: Mutex<Result<HttpResponse, TransportError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn always(result: Result<HttpResponse, TransportError>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(HashMap::new()),
            fallback: Mutex::new(result),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn status(status: u16, body: impl Into<String>) -> Arc<Self> {
        Self::always(Ok(HttpResponse::new(status, body)))
    }

    pub fn delayed(delay: Duration, result: Result<HttpResponse, TransportError>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(HashMap::new()),
            fallback: Mutex::new(result),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn respond(&self, url: impl Into<String>, result: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().insert(url.into(), result);
    }

    /// Replace the default response for later calls
    pub fn set_fallback(&self, result: Result<HttpResponse, TransportError>) {
        *self.fallback.lock().unwrap() = result;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(result) = self.responses.lock().unwrap().get(url) {
            return result.clone();
        }
        self.fallback.lock().unwrap().clone()
    }
}

pub fn test_config() -> RegistryConfig {
    RegistryConfig {
        gleif_base_url: GLEIF_BASE.to_string(),
        mic_dataset_url: MIC_DATASET.to_string(),
        ..Default::default()
    }
}

pub fn fixture(name: &str) -> String {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name]
        .iter()
        .collect();
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

pub fn lei_url(lei: &str) -> String {
    format!("{GLEIF_BASE}/lei-records/{lei}")
}
