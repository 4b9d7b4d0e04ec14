//! Registry client configuration
//!
//! Explicit construction parameters for the registry clients and caches.
//! There is no global transport: callers build a [`RegistryConfig`] (usually
//! via [`RegistryConfig::from_env`]) and pass it to the client constructors.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_GLEIF_API_BASE: &str = "https://api.gleif.org/api/v1";
pub const DEFAULT_MIC_DATASET_URL: &str =
    "https://www.iso20022.org/sites/default/files/ISO10383_MIC/ISO10383_MIC.xml";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_WORKER_COUNT: usize = 3;
const DEFAULT_LEI_CACHE_CAPACITY: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Per-request timeout for every registry call
    pub timeout: Duration,
    /// Maximum number of LEI requests in flight at once
    pub worker_count: usize,
    pub gleif_base_url: String,
    pub mic_dataset_url: String,
    /// Size bound of the LEI cache (negative entries included)
    pub lei_cache_capacity: u64,
    /// Accepted EIC code list, one code per line
    pub accepted_eic_codes_path: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            worker_count: DEFAULT_WORKER_COUNT,
            gleif_base_url: DEFAULT_GLEIF_API_BASE.to_string(),
            mic_dataset_url: DEFAULT_MIC_DATASET_URL.to_string(),
            lei_cache_capacity: DEFAULT_LEI_CACHE_CAPACITY,
            accepted_eic_codes_path: None,
        }
    }
}

impl RegistryConfig {
    /// Create from environment variables, falling back to defaults for unset keys
    ///
    /// * `REFDATA_HTTP_TIMEOUT_SECS`
    /// * `REFDATA_WORKER_COUNT`
    /// * `GLEIF_API_BASE`
    /// * `ISO_MIC_DATASET_URL`
    /// * `LEI_CACHE_CAPACITY`
    /// * `ACCEPTED_EIC_CODES_PATH`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout = match lookup("REFDATA_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_positive("REFDATA_HTTP_TIMEOUT_SECS", &raw)?),
            None => defaults.timeout,
        };
        let worker_count = match lookup("REFDATA_WORKER_COUNT") {
            Some(raw) => parse_positive("REFDATA_WORKER_COUNT", &raw)?,
            None => defaults.worker_count,
        };
        let lei_cache_capacity = match lookup("LEI_CACHE_CAPACITY") {
            Some(raw) => parse_positive("LEI_CACHE_CAPACITY", &raw)?,
            None => defaults.lei_cache_capacity,
        };
        let gleif_base_url = match lookup("GLEIF_API_BASE") {
            Some(raw) => parse_url("GLEIF_API_BASE", &raw)?,
            None => defaults.gleif_base_url,
        };
        let mic_dataset_url = match lookup("ISO_MIC_DATASET_URL") {
            Some(raw) => parse_url("ISO_MIC_DATASET_URL", &raw)?,
            None => defaults.mic_dataset_url,
        };
        let accepted_eic_codes_path = lookup("ACCEPTED_EIC_CODES_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            timeout,
            worker_count,
            gleif_base_url,
            mic_dataset_url,
            lei_cache_capacity,
            accepted_eic_codes_path,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_lei_cache_capacity(mut self, capacity: u64) -> Self {
        self.lei_cache_capacity = capacity;
        self
    }

    pub fn with_accepted_eic_codes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.accepted_eic_codes_path = Some(path.into());
        self
    }
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn parse_url(key: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    Url::parse(trimmed).map_err(|e| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.trim_end_matches('/').to_string())
}
