//! Reference-data enrichment
//!
//! Resolves Legal Entity Identifiers against the GLEIF registry and Market
//! Identifier Codes against the ISO 10383 dataset, memoizes the outcomes, and
//! decides per candidate whether resolution should run at all given the
//! records already collected for a report.
//!
//! ```no_run
//! use refdata_enrichment::{LeiResolver, RegistryConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = RegistryConfig::from_env()?;
//! let resolver = LeiResolver::from_config(&config)?;
//! let record = resolver.resolve("529900W18LQJJN6SJ336").await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod eic;
pub mod error;
pub mod gleif;
pub mod mic;
pub mod policy;
pub mod telemetry;
pub mod transport;

pub use cache::{Eviction, MemoCache};
pub use config::RegistryConfig;
pub use eic::AcceptedEicCodes;
pub use error::{AdaptError, ConfigError, MicLoadError, TransportError};
pub use gleif::{is_valid_lei, GleifClient, LegalEntityRecord, LeiLookup, LeiResolver};
pub use mic::{IsoMicClient, MarketIdentifierRecord, MicResolver};
pub use policy::{EnrichmentPolicy, Enrichable, Resolver, ValidationMode};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
