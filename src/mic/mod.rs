//! ISO 10383 Market Identifier Code integration
//!
//! The registry publishes the full MIC list as one XML document. It is loaded
//! once per process on first lookup and served from memory afterwards.

pub mod adaptor;
pub mod client;
pub mod resolver;
pub mod types;

pub use adaptor::{adapt_mic_dataset, parse_dataset};
pub use client::IsoMicClient;
pub use resolver::MicResolver;
pub use types::*;
