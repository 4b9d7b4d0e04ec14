//! Error types for reference-data resolution
//!
//! Only the MIC dataset load is fatal to a caller. Every LEI failure is folded
//! into an absent result by the resolver, so these types mostly travel between
//! the transport, client and adaptor layers.

use thiserror::Error;

/// Failure to complete an HTTP exchange with a registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Worker pool closed")]
    WorkerPoolClosed,
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

/// Failure to turn a registry payload into a domain record
#[derive(Error, Debug)]
pub enum AdaptError {
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid XML payload: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Invalid date '{value}' in field {field}")]
    InvalidDate { field: &'static str, value: String },
}

/// The MIC dataset could not be loaded. Never cached.
#[derive(Error, Debug)]
pub enum MicLoadError {
    #[error("MIC dataset transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("MIC dataset endpoint returned status {0}")]
    Status(u16),

    #[error("MIC dataset could not be adapted: {0}")]
    Adapt(#[from] AdaptError),
}

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
