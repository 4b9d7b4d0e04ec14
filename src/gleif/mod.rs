//! GLEIF (Global Legal Entity Identifier Foundation) integration
//!
//! This module provides:
//! - LEI format validation used as a fast-reject gate
//! - Client for fetching single LEI records from the GLEIF API
//! - Adaptor from the raw JSON payload to [`LegalEntityRecord`]
//! - Caching resolver that memoizes found and not-found outcomes

pub mod adaptor;
pub mod client;
pub mod resolver;
pub mod types;
pub mod validate;

pub use adaptor::adapt_lei_record;
pub use client::{GleifClient, LeiLookup};
pub use resolver::LeiResolver;
pub use types::*;
pub use validate::is_valid_lei;
