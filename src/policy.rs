//! Conditional enrichment policy
//!
//! Decides whether a resolver is consulted at all, given records that were
//! already collected for a report. The validation toggles carried by those
//! records are folded once into a [`ValidationMode`]; precedence is:
//!
//! 1. no candidate → nothing
//! 2. a record for the candidate with a toggle → that record (`true`) or nothing (`false`)
//! 3. any `false` toggle elsewhere in the sequence → nothing
//! 4. otherwise → resolve the candidate
//!
//! The same procedure serves LEI and MIC records through [`Enrichable`].

use async_trait::async_trait;

/// A record that can appear in the pre-collected sequence
pub trait Enrichable {
    fn identifier(&self) -> Option<&str>;
    fn validation(&self) -> Option<bool>;
}

/// Direct lookup by identifier
#[async_trait]
pub trait Resolver: Send + Sync {
    type Record: Enrichable + Clone + Send + Sync;
    type Error: Send;

    async fn resolve(&self, identifier: &str) -> Result<Option<Self::Record>, Self::Error>;
}

/// Validation configuration derived from the pre-collected records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMode {
    /// Resolve the candidate
    Enabled,
    /// A disabled marker suppresses enrichment for unmatched candidates
    Disabled,
    /// The record at `position` has the candidate's identifier and an explicit toggle
    PerRecordOverride { position: usize, enabled: bool },
}

impl ValidationMode {
    pub fn from_records<R: Enrichable>(existing: &[R], candidate: &str) -> Self {
        let matched = existing.iter().enumerate().find_map(|(position, record)| {
            match (record.identifier(), record.validation()) {
                (Some(id), Some(enabled)) if id == candidate => Some((position, enabled)),
                _ => None,
            }
        });

        if let Some((position, enabled)) = matched {
            return Self::PerRecordOverride { position, enabled };
        }

        if existing.iter().any(|r| r.validation() == Some(false)) {
            Self::Disabled
        } else {
            Self::Enabled
        }
    }
}

pub async fn decide<R: Resolver>(
    resolver: &R,
    existing: &[R::Record],
    candidate: Option<&str>,
) -> Result<Option<R::Record>, R::Error> {
    let Some(candidate) = candidate else {
        return Ok(None);
    };

    match ValidationMode::from_records(existing, candidate) {
        ValidationMode::PerRecordOverride {
            position,
            enabled: true,
        } => {
            tracing::debug!(candidate, "Using pre-enriched record");
            Ok(existing.get(position).cloned())
        }
        ValidationMode::PerRecordOverride { enabled: false, .. } => {
            tracing::debug!(candidate, "Validation disabled for identifier");
            Ok(None)
        }
        ValidationMode::Disabled => {
            tracing::debug!(candidate, "Validation disabled for report");
            Ok(None)
        }
        ValidationMode::Enabled => resolver.resolve(candidate).await,
    }
}

/// A resolver bound to the policy
pub struct EnrichmentPolicy<R> {
    resolver: R,
}

impl<R: Resolver> EnrichmentPolicy<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub async fn decide(
        &self,
        existing: &[R::Record],
        candidate: Option<&str>,
    ) -> Result<Option<R::Record>, R::Error> {
        decide(&self.resolver, existing, candidate).await
    }
}
