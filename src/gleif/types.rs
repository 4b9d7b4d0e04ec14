//! LEI domain record and its enumerations
//!
//! Field set follows the GLEIF Level 1 `lei-records` resource, reduced to what
//! regulatory reporting consumes.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::policy::Enrichable;

/// Reference data for one legal entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalEntityRecord {
    pub lei: Option<String>,
    pub entity_name: Option<String>,
    pub entity_category: Option<LeiCategory>,
    /// Never absent: missing or unknown maps to [`LeiStatus::Null`]
    pub entity_status: LeiStatus,
    /// Never absent: missing or unknown maps to [`LeiStatus::Null`]
    pub branch_entity_status: LeiStatus,
    pub registration_status: Option<LeiRegistrationStatus>,
    pub registration_date: Option<DateTime<FixedOffset>>,
    pub published: bool,
    /// Enrichment toggle carried by pre-collected records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lei_validation: Option<bool>,
}

impl LegalEntityRecord {
    /// A pre-collected record carrying only its identifier
    pub fn with_lei(lei: impl Into<String>) -> Self {
        Self {
            lei: Some(lei.into()),
            ..Default::default()
        }
    }

    /// A record with no identifier, used as a global enable/disable marker
    pub fn marker(validation: bool) -> Self {
        Self {
            lei_validation: Some(validation),
            ..Default::default()
        }
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.lei_validation = Some(enabled);
        self
    }
}

impl Enrichable for LegalEntityRecord {
    fn identifier(&self) -> Option<&str> {
        self.lei.as_deref()
    }

    fn validation(&self) -> Option<bool> {
        self.lei_validation
    }
}

// =============================================================================
// Enumerations
// =============================================================================

/// GLEIF entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeiCategory {
    Branch,
    Fund,
    SoleProprietor,
    General,
    ResidentGovernmentEntity,
    InternationalOrganization,
}

impl LeiCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BRANCH" => Some(Self::Branch),
            "FUND" => Some(Self::Fund),
            "SOLE_PROPRIETOR" => Some(Self::SoleProprietor),
            "GENERAL" => Some(Self::General),
            "RESIDENT_GOVERNMENT_ENTITY" => Some(Self::ResidentGovernmentEntity),
            "INTERNATIONAL_ORGANIZATION" => Some(Self::InternationalOrganization),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Branch => "BRANCH",
            Self::Fund => "FUND",
            Self::SoleProprietor => "SOLE_PROPRIETOR",
            Self::General => "GENERAL",
            Self::ResidentGovernmentEntity => "RESIDENT_GOVERNMENT_ENTITY",
            Self::InternationalOrganization => "INTERNATIONAL_ORGANIZATION",
        }
    }
}

/// Entity / branch status. `Null` stands in for "not reported".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeiStatus {
    Active,
    Inactive,
    #[default]
    Null,
}

impl LeiStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "NULL" => Some(Self::Null),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Null => "NULL",
        }
    }
}

/// LEI registration status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeiRegistrationStatus {
    PendingValidation,
    Issued,
    Duplicate,
    Lapsed,
    Merged,
    Retired,
    Annulled,
    Cancelled,
    Transferred,
    PendingTransfer,
    PendingArchival,
}

impl LeiRegistrationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING_VALIDATION" => Some(Self::PendingValidation),
            "ISSUED" => Some(Self::Issued),
            "DUPLICATE" => Some(Self::Duplicate),
            "LAPSED" => Some(Self::Lapsed),
            "MERGED" => Some(Self::Merged),
            "RETIRED" => Some(Self::Retired),
            "ANNULLED" => Some(Self::Annulled),
            "CANCELLED" => Some(Self::Cancelled),
            "TRANSFERRED" => Some(Self::Transferred),
            "PENDING_TRANSFER" => Some(Self::PendingTransfer),
            "PENDING_ARCHIVAL" => Some(Self::PendingArchival),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingValidation => "PENDING_VALIDATION",
            Self::Issued => "ISSUED",
            Self::Duplicate => "DUPLICATE",
            Self::Lapsed => "LAPSED",
            Self::Merged => "MERGED",
            Self::Retired => "RETIRED",
            Self::Annulled => "ANNULLED",
            Self::Cancelled => "CANCELLED",
            Self::Transferred => "TRANSFERRED",
            Self::PendingTransfer => "PENDING_TRANSFER",
            Self::PendingArchival => "PENDING_ARCHIVAL",
        }
    }
}
