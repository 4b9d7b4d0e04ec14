//! ISO 10383 market identifier record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::policy::Enrichable;

/// One entry of the published MIC list.
///
/// Text fields are trimmed and never hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketIdentifierRecord {
    pub mic: Option<String>,
    pub operating_mic: Option<String>,
    pub mic_type: Option<MicType>,
    pub name_institution_description: Option<String>,
    pub legal_entity_name: Option<String>,
    pub market_category: Option<MarketCategory>,
    pub acronym: Option<String>,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub website: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<NaiveDate>,
    pub last_update_date: Option<NaiveDate>,
    pub last_validation_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mic_validation: Option<bool>,
}

impl MarketIdentifierRecord {
    pub fn with_mic(mic: impl Into<String>) -> Self {
        Self {
            mic: Some(mic.into()),
            ..Default::default()
        }
    }

    /// A record with no identifier, used as a global enable/disable marker
    pub fn marker(validation: bool) -> Self {
        Self {
            mic_validation: Some(validation),
            ..Default::default()
        }
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.mic_validation = Some(enabled);
        self
    }

    pub fn is_operating(&self) -> bool {
        self.mic_type == Some(MicType::Oprt)
    }
}

impl Enrichable for MarketIdentifierRecord {
    fn identifier(&self) -> Option<&str> {
        self.mic.as_deref()
    }

    fn validation(&self) -> Option<bool> {
        self.mic_validation
    }
}

/// Operating MIC or market segment MIC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MicType {
    Oprt,
    Sgmt,
}

impl MicType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPRT" => Some(Self::Oprt),
            "SGMT" => Some(Self::Sgmt),
            _ => None,
        }
    }
}

/// ISO 10383 market category code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketCategory {
    /// Approved publication arrangement
    Appa,
    /// Approved reporting mechanism
    Arms,
    /// Alternative trading system
    Atss,
    /// Crypto asset services provider
    Casp,
    /// Designated contract market
    Dcms,
    /// Inter-dealer quotation system
    Idqs,
    /// Multilateral trading facility
    Mltf,
    /// No market category provided
    Nspd,
    /// Organised trading facility
    Otfs,
    Othr,
    /// Regulated market
    Rmkt,
    /// Recognised market operator
    Rmos,
    /// Swap execution facility
    Sefs,
    /// Systematic internaliser
    Sint,
    /// Trade reporting facility
    Trfs,
}

impl MarketCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "APPA" => Some(Self::Appa),
            "ARMS" => Some(Self::Arms),
            "ATSS" => Some(Self::Atss),
            "CASP" => Some(Self::Casp),
            "DCMS" => Some(Self::Dcms),
            "IDQS" => Some(Self::Idqs),
            "MLTF" => Some(Self::Mltf),
            "NSPD" => Some(Self::Nspd),
            "OTFS" => Some(Self::Otfs),
            "OTHR" => Some(Self::Othr),
            "RMKT" => Some(Self::Rmkt),
            "RMOS" => Some(Self::Rmos),
            "SEFS" => Some(Self::Sefs),
            "SINT" => Some(Self::Sint),
            "TRFS" => Some(Self::Trfs),
            _ => None,
        }
    }
}
