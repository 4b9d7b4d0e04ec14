//! ISO10383_MIC.xml → [`MarketIdentifierRecord`]
//!
//! The published document is an Access-style export: a `dataroot` holding one
//! `ISO10383_MIC` element per code, with spaces and punctuation in column
//! names escaped as `_xHHHH_`.

use chrono::NaiveDate;
use serde::Deserialize;

use super::types::{MarketCategory, MarketIdentifierRecord, MicType};
use crate::error::AdaptError;

/// Dates are published in ISO basic format
const BASIC_ISO_DATE: &str = "%Y%m%d";

#[derive(Debug, Default, Deserialize)]
pub struct Dataroot {
    #[serde(rename = "ISO10383_MIC", default)]
    pub entries: Vec<Iso10383Mic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Iso10383Mic {
    #[serde(rename = "MIC")]
    pub mic: Option<String>,
    #[serde(rename = "OPERATING_x0020_MIC")]
    pub operating_mic: Option<String>,
    #[serde(rename = "OPRT_x002F_SGMT")]
    pub oprt_sgmt: Option<String>,
    #[serde(rename = "MARKET_x0020_NAME-INSTITUTION_x0020_DESCRIPTION")]
    pub market_name_institution_description: Option<String>,
    #[serde(rename = "LEGAL_x0020_ENTITY_x0020_NAME")]
    pub legal_entity_name: Option<String>,
    #[serde(rename = "LEI")]
    pub lei: Option<String>,
    #[serde(rename = "MARKET_x0020_CATEGORY_x0020_CODE")]
    pub market_category_code: Option<String>,
    #[serde(rename = "ACRONYM")]
    pub acronym: Option<String>,
    #[serde(rename = "ISO_x0020_COUNTRY_x0020_CODE_x0020__x0028_ISO_x0020_3166_x0029_")]
    pub iso_country_code: Option<String>,
    #[serde(rename = "CITY")]
    pub city: Option<String>,
    #[serde(rename = "WEBSITE")]
    pub website: Option<String>,
    #[serde(rename = "STATUS")]
    pub status: Option<String>,
    #[serde(rename = "CREATION_x0020_DATE")]
    pub creation_date: Option<String>,
    #[serde(rename = "LAST_x0020_UPDATE_x0020_DATE")]
    pub last_update_date: Option<String>,
    #[serde(rename = "LAST_x0020_VALIDATION_x0020_DATE")]
    pub last_validation_date: Option<String>,
    #[serde(rename = "EXPIRY_x0020_DATE")]
    pub expiry_date: Option<String>,
    #[serde(rename = "COMMENTS")]
    pub comments: Option<String>,
}

/// Deserialize the whole document. Line breaks and tabs are stripped first.
pub fn parse_dataset(xml: &str) -> Result<Dataroot, AdaptError> {
    let flattened = xml.replace(['\n', '\t'], "");
    Ok(quick_xml::de::from_str(&flattened)?)
}

/// Parse and map every entry; any malformed date fails the whole dataset
pub fn adapt_mic_dataset(xml: &str) -> Result<Vec<MarketIdentifierRecord>, AdaptError> {
    parse_dataset(xml)?
        .entries
        .into_iter()
        .map(adapt_mic_entry)
        .collect()
}

pub fn adapt_mic_entry(entry: Iso10383Mic) -> Result<MarketIdentifierRecord, AdaptError> {
    let mic_type = trimmed(entry.oprt_sgmt).and_then(|v| {
        let parsed = MicType::parse(&v);
        if parsed.is_none() {
            tracing::warn!(value = %v, "Unknown MIC type received");
        }
        parsed
    });
    let market_category = trimmed(entry.market_category_code).and_then(|v| {
        let parsed = MarketCategory::parse(&v);
        if parsed.is_none() {
            tracing::warn!(value = %v, "Unknown MIC market category received");
        }
        parsed
    });

    Ok(MarketIdentifierRecord {
        mic: trimmed(entry.mic),
        operating_mic: trimmed(entry.operating_mic),
        mic_type,
        name_institution_description: trimmed(entry.market_name_institution_description),
        legal_entity_name: trimmed(entry.legal_entity_name),
        market_category,
        acronym: trimmed(entry.acronym),
        country_code: trimmed(entry.iso_country_code),
        city: trimmed(entry.city),
        website: trimmed(entry.website),
        status: trimmed(entry.status),
        creation_date: parse_date("CREATION DATE", entry.creation_date)?,
        last_update_date: parse_date("LAST UPDATE DATE", entry.last_update_date)?,
        last_validation_date: parse_date("LAST VALIDATION DATE", entry.last_validation_date)?,
        expiry_date: parse_date("EXPIRY DATE", entry.expiry_date)?,
        mic_validation: None,
    })
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date(field: &'static str, value: Option<String>) -> Result<Option<NaiveDate>, AdaptError> {
    let Some(value) = trimmed(value) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&value, BASIC_ISO_DATE)
        .map(Some)
        .map_err(|_| AdaptError::InvalidDate { field, value })
}
