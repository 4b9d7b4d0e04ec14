//! GLEIF JSON → [`LegalEntityRecord`]
//!
//! Reads fields by JSON pointer rather than through strict serde structs so a
//! registry schema change degrades to absent fields instead of a failed
//! lookup. Only a payload that is not JSON at all is an error.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use super::types::{LegalEntityRecord, LeiCategory, LeiRegistrationStatus, LeiStatus};
use crate::error::AdaptError;

/// `data.type` of a published LEI record
pub const LEI_RECORD_TYPE: &str = "lei-records";

pub fn adapt_lei_record(response_json: &str) -> Result<LegalEntityRecord, AdaptError> {
    let node: Value = serde_json::from_str(response_json)?;

    Ok(LegalEntityRecord {
        lei: text_at(&node, "/data/attributes/lei"),
        entity_name: text_at(&node, "/data/attributes/entity/legalName/name"),
        entity_category: text_at(&node, "/data/attributes/entity/category")
            .and_then(|v| parse_enumerant(&v, "entity category", LeiCategory::parse)),
        entity_status: text_at(&node, "/data/attributes/entity/status")
            .and_then(|v| parse_enumerant(&v, "entity status", LeiStatus::parse))
            .unwrap_or(LeiStatus::Null),
        branch_entity_status: text_at(&node, "/data/attributes/branches/entityStatus")
            .and_then(|v| parse_enumerant(&v, "branch entity status", LeiStatus::parse))
            .unwrap_or(LeiStatus::Null),
        registration_status: text_at(&node, "/data/attributes/registration/status").and_then(
            |v| parse_enumerant(&v, "registration status", LeiRegistrationStatus::parse),
        ),
        registration_date: text_at(&node, "/data/attributes/registration/initialRegistrationDate")
            .and_then(|v| parse_timestamp(&v)),
        published: is_published(&node),
        lei_validation: None,
    })
}

/// Leaf value as text; missing, null, empty and non-scalar nodes are absent
fn text_at(node: &Value, pointer: &str) -> Option<String> {
    let text = match node.pointer(pointer)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn parse_enumerant<T>(value: &str, field: &'static str, parse: fn(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(value);
    if parsed.is_none() {
        tracing::warn!(field, value, "Unknown LEI enumerant received from GLEIF");
    }
    parsed
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!(value, error = %e, "Unparseable LEI registration date");
            None
        }
    }
}

/// Published iff the payload is a `lei-records` resource with an id and a self link
fn is_published(node: &Value) -> bool {
    text_at(node, "/data/type").is_some_and(|t| t == LEI_RECORD_TYPE)
        && text_at(node, "/data/id").is_some()
        && text_at(node, "/data/links/self").is_some()
}
