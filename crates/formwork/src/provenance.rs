//! Provenance metadata stamped onto every persisted document

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Document key for the creating principal
pub const CREATED_BY: &str = "createdBy";
/// Document key for the creation timestamp
pub const CREATED_ON: &str = "createdOn";
/// Document key for the last modifying principal
pub const LAST_UPDATED_BY: &str = "lastUpdatedBy";
/// Document key for the last modification timestamp
pub const LAST_UPDATED_ON: &str = "lastUpdatedOn";

/// Actor and timestamp metadata for one repository operation.
///
/// Built once per request from the acting principal and the current time;
/// every document touched by that request gets the same stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvenanceInfo {
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
    pub last_updated_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated_on: OffsetDateTime,
}

impl ProvenanceInfo {
    /// Build provenance for one operation acted by `principal` at `now`
    pub fn new(principal: impl Into<String>, now: OffsetDateTime) -> Self {
        let principal = principal.into();
        Self {
            created_by: principal.clone(),
            created_on: now,
            last_updated_by: principal,
            last_updated_on: now,
        }
    }
}

/// Set all four provenance fields for a freshly created document
pub fn stamp_create(doc: &mut Value, pi: &ProvenanceInfo) -> Result<()> {
    if let Value::Object(map) = doc {
        map.insert(CREATED_BY.into(), Value::String(pi.created_by.clone()));
        map.insert(CREATED_ON.into(), Value::String(pi.created_on.format(&Rfc3339)?));
        map.insert(LAST_UPDATED_BY.into(), Value::String(pi.last_updated_by.clone()));
        map.insert(
            LAST_UPDATED_ON.into(),
            Value::String(pi.last_updated_on.format(&Rfc3339)?),
        );
    }
    Ok(())
}

/// Patch the modification fields, leaving creation fields untouched.
///
/// Historical documents missing `createdBy`/`createdOn` get them filled from
/// the same stamp so every stored document ends up fully attributed.
pub fn stamp_update(doc: &mut Value, pi: &ProvenanceInfo) -> Result<()> {
    if let Value::Object(map) = doc {
        if !map.contains_key(CREATED_BY) {
            map.insert(CREATED_BY.into(), Value::String(pi.created_by.clone()));
        }
        if !map.contains_key(CREATED_ON) {
            map.insert(CREATED_ON.into(), Value::String(pi.created_on.format(&Rfc3339)?));
        }
        map.insert(LAST_UPDATED_BY.into(), Value::String(pi.last_updated_by.clone()));
        map.insert(
            LAST_UPDATED_ON.into(),
            Value::String(pi.last_updated_on.format(&Rfc3339)?),
        );
    }
    Ok(())
}
