//! Query parameter types for the resource endpoints

use serde::Deserialize;

/// Query parameters accepted by listing endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,

    pub offset: Option<i64>,

    pub summary: Option<bool>,

    /// Comma-separated explicit projection list
    #[serde(rename = "fieldNames")]
    pub field_names: Option<String>,
}

/// Query parameters accepted by create endpoints
#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    /// When set, client-supplied identifiers are authoritative
    #[serde(rename = "importMode")]
    pub import_mode: Option<bool>,
}
