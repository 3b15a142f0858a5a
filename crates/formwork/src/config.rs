//! Repository configuration
//!
//! One immutable struct built at process start and passed by reference into
//! the mediator; the engine holds no process-wide mutable state.

use crate::kind::ResourceKind;
use serde::{Deserialize, Serialize};

/// Engine-level configuration shared by every resource kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base of every minted identifier, e.g. `https://repo.example.org`
    pub id_base: String,

    /// Page size applied when a listing request names none
    pub default_page_size: i64,

    /// Upper bound on the requested page size
    pub max_page_size: i64,

    /// Fields dropped from listings in the default projection mode
    pub excluded_list_fields: Vec<String>,

    /// Per-kind allow-lists for summary listings
    pub summary_fields: SummaryFields,
}

/// Summary allow-lists, one per resource kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryFields {
    pub template: Vec<String>,
    pub element: Vec<String>,
    pub field: Vec<String>,
}

impl SummaryFields {
    pub fn for_kind(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::Template => &self.template,
            ResourceKind::Element => &self.element,
            ResourceKind::Field => &self.field,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let summary = |extra: &[&str]| -> Vec<String> {
            ["@id", "@type", "title"]
                .iter()
                .chain(extra)
                .map(|s| s.to_string())
                .collect()
        };
        Self {
            id_base: "https://repo.example.org".to_string(),
            default_page_size: 50,
            max_page_size: 500,
            excluded_list_fields: vec!["properties".to_string()],
            summary_fields: SummaryFields {
                template: summary(&["description", "lastUpdatedOn"]),
                element: summary(&["description", "lastUpdatedOn"]),
                field: summary(&["lastUpdatedOn"]),
            },
        }
    }
}
