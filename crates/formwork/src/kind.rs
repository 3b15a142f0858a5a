//! Resource kinds served by the repository

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three independently addressable resource kinds.
///
/// Templates embed elements and fields, elements embed fields and further
/// elements, fields embed nothing. Embedding only exists at submission time;
/// after decomposition every child is its own resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Template,
    Element,
    Field,
}

impl ResourceKind {
    /// Value carried in a document's `@type` key for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            ResourceKind::Template => "Template",
            ResourceKind::Element => "Element",
            ResourceKind::Field => "Field",
        }
    }

    /// URL path segment used when minting identifiers and routing
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::Template => "templates",
            ResourceKind::Element => "elements",
            ResourceKind::Field => "fields",
        }
    }

    /// Child kinds that may appear embedded in a document of this kind,
    /// in the order the decomposition passes must run.
    ///
    /// Fields are extracted across the whole tree before elements so that
    /// every element body holds only field references by the time the
    /// element itself is persisted.
    pub fn embedded_kinds(&self) -> &'static [ResourceKind] {
        match self {
            ResourceKind::Template => &[ResourceKind::Field, ResourceKind::Element],
            ResourceKind::Element => &[ResourceKind::Field, ResourceKind::Element],
            ResourceKind::Field => &[],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
