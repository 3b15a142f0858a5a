//! # Formwork
//!
//! The metadata engine of a template-authoring service. Nested template
//! documents are decomposed into independently persisted resources:
//!
//! - **Templates** embed **elements** and **fields**; elements embed fields
//!   and further elements
//! - Submitting a nested document extracts every embedded definition,
//!   persists it with a freshly minted `@id` (or a validated client-supplied
//!   one in import mode), and leaves an `{"@id"}` reference in the parent
//! - Every persisted document carries provenance (who created/updated it,
//!   and when)
//! - Listings are projected (summary allow-list, explicit field list, or
//!   default exclusion list) and paginated with navigation links
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use formwork::{Registry, ResourceKind, ServiceConfig, StoreSet};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::new(StoreSet::in_memory(), Arc::new(ServiceConfig::default()));
//!
//! // A template embedding one field definition
//! let template = json!({
//!     "@type": "Template",
//!     "title": "Person",
//!     "properties": {
//!         "name": {"@type": "Field", "title": "Name"}
//!     }
//! });
//!
//! let created = registry
//!     .create(ResourceKind::Template, template, false, "alice")
//!     .await?;
//!
//! // The field now lives as its own resource; the template references it
//! println!("created template {}", created["@id"]);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod decompose;
pub mod document;
pub mod error;
pub mod identifier;
pub mod kind;
pub mod links;
pub mod pagination;
pub mod projection;
pub mod provenance;
pub mod registry;
pub mod storage;

pub use auth::{Action, Authorizer, OpenAccess, Permission};
pub use config::ServiceConfig;
pub use error::{RepositoryError, Result};
pub use kind::ResourceKind;
pub use projection::FieldSelector;
pub use provenance::ProvenanceInfo;
pub use registry::{PageResult, Registry};
pub use storage::{DocumentStore, MemoryStore, StoreSet};
