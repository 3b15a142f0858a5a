//! Storage abstraction for resource documents
//!
//! The engine treats persistence as an external collaborator: one
//! `DocumentStore` per resource kind, written as independent documents with
//! per-document atomicity. Anything beyond this contract is a backend
//! concern.

use crate::error::Result;
use crate::kind::ResourceKind;
use crate::projection::FieldSelector;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub mod memory;

pub use memory::MemoryStore;

/// Persistence contract for one resource kind
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document; the stored form (including any internal row
    /// key the backend adds) is returned.
    async fn create(&self, doc: Value) -> Result<Value>;

    /// Fetch a document by its public identifier
    async fn find(&self, id: &str) -> Result<Value>;

    /// List a page of documents with the given projection applied
    async fn find_all(&self, limit: usize, offset: usize, selector: &FieldSelector)
        -> Result<Vec<Value>>;

    /// Replace a document by its public identifier
    async fn update(&self, id: &str, doc: Value) -> Result<Value>;

    /// Delete a document by its public identifier
    async fn delete(&self, id: &str) -> Result<()>;

    /// Total number of stored documents
    async fn count(&self) -> Result<u64>;
}

/// One store per resource kind
#[derive(Clone)]
pub struct StoreSet {
    pub templates: Arc<dyn DocumentStore>,
    pub elements: Arc<dyn DocumentStore>,
    pub fields: Arc<dyn DocumentStore>,
}

impl StoreSet {
    /// Bundle three in-memory stores, one per kind
    pub fn in_memory() -> Self {
        Self {
            templates: Arc::new(MemoryStore::new(ResourceKind::Template)),
            elements: Arc::new(MemoryStore::new(ResourceKind::Element)),
            fields: Arc::new(MemoryStore::new(ResourceKind::Field)),
        }
    }

    pub fn for_kind(&self, kind: ResourceKind) -> &Arc<dyn DocumentStore> {
        match kind {
            ResourceKind::Template => &self.templates,
            ResourceKind::Element => &self.elements,
            ResourceKind::Field => &self.fields,
        }
    }
}
