//! The resource operation mediator
//!
//! One `Registry` serves all three resource kinds; every operation is
//! parameterized by [`ResourceKind`] instead of duplicating the same CRUD
//! shape per kind. Create and update run the full decomposition pipeline:
//! embedded fields are extracted across the whole tree, then embedded
//! elements, then the top-level document is stamped, assigned its
//! identifier, and written.

use crate::config::ServiceConfig;
use crate::decompose::{self, ExtractedResource};
use crate::document;
use crate::error::{RepositoryError, Result};
use crate::identifier::IdMinter;
use crate::kind::ResourceKind;
use crate::pagination;
use crate::projection;
use crate::provenance::{self, ProvenanceInfo};
use crate::storage::StoreSet;
use serde_json::Value;
use std::sync::Arc;
use time::OffsetDateTime;

/// One page of a listing, with the collection total for paging metadata
#[derive(Debug)]
pub struct PageResult {
    pub items: Vec<Value>,
    pub total: u64,
}

/// Mediates create/read/list/update/delete for every resource kind
pub struct Registry {
    stores: StoreSet,
    minter: IdMinter,
    config: Arc<ServiceConfig>,
}

impl Registry {
    pub fn new(stores: StoreSet, config: Arc<ServiceConfig>) -> Self {
        let minter = IdMinter::new(config.id_base.clone());
        Self {
            stores,
            minter,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Create a resource, decomposing embedded children first.
    ///
    /// All validation and tree rewriting happens before the first storage
    /// write; children are then persisted innermost-first, the parent last.
    /// A failure mid-sequence aborts before the parent write but does not
    /// roll back children already stored; orphaned children are an accepted
    /// limitation of the persistence model.
    pub async fn create(
        &self,
        kind: ResourceKind,
        mut doc: Value,
        import_mode: bool,
        principal: &str,
    ) -> Result<Value> {
        if !doc.is_object() {
            return Err(RepositoryError::NotAnObject);
        }
        // fail on a disallowed or missing top-level @id before any child
        // is persisted
        self.minter.check_client_id(&doc, import_mode)?;

        let pi = ProvenanceInfo::new(principal, OffsetDateTime::now_utc());
        let pending = self.extract_children(&mut doc, kind, import_mode, &pi)?;
        self.persist_children(pending).await?;

        if !import_mode {
            provenance::stamp_create(&mut doc, &pi)?;
        }
        self.minter.assign(&mut doc, kind, import_mode)?;

        let created = self.stores.for_kind(kind).create(doc).await?;
        Ok(document::strip_internal_id(created))
    }

    /// Fetch one resource by identifier
    pub async fn find(&self, kind: ResourceKind, id: &str) -> Result<Value> {
        let doc = self.stores.for_kind(kind).find(id).await?;
        Ok(document::strip_internal_id(doc))
    }

    /// List one page of resources with the requested projection.
    ///
    /// The offset-vs-total check runs after the query, once the collection
    /// count is known; it can still reject an otherwise valid request.
    pub async fn list(
        &self,
        kind: ResourceKind,
        limit: i64,
        offset: i64,
        summary: bool,
        field_names: Option<&str>,
    ) -> Result<PageResult> {
        pagination::check_paging(limit, offset, self.config.max_page_size)?;
        let selector = projection::resolve(
            summary,
            field_names,
            self.config.summary_fields.for_kind(kind),
            &self.config.excluded_list_fields,
        )?;

        let store = self.stores.for_kind(kind);
        let items = store
            .find_all(limit as usize, offset as usize, &selector)
            .await?;
        let total = store.count().await?;
        pagination::check_offset_against_total(offset, total)?;

        Ok(PageResult {
            items: items.into_iter().map(document::strip_internal_id).collect(),
            total,
        })
    }

    /// Replace a resource, decomposing any newly embedded children.
    ///
    /// The identifier comes from the request path, never the body. Creation
    /// provenance already stored on the resource is preserved; concurrent
    /// updates to the same identifier are last-write-wins.
    pub async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        mut doc: Value,
        principal: &str,
    ) -> Result<Value> {
        if !doc.is_object() {
            return Err(RepositoryError::NotAnObject);
        }
        let pi = ProvenanceInfo::new(principal, OffsetDateTime::now_utc());
        let pending = self.extract_children(&mut doc, kind, false, &pi)?;
        self.persist_children(pending).await?;

        provenance::stamp_update(&mut doc, &pi)?;
        if let Value::Object(map) = &mut doc {
            map.insert(document::ID_KEY.to_string(), Value::String(id.to_string()));
        }

        let updated = self.stores.for_kind(kind).update(id, doc).await?;
        Ok(document::strip_internal_id(updated))
    }

    /// Delete a resource by identifier
    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<()> {
        self.stores.for_kind(kind).delete(id).await
    }

    /// Run one extraction pass per embedded child kind, fields before
    /// elements, over the whole tree.
    fn extract_children(
        &self,
        doc: &mut Value,
        kind: ResourceKind,
        import_mode: bool,
        pi: &ProvenanceInfo,
    ) -> Result<Vec<ExtractedResource>> {
        let mut pending = Vec::new();
        for child_kind in kind.embedded_kinds() {
            decompose::extract_embedded(doc, *child_kind, import_mode, pi, &self.minter, &mut pending)?;
        }
        Ok(pending)
    }

    async fn persist_children(&self, pending: Vec<ExtractedResource>) -> Result<()> {
        for child in pending {
            self.stores.for_kind(child.kind).create(child.document).await?;
        }
        Ok(())
    }
}
