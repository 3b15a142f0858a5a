//! In-memory document store for testing and development

use crate::document::{self, ID_KEY, INTERNAL_ID_KEY};
use crate::error::{RepositoryError, Result};
use crate::kind::ResourceKind;
use crate::projection::{self, FieldSelector};
use crate::storage::DocumentStore;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    docs: HashMap<String, Value>,
    // listing order is insertion order, like a backend returning rows
    // in natural order
    order: Vec<String>,
}

/// Mutex-backed store keyed by public identifier.
///
/// Mimics a real backend closely enough to exercise the boundary rules: it
/// stamps an internal `_id` row key on every write, which callers must strip
/// before documents leave the system.
pub struct MemoryStore {
    kind: ResourceKind,
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }

    fn not_found(&self, id: &str) -> RepositoryError {
        RepositoryError::NotFound {
            kind: self.kind,
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, mut doc: Value) -> Result<Value> {
        let id = document::id_of(&doc)
            .map(str::to_string)
            .ok_or_else(|| RepositoryError::Storage("document carries no @id".to_string()))?;

        let Value::Object(map) = &mut doc else {
            return Err(RepositoryError::NotAnObject);
        };
        map.insert(
            INTERNAL_ID_KEY.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );

        let mut inner = self.lock()?;
        if inner.docs.contains_key(&id) {
            return Err(RepositoryError::Storage(format!(
                "duplicate identifier: {id}"
            )));
        }
        inner.order.push(id.clone());
        inner.docs.insert(id, doc.clone());
        Ok(doc)
    }

    async fn find(&self, id: &str) -> Result<Value> {
        let inner = self.lock()?;
        inner.docs.get(id).cloned().ok_or_else(|| self.not_found(id))
    }

    async fn find_all(
        &self,
        limit: usize,
        offset: usize,
        selector: &FieldSelector,
    ) -> Result<Vec<Value>> {
        let inner = self.lock()?;
        Ok(inner
            .order
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| inner.docs.get(id))
            .map(|doc| projection::apply(selector, doc))
            .collect())
    }

    async fn update(&self, id: &str, mut doc: Value) -> Result<Value> {
        let mut inner = self.lock()?;
        let existing = inner.docs.get(id).ok_or_else(|| self.not_found(id))?;
        let row_key = existing
            .get(INTERNAL_ID_KEY)
            .cloned()
            .unwrap_or_else(|| Value::String(Uuid::new_v4().to_string()));

        let Value::Object(map) = &mut doc else {
            return Err(RepositoryError::NotAnObject);
        };
        map.insert(INTERNAL_ID_KEY.to_string(), row_key);
        map.insert(ID_KEY.to_string(), Value::String(id.to_string()));

        inner.docs.insert(id.to_string(), doc.clone());
        Ok(doc)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.docs.remove(id).is_none() {
            return Err(self.not_found(id));
        }
        inner.order.retain(|stored| stored != id);
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.lock()?.docs.len() as u64)
    }
}
