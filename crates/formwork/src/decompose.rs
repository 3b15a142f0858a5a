//! Decomposition of nested documents into independent resources
//!
//! A submitted template may embed element and field definitions anywhere in
//! its tree. Each embedded definition is recognized by its `@type`, stamped
//! with provenance, given an identifier, and pulled out for persistence as
//! its own resource; the parent keeps only an `{"@id"}` reference.
//!
//! The extraction pass is a pure, synchronous transform: it validates and
//! rewrites the whole tree before a single storage write happens, and yields
//! the pending writes innermost-first so a child is always persisted before
//! any document that references it.

use crate::document;
use crate::error::Result;
use crate::identifier::IdMinter;
use crate::kind::ResourceKind;
use crate::provenance::{self, ProvenanceInfo};
use serde_json::Value;

/// A fully resolved child document awaiting persistence
#[derive(Debug)]
pub struct ExtractedResource {
    pub kind: ResourceKind,
    pub document: Value,
}

/// Extract every embedded document of `child_kind` below `parent`.
///
/// The parent node itself is never extracted, so a top-level element
/// submission is not swallowed by its own element pass. Extracted documents
/// are appended to `out` in post-order: grandchildren before the child that
/// embedded them.
pub fn extract_embedded(
    parent: &mut Value,
    child_kind: ResourceKind,
    import_mode: bool,
    pi: &ProvenanceInfo,
    minter: &IdMinter,
    out: &mut Vec<ExtractedResource>,
) -> Result<()> {
    match parent {
        Value::Object(map) => {
            for (_, node) in map.iter_mut() {
                visit(node, child_kind, import_mode, pi, minter, out)?;
            }
        }
        Value::Array(items) => {
            for node in items.iter_mut() {
                visit(node, child_kind, import_mode, pi, minter, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn visit(
    node: &mut Value,
    child_kind: ResourceKind,
    import_mode: bool,
    pi: &ProvenanceInfo,
    minter: &IdMinter,
    out: &mut Vec<ExtractedResource>,
) -> Result<()> {
    // Descend first: a child must be fully resolved (its own embedded
    // descendants replaced by references) before it is extracted itself.
    extract_embedded(node, child_kind, import_mode, pi, minter, out)?;

    if document::is_kind(node, child_kind) {
        if !import_mode {
            provenance::stamp_create(node, pi)?;
        }
        let id = minter.assign(node, child_kind, import_mode)?;
        let body = std::mem::replace(node, document::reference(&id));
        out.push(ExtractedResource {
            kind: child_kind,
            document: body,
        });
    }
    Ok(())
}
