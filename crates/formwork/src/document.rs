//! Helpers around the JSON document model
//!
//! Documents are `serde_json::Value` trees (`preserve_order` keeps object
//! keys in insertion order). Two reserved keys cross the system boundary:
//! `@id` carries the globally unique resource identifier and `@type` names
//! the resource kind. The backend's internal row key (`_id`) never leaves
//! the system and is stripped from every outbound document.

use crate::kind::ResourceKind;
use serde_json::Value;

/// Reserved key holding the public resource identifier
pub const ID_KEY: &str = "@id";

/// Reserved key naming the resource kind of a document
pub const TYPE_KEY: &str = "@type";

/// Backend-internal row key, stripped before documents leave the system
pub const INTERNAL_ID_KEY: &str = "_id";

/// Public identifier of a document, if it carries a string `@id`
pub fn id_of(doc: &Value) -> Option<&str> {
    doc.get(ID_KEY).and_then(Value::as_str)
}

/// Whether the document's `@type` marks it as the given kind
pub fn is_kind(doc: &Value, kind: ResourceKind) -> bool {
    doc.get(TYPE_KEY).and_then(Value::as_str) == Some(kind.type_name())
}

/// Remove the backend-internal row key before a document crosses the boundary
pub fn strip_internal_id(mut doc: Value) -> Value {
    if let Value::Object(map) = &mut doc {
        map.remove(INTERNAL_ID_KEY);
    }
    doc
}

/// Minimal reference to an already-persisted resource
pub fn reference(id: &str) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(ID_KEY.to_string(), Value::String(id.to_string()));
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_internal_id_only() {
        let doc = json!({"_id": "row-42", "@id": "public-id", "title": "T"});
        let stripped = strip_internal_id(doc);
        assert!(stripped.get(INTERNAL_ID_KEY).is_none());
        assert_eq!(id_of(&stripped), Some("public-id"));
        assert_eq!(stripped["title"], "T");
    }

    #[test]
    fn kind_detection_requires_matching_type() {
        let field = json!({"@type": "Field", "title": "Name"});
        assert!(is_kind(&field, ResourceKind::Field));
        assert!(!is_kind(&field, ResourceKind::Element));
        assert!(!is_kind(&json!({"title": "untyped"}), ResourceKind::Field));
        assert!(!is_kind(&json!("scalar"), ResourceKind::Field));
    }

    #[test]
    fn reference_holds_identifier_only() {
        let r = reference("https://repo.example.org/fields/abc");
        assert_eq!(r, json!({"@id": "https://repo.example.org/fields/abc"}));
    }
}
