//! Identifier minting and import-mode validation

use crate::document::{self, ID_KEY};
use crate::error::{RepositoryError, Result};
use crate::kind::ResourceKind;
use serde_json::Value;
use uuid::Uuid;

/// Mints and validates public resource identifiers.
///
/// Minted identifiers are `{base}/{kind-segment}/{uuid-v4}`; uniqueness rests
/// on the v4 UUID, so concurrent callers never need coordination.
#[derive(Debug, Clone)]
pub struct IdMinter {
    base: String,
}

impl IdMinter {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// Mint a fresh globally-unique identifier for the given kind
    pub fn mint(&self, kind: ResourceKind) -> String {
        format!("{}/{}/{}", self.base, kind.path_segment(), Uuid::new_v4())
    }

    /// Validate the client-supplied `@id` against the import mode, without
    /// touching the document.
    ///
    /// Import mode requires a string `@id`; outside import mode any
    /// non-null `@id` is rejected, since clients may not assign identifiers
    /// for new resources.
    pub fn check_client_id(&self, doc: &Value, import_mode: bool) -> Result<()> {
        let id = doc.get(ID_KEY).filter(|v| !v.is_null());
        if import_mode {
            match id {
                Some(Value::String(s)) if !s.is_empty() => Ok(()),
                _ => Err(RepositoryError::MissingRequiredIdentifier),
            }
        } else if id.is_some() {
            Err(RepositoryError::IdentifierNotAllowed)
        } else {
            Ok(())
        }
    }

    /// Assign an identifier to the document and return the effective value.
    ///
    /// In import mode the client-supplied `@id` is authoritative and the
    /// document is left unmodified; otherwise a fresh identifier is minted
    /// and set.
    pub fn assign(&self, doc: &mut Value, kind: ResourceKind, import_mode: bool) -> Result<String> {
        self.check_client_id(doc, import_mode)?;
        if import_mode {
            // check_client_id guarantees a non-empty string @id here
            return document::id_of(doc)
                .map(str::to_string)
                .ok_or(RepositoryError::MissingRequiredIdentifier);
        }
        let Value::Object(map) = doc else {
            return Err(RepositoryError::NotAnObject);
        };
        let id = self.mint(kind);
        map.insert(ID_KEY.to_string(), Value::String(id.clone()));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minter() -> IdMinter {
        IdMinter::new("https://repo.example.org/")
    }

    #[test]
    fn minted_identifiers_are_scoped_and_unique() {
        let m = minter();
        let a = m.mint(ResourceKind::Field);
        let b = m.mint(ResourceKind::Field);
        assert!(a.starts_with("https://repo.example.org/fields/"));
        assert_ne!(a, b);
    }

    #[test]
    fn new_resources_may_not_carry_an_id() {
        let m = minter();
        let mut doc = json!({"@id": "https://elsewhere/templates/1"});
        let err = m.assign(&mut doc, ResourceKind::Template, false).unwrap_err();
        assert!(matches!(err, RepositoryError::IdentifierNotAllowed));
    }

    #[test]
    fn null_id_counts_as_absent() {
        let m = minter();
        let mut doc = json!({"@id": null, "title": "T"});
        let id = m.assign(&mut doc, ResourceKind::Template, false).unwrap();
        assert_eq!(doc["@id"], id);
        assert!(!id.is_empty());
    }

    #[test]
    fn import_requires_an_id() {
        let m = minter();
        let err = m
            .assign(&mut json!({"title": "no id"}), ResourceKind::Element, true)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::MissingRequiredIdentifier));
    }

    #[test]
    fn import_keeps_the_supplied_id() {
        let m = minter();
        let mut doc = json!({"@id": "https://elsewhere/elements/7", "title": "E"});
        let id = m.assign(&mut doc, ResourceKind::Element, true).unwrap();
        assert_eq!(id, "https://elsewhere/elements/7");
        assert_eq!(doc["@id"], "https://elsewhere/elements/7");
    }
}
