//! Field projection for listing responses

use crate::error::{RepositoryError, Result};
use serde_json::Value;

/// Which document fields survive a listing response.
///
/// The two modes are mutually exclusive by construction: a selector is
/// either an allow-list or a deny-list, never a merge of both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    /// Retain only the named fields
    Include(Vec<String>),
    /// Retain everything except the named fields
    Exclude(Vec<String>),
}

/// Resolve the projection mode from the raw request parameters.
///
/// `summary` selects the per-kind allow-list; an explicit `fieldNames`
/// parameter selects exactly those names; otherwise the configured
/// exclusion list applies. Requesting `summary` while `fieldNames` is
/// present (even empty) is a conflict, never a silent merge.
pub fn resolve(
    summary: bool,
    field_names: Option<&str>,
    summary_fields: &[String],
    excluded_fields: &[String],
) -> Result<FieldSelector> {
    if let Some(raw) = field_names {
        if summary {
            return Err(RepositoryError::ConflictingProjectionModes);
        }
        let names: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !names.is_empty() {
            return Ok(FieldSelector::Include(names));
        }
    }
    if summary {
        Ok(FieldSelector::Include(summary_fields.to_vec()))
    } else {
        Ok(FieldSelector::Exclude(excluded_fields.to_vec()))
    }
}

/// Apply a selector to one document, preserving key order
pub fn apply(selector: &FieldSelector, doc: &Value) -> Value {
    let Value::Object(map) = doc else {
        return doc.clone();
    };
    let projected = match selector {
        FieldSelector::Include(names) => map
            .iter()
            .filter(|(k, _)| names.iter().any(|n| n == *k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        FieldSelector::Exclude(names) => map
            .iter()
            .filter(|(k, _)| !names.iter().any(|n| n == *k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    };
    Value::Object(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> Vec<String> {
        vec!["@id".into(), "title".into()]
    }

    fn excluded() -> Vec<String> {
        vec!["properties".into()]
    }

    #[test]
    fn summary_and_field_names_conflict() {
        let err = resolve(true, Some("title,description"), &summary(), &excluded()).unwrap_err();
        assert!(matches!(err, RepositoryError::ConflictingProjectionModes));
        // even an empty fieldNames parameter conflicts with summary
        let err = resolve(true, Some(""), &summary(), &excluded()).unwrap_err();
        assert!(matches!(err, RepositoryError::ConflictingProjectionModes));
    }

    #[test]
    fn empty_field_names_falls_back_to_exclusion() {
        let selector = resolve(false, Some(""), &summary(), &excluded()).unwrap();
        assert_eq!(selector, FieldSelector::Exclude(excluded()));
    }

    #[test]
    fn explicit_field_names_are_trimmed_and_included() {
        let selector = resolve(false, Some(" title , @id "), &summary(), &excluded()).unwrap();
        assert_eq!(
            selector,
            FieldSelector::Include(vec!["title".into(), "@id".into()])
        );
    }

    #[test]
    fn summary_uses_the_configured_allow_list() {
        let selector = resolve(true, None, &summary(), &excluded()).unwrap();
        assert_eq!(selector, FieldSelector::Include(summary()));
    }

    #[test]
    fn include_keeps_only_named_fields_in_order() {
        let doc = json!({"@id": "x", "title": "T", "properties": {"a": 1}});
        let projected = apply(&FieldSelector::Include(summary()), &doc);
        assert_eq!(projected, json!({"@id": "x", "title": "T"}));
    }

    #[test]
    fn exclude_removes_named_fields() {
        let doc = json!({"@id": "x", "title": "T", "properties": {"a": 1}});
        let projected = apply(&FieldSelector::Exclude(excluded()), &doc);
        assert_eq!(projected, json!({"@id": "x", "title": "T"}));
    }
}
