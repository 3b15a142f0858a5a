//! Integration tests for the resource mediator over the in-memory backend

use formwork::{Registry, RepositoryError, ResourceKind, ServiceConfig, StoreSet};
use serde_json::{Value, json};
use std::sync::Arc;

fn registry() -> Registry {
    Registry::new(StoreSet::in_memory(), Arc::new(ServiceConfig::default()))
}

fn nested_template() -> Value {
    json!({
        "@type": "Template",
        "title": "Study",
        "fields": {
            "f1": {"@type": "Field", "title": "Outer field"}
        },
        "elements": {
            "e1": {
                "@type": "Element",
                "title": "Address",
                "fields": {
                    "f2": {"@type": "Field", "title": "Street"}
                }
            }
        }
    })
}

#[tokio::test]
async fn create_mints_identifier_and_stamps_provenance() {
    let registry = registry();
    let created = registry
        .create(ResourceKind::Template, json!({"@type": "Template", "title": "T"}), false, "alice")
        .await
        .unwrap();

    let id = created["@id"].as_str().unwrap();
    assert!(id.starts_with("https://repo.example.org/templates/"));
    assert_eq!(created["createdBy"], "alice");
    assert_eq!(created["lastUpdatedBy"], "alice");
    assert!(created.get("_id").is_none());
}

#[tokio::test]
async fn create_rejects_client_supplied_identifier_without_persisting() {
    let registry = registry();
    let err = registry
        .create(
            ResourceKind::Template,
            json!({"@id": "https://elsewhere/templates/1", "fields": {"f": {"@type": "Field"}}}),
            false,
            "alice",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::IdentifierNotAllowed));

    // nothing was written, not even the embedded field
    let templates = registry.list(ResourceKind::Template, 10, 0, false, None).await.unwrap();
    let fields = registry.list(ResourceKind::Field, 10, 0, false, None).await.unwrap();
    assert_eq!(templates.total, 0);
    assert_eq!(fields.total, 0);
}

#[tokio::test]
async fn import_mode_requires_and_preserves_the_identifier() {
    let registry = registry();
    let err = registry
        .create(ResourceKind::Element, json!({"title": "no id"}), true, "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::MissingRequiredIdentifier));

    let imported = registry
        .create(
            ResourceKind::Element,
            json!({"@id": "https://elsewhere/elements/legacy-7", "title": "Legacy"}),
            true,
            "alice",
        )
        .await
        .unwrap();
    assert_eq!(imported["@id"], "https://elsewhere/elements/legacy-7");
    // import mode assumes the document carries its own history
    assert!(imported.get("createdBy").is_none());
}

#[tokio::test]
async fn decomposition_stores_each_embedded_definition_separately() {
    let registry = registry();
    let created = registry
        .create(ResourceKind::Template, nested_template(), false, "alice")
        .await
        .unwrap();

    // four resources total: template, f1, e1, f2
    let templates = registry.list(ResourceKind::Template, 10, 0, false, None).await.unwrap();
    let elements = registry.list(ResourceKind::Element, 10, 0, false, None).await.unwrap();
    let fields = registry.list(ResourceKind::Field, 10, 0, false, None).await.unwrap();
    assert_eq!(templates.total, 1);
    assert_eq!(elements.total, 1);
    assert_eq!(fields.total, 2);

    // the stored template holds references only
    let f1_ref = &created["fields"]["f1"];
    let e1_ref = &created["elements"]["e1"];
    assert_eq!(f1_ref.as_object().unwrap().len(), 1);
    assert_eq!(e1_ref.as_object().unwrap().len(), 1);

    // each child is independently readable and fully resolved
    let e1 = registry
        .find(ResourceKind::Element, e1_ref["@id"].as_str().unwrap())
        .await
        .unwrap();
    assert_eq!(e1["title"], "Address");
    let f2_ref = &e1["fields"]["f2"];
    assert_eq!(f2_ref.as_object().unwrap().len(), 1);

    let f2 = registry
        .find(ResourceKind::Field, f2_ref["@id"].as_str().unwrap())
        .await
        .unwrap();
    assert_eq!(f2["title"], "Street");
    assert_eq!(f2["createdBy"], "alice");

    // all four identifiers are distinct
    let mut ids = vec![
        created["@id"].as_str().unwrap().to_string(),
        f1_ref["@id"].as_str().unwrap().to_string(),
        e1_ref["@id"].as_str().unwrap().to_string(),
        f2_ref["@id"].as_str().unwrap().to_string(),
    ];
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[tokio::test]
async fn update_preserves_creation_provenance() {
    let registry = registry();
    let created = registry
        .create(ResourceKind::Field, json!({"@type": "Field", "title": "Name"}), false, "alice")
        .await
        .unwrap();
    let id = created["@id"].as_str().unwrap();

    let updated = registry
        .update(
            ResourceKind::Field,
            id,
            json!({
                "@type": "Field",
                "title": "Full name",
                "createdBy": created["createdBy"],
                "createdOn": created["createdOn"]
            }),
            "bob",
        )
        .await
        .unwrap();

    assert_eq!(updated["createdBy"], "alice");
    assert_eq!(updated["createdOn"], created["createdOn"]);
    assert_eq!(updated["lastUpdatedBy"], "bob");
    assert_eq!(updated["title"], "Full name");
    assert_eq!(updated["@id"], id);
}

#[tokio::test]
async fn update_decomposes_newly_embedded_children() {
    let registry = registry();
    let created = registry
        .create(ResourceKind::Element, json!({"@type": "Element", "title": "E"}), false, "alice")
        .await
        .unwrap();
    let id = created["@id"].as_str().unwrap();

    let updated = registry
        .update(
            ResourceKind::Element,
            id,
            json!({
                "@type": "Element",
                "title": "E",
                "fields": {"added": {"@type": "Field", "title": "Added later"}}
            }),
            "alice",
        )
        .await
        .unwrap();

    let fields = registry.list(ResourceKind::Field, 10, 0, false, None).await.unwrap();
    assert_eq!(fields.total, 1);
    assert_eq!(updated["fields"]["added"].as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn update_and_delete_of_missing_resources_are_not_found() {
    let registry = registry();
    let err = registry
        .update(ResourceKind::Template, "absent", json!({"title": "x"}), "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let err = registry.delete(ResourceKind::Template, "absent").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_the_resource() {
    let registry = registry();
    let created = registry
        .create(ResourceKind::Field, json!({"@type": "Field", "title": "F"}), false, "alice")
        .await
        .unwrap();
    let id = created["@id"].as_str().unwrap();

    registry.delete(ResourceKind::Field, id).await.unwrap();
    let err = registry.find(ResourceKind::Field, id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn listing_pages_and_counts() {
    let registry = registry();
    for i in 0..5 {
        registry
            .create(
                ResourceKind::Template,
                json!({"@type": "Template", "title": format!("T{i}")}),
                false,
                "alice",
            )
            .await
            .unwrap();
    }

    let page = registry.list(ResourceKind::Template, 2, 2, false, None).await.unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0]["title"], "T2");
    assert!(page.items[0].get("_id").is_none());

    let err = registry
        .list(ResourceKind::Template, 2, 10, false, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::OffsetBeyondTotal { offset: 10, total: 5 }
    ));
}

#[tokio::test]
async fn listing_projection_modes() {
    let registry = registry();
    registry
        .create(
            ResourceKind::Template,
            json!({"@type": "Template", "title": "T", "properties": {"x": 1}}),
            false,
            "alice",
        )
        .await
        .unwrap();

    // default mode drops the configured exclusion list
    let page = registry.list(ResourceKind::Template, 10, 0, false, None).await.unwrap();
    assert!(page.items[0].get("properties").is_none());
    assert_eq!(page.items[0]["title"], "T");

    // summary keeps only the allow-list
    let page = registry.list(ResourceKind::Template, 10, 0, true, None).await.unwrap();
    let summary = page.items[0].as_object().unwrap();
    assert!(summary.contains_key("@id"));
    assert!(summary.contains_key("title"));
    assert!(!summary.contains_key("createdBy"));

    // explicit field list wins over the defaults
    let page = registry
        .list(ResourceKind::Template, 10, 0, false, Some("title"))
        .await
        .unwrap();
    assert_eq!(page.items[0], json!({"title": "T"}));

    // summary and fieldNames together are a conflict
    let err = registry
        .list(ResourceKind::Template, 10, 0, true, Some("title"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConflictingProjectionModes));
}
