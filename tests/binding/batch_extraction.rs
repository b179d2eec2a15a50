//! Batch Extraction Tests
//!
//! Old/updated/removed maps built from update notifications.

use crate::common::*;
use crate::shapes::*;
use ovsdb_typed::binding::{CapabilityAccess, CapabilityError, RowSide, ShapeRegistry, TypedDatabaseSchema};
use ovsdb_typed::TableUpdates;
use serde_json::json;
use std::sync::Arc;

const INSERTED: &str = "11111111-1111-4111-8111-111111111111";
const MODIFIED: &str = "22222222-2222-4222-8222-222222222222";
const DELETED: &str = "33333333-3333-4333-8333-333333333333";

fn typed() -> TypedDatabaseSchema {
    TypedDatabaseSchema::with_registry(
        open_vswitch_schema().with_internally_generated_columns(),
        Arc::new(ShapeRegistry::default()),
    )
}

fn updates(typed: &TypedDatabaseSchema) -> TableUpdates {
    typed
        .schema()
        .updates_from_document(&json!({
            "Port": {
                (INSERTED): {"new": {"name": "p1", "tag": 10}},
                (MODIFIED): {"old": {"tag": ["set", []]}, "new": {"name": "p2", "tag": 20}},
                (DELETED): {"old": {"name": "p3", "tag": 30}}
            },
            "Bridge": {
                (BRIDGE_UUID): {"new": {"name": "br0"}}
            }
        }))
        .unwrap()
}

#[test]
fn test_updated_rows() {
    let typed = typed();
    let updated = typed.extract_rows_updated::<Port>(&updates(&typed)).unwrap();

    assert_eq!(updated.len(), 2);
    assert!(!updated.contains_key(&row_uuid(DELETED)));
    let modified = &updated[&row_uuid(MODIFIED)];
    assert_eq!(modified.get_data("getName").unwrap(), Some(&Value::from("p2")));
}

#[test]
fn test_old_rows() {
    let typed = typed();
    let old = typed.extract_rows_old::<Port>(&updates(&typed)).unwrap();

    assert_eq!(old.len(), 2);
    assert!(!old.contains_key(&row_uuid(INSERTED)));
    let modified = &old[&row_uuid(MODIFIED)];
    assert_eq!(modified.get_data("getName").unwrap(), None);
    let tag = modified.get_column("getTagColumn").unwrap();
    assert!(tag.data().and_then(Value::as_set).unwrap().is_empty());
}

#[test]
fn test_removed_rows() {
    let typed = typed();
    let removed = typed.extract_rows_removed::<Port>(&updates(&typed)).unwrap();

    assert_eq!(removed.keys().copied().collect::<Vec<_>>(), vec![row_uuid(DELETED)]);
    let deleted = &removed[&row_uuid(DELETED)];
    assert_eq!(deleted.get_data("getName").unwrap(), Some(&Value::from("p3")));
}

#[test]
fn test_single_table_update() {
    let typed = typed();
    let updates = updates(&typed);
    let bridge_updates = updates.get("Bridge").unwrap();

    let new = typed.extract_rows::<Bridge>(bridge_updates, RowSide::New).unwrap();
    assert_eq!(new.len(), 1);
    assert!(typed
        .extract_rows::<Bridge>(bridge_updates, RowSide::Removed)
        .unwrap()
        .is_empty());
}

#[test]
fn test_absent_table_gives_empty_maps() {
    let typed = typed();
    let updates = updates(&typed);
    assert!(typed.extract_rows_updated::<Interface>(&updates).unwrap().is_empty());
    assert!(typed.extract_rows_old::<Interface>(&updates).unwrap().is_empty());
}

#[test]
fn test_extraction_still_gates() {
    let typed = typed();
    let err = typed
        .extract_rows_updated::<PhysicalSwitch>(&updates(&typed))
        .unwrap_err();
    assert!(matches!(err, CapabilityError::DatabaseMismatch { .. }));
}

#[test]
fn test_extracted_rows_are_independent() {
    let typed = typed();
    let updates = updates(&typed);
    let mut updated = typed.extract_rows_updated::<Port>(&updates).unwrap();

    let inserted = updated.get_mut(&row_uuid(INSERTED)).unwrap();
    inserted.set_data("setTag", Value::from(99)).unwrap();

    // The batch itself is untouched
    let pending = updates.get("Port").unwrap().get(&row_uuid(INSERTED)).unwrap();
    let tag = pending.new_row().unwrap().get("tag").and_then(Value::as_set).unwrap();
    assert!(tag.contains(&Value::from(10)));
}
