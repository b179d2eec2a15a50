//! Naming Convention Tests

use crate::common::*;
use crate::shapes::*;
use ovsdb_typed::binding::{
    CapabilityAccess, CapabilityError, OperationKind, ResolvedShape, ShapeRegistry, TypedDatabaseSchema,
};
use std::sync::Arc;

#[test]
fn test_get_other_config_column_resolves_by_convention() {
    let shape = ResolvedShape::resolve::<Bridge>().unwrap();
    let op = shape.operation("getOtherConfigColumn").unwrap();
    assert_eq!(op.kind(), OperationKind::GetColumn);
    assert_eq!(op.column(), Some("otherConfig"));
}

#[test]
fn test_convention_kinds() {
    let shape = ResolvedShape::resolve::<Port>().unwrap();
    let kinds: Vec<_> = shape
        .operations()
        .iter()
        .map(|op| (op.name(), op.kind(), op.column()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("getName", OperationKind::GetData, Some("name")),
            ("getTagColumn", OperationKind::GetColumn, Some("tag")),
            ("setTag", OperationKind::SetData, Some("tag")),
            ("getBondMode", OperationKind::GetData, Some("bond_mode")),
            ("getQos", OperationKind::GetData, Some("qos")),
            ("getPortRow", OperationKind::GetRow, None),
        ]
    );
}

#[test]
fn test_convention_column_lookup() {
    let typed = TypedDatabaseSchema::with_registry(open_vswitch_schema(), Arc::new(ShapeRegistry::default()));
    let row = table("Interface")
        .create_row(&serde_json::json!({"ofport": ["set", [3]]}))
        .unwrap();
    let interface = typed.bind::<Interface>(Some(row)).unwrap();

    // "getOfport" resolves to "ofport" exactly; "getName" to "name"
    assert!(interface.get_data("getOfport").unwrap().is_some());
    assert_eq!(interface.get_data("getName").unwrap(), None);
}

#[test]
fn test_convention_miss_is_deferred_not_found() {
    let typed = TypedDatabaseSchema::with_registry(open_vswitch_schema(), Arc::new(ShapeRegistry::default()));
    let bridge = typed.bind::<Bridge>(None).unwrap();

    // "otherConfig" has no column; the explicit declaration does
    assert_eq!(
        bridge.get_column("getOtherConfigColumn").unwrap_err(),
        CapabilityError::column_schema_not_found("otherConfig", "Bridge")
    );
    assert_eq!(bridge.get_data("getOtherConfig").unwrap(), None);
    assert_eq!(
        bridge.get_data("getStpEnable").unwrap_err(),
        CapabilityError::column_schema_not_found("stpEnable", "Bridge")
    );
}

#[test]
fn test_unmatched_name_fails_resolution() {
    let registry = Arc::new(ShapeRegistry::default());
    let typed = TypedDatabaseSchema::with_registry(open_vswitch_schema(), Arc::clone(&registry));

    let err = typed.bind::<Misdeclared>(None).unwrap_err();
    assert_eq!(
        err,
        CapabilityError::CapabilityBinding {
            operation: "bridgeName".to_string()
        }
    );
    // Same failure on every attempt, without re-declaring
    assert_eq!(registry.resolve::<Misdeclared>().unwrap_err(), err);
    assert!(registry.contains::<Misdeclared>());
}
