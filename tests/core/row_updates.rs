//! Row and Update Construction Tests

use crate::common::*;
use ovsdb_typed::{Error, UUID_COLUMN};
use serde_json::json;

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_create_row_decodes_every_declared_column() {
    let bridge = table("Bridge");
    let row = bridge
        .create_row(&json!({
            "_uuid": ["uuid", BRIDGE_UUID],
            "name": "br-int",
            "ports": ["set", [["uuid", PORT_UUID]]],
            "stp_enable": false,
            "other_config": ["map", [["disable-in-band", "true"]]],
            "datapath_id": ["set", []]
        }))
        .unwrap();

    assert_eq!(row.len(), 6);
    assert_eq!(row.uuid(), Some(&row_uuid(BRIDGE_UUID)));
    assert_eq!(row.get("name"), Some(&Value::from("br-int")));
    assert_eq!(row.get("stp_enable"), Some(&Value::from(false)));
    assert!(row
        .get("ports")
        .and_then(Value::as_set)
        .unwrap()
        .contains(&Value::Uuid(row_uuid(PORT_UUID))));
    assert!(row.get("datapath_id").and_then(Value::as_set).unwrap().is_empty());
}

#[test]
fn test_create_row_drops_undeclared_fields() {
    init_tracing();
    let row = table("Interface")
        .create_row(&json!({"name": "eth0", "lldp": ["map", []], "cfm_fault": false}))
        .unwrap();

    assert_eq!(row.len(), 1);
    assert!(row.column("lldp").is_none());
    assert!(row.column("cfm_fault").is_none());
}

#[test]
fn test_row_round_trips_through_document() {
    let port = table("Port");
    let doc = json!({
        "name": "eth0",
        "tag": ["set", [100]],
        "trunks": ["set", [10, 20]],
        "_uuid": ["uuid", PORT_UUID]
    });
    let row = port.create_row(&doc).unwrap();
    let again = port.create_row(&row.to_document()).unwrap();
    assert_eq!(row, again);
}

#[test]
fn test_select_result_rows() {
    let rows = table("Interface")
        .create_rows(&json!({"rows": [
            {"name": "eth0", "ofport": 1},
            {"name": "eth1", "ofport": ["set", []]}
        ]}))
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].get("ofport").and_then(Value::as_set).map(|s| s.len()),
        Some(1)
    );
}

#[test]
fn test_row_must_be_object() {
    let err = table("Bridge").create_row(&json!("br0")).unwrap_err();
    assert!(matches!(err, Error::MalformedDocument { .. }));
}

// ============================================================================
// Updates
// ============================================================================

#[test]
fn test_table_update_projections() {
    let port = table("Port");
    let insert = "11111111-1111-4111-8111-111111111111";
    let modify = "22222222-2222-4222-8222-222222222222";
    let delete = "33333333-3333-4333-8333-333333333333";

    let update = port
        .updates_from_document(&json!({
            insert: {"new": {"name": "p1"}},
            modify: {"old": {"tag": ["set", []]}, "new": {"name": "p2", "tag": 5}},
            delete: {"old": {"name": "p3"}}
        }))
        .unwrap();

    assert_eq!(update.len(), 3);
    assert!(update.get(&row_uuid(insert)).unwrap().is_insert());
    assert!(update.get(&row_uuid(modify)).unwrap().is_modify());
    assert!(update.get(&row_uuid(delete)).unwrap().is_delete());

    assert_eq!(update.new_rows().count(), 2);
    assert_eq!(update.old_rows().count(), 2);
    let removed: Vec<_> = update.removed_rows().map(|(uuid, _)| *uuid).collect();
    assert_eq!(removed, vec![row_uuid(delete)]);
}

#[test]
fn test_database_updates() {
    init_tracing();
    let schema = open_vswitch_schema().with_internally_generated_columns();
    let updates = schema
        .updates_from_document(&json!({
            "Bridge": {BRIDGE_UUID: {"new": {"_uuid": ["uuid", BRIDGE_UUID], "name": "br0"}}},
            "Port": {PORT_UUID: {"old": {"name": "eth0"}}},
            "Flow_Sample_Collector_Set": {QUEUE_UUID: {"new": {"id": 1}}}
        }))
        .unwrap();

    assert_eq!(updates.len(), 2);
    let bridge = updates.get("Bridge").unwrap();
    let (_, row) = bridge.new_rows().next().unwrap();
    assert_eq!(row.uuid(), Some(&row_uuid(BRIDGE_UUID)));
    assert!(row.table().has_column(UUID_COLUMN));
    assert_eq!(updates.get("Port").unwrap().removed_rows().count(), 1);
}
