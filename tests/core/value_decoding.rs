//! Value Decoding Tests
//!
//! Wire value shapes against the column types they are decoded with.

use crate::common::*;
use ovsdb_typed::{BaseType, ColumnType, RefType, ValueMap, ValueSet, UNLIMITED};
use serde_json::json;
use std::time::{Duration, Instant};

fn string_to_integer_map() -> ColumnType {
    ColumnType::from_document(&json!({"key": "string", "value": "integer", "min": 0, "max": "unlimited"}))
        .unwrap()
}

fn integer_set() -> ColumnType {
    ColumnType::atomic(BaseType::integer()).with_cardinality(0, UNLIMITED)
}

// ============================================================================
// Maps
// ============================================================================

#[test]
fn test_map_column_decodes_tagged_pairs() {
    let column_type = string_to_integer_map();
    assert!(column_type.is_multi_valued());

    let value = column_type
        .value_from_json(&json!(["map", [["a", 1], ["b", 2]]]))
        .unwrap();
    let expected: ValueMap = [
        (Value::from("a"), Value::from(1)),
        (Value::from("b"), Value::from(2)),
    ]
    .into_iter()
    .collect();
    assert_eq!(value, Value::Map(expected));
}

#[test]
fn test_map_duplicate_keys_last_wins() {
    let value = string_to_integer_map()
        .value_from_json(&json!(["map", [["a", 1], ["a", 3]]]))
        .unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&Value::from("a")), Some(&Value::from(3)));
}

#[test]
fn test_map_empty_array_is_no_value() {
    let column_type = string_to_integer_map();
    assert_eq!(column_type.value_from_json(&json!([])), None);
    assert_eq!(column_type.value_from_json(&json!("a")), None);
    assert_eq!(column_type.value_from_json(&json!(["set", []])), None);

    // An empty tagged map is a map, not "no value"
    let empty = column_type.value_from_json(&json!(["map", []])).unwrap();
    assert!(empty.as_map().unwrap().is_empty());
}

// ============================================================================
// Sets
// ============================================================================

#[test]
fn test_set_tagged() {
    let value = integer_set()
        .value_from_json(&json!(["set", [1, 2, 3]]))
        .unwrap();
    let expected: ValueSet = [1, 2, 3].into_iter().map(Value::from).collect();
    assert_eq!(value, Value::Set(expected));
}

#[test]
fn test_set_bare_scalar_is_singleton() {
    let value = integer_set().value_from_json(&json!(42)).unwrap();
    let set = value.as_set().unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.contains(&Value::from(42)));
}

#[test]
fn test_set_odd_arity_array_is_empty() {
    let column_type = integer_set();
    for node in [json!([]), json!([1]), json!([1, 2, 3])] {
        let value = column_type.value_from_json(&node).unwrap();
        assert!(value.as_set().unwrap().is_empty(), "{}", node);
    }
}

#[test]
fn test_large_collections_decode_quickly() {
    let elements: Vec<i64> = (0..40_000).collect();
    let start = Instant::now();
    let value = integer_set().value_from_json(&json!(["set", elements])).unwrap();
    let set = value.as_set().unwrap();
    assert_eq!(set.len(), 40_000);
    assert!(set.contains(&Value::from(39_999_i64)));

    let pairs: Vec<_> = (0..20_000).map(|i| json!([format!("k{}", i), i])).collect();
    let value = string_to_integer_map()
        .value_from_json(&json!(["map", pairs]))
        .unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 20_000);
    assert_eq!(map.get(&Value::from("k19999")), Some(&Value::from(19_999_i64)));

    let elapsed = start.elapsed();
    assert!(elapsed < Duration::from_secs(3), "decoding took {:?}", elapsed);
}

#[test]
fn test_optional_uuid_as_bare_reference() {
    let schema = open_vswitch_schema();
    let qos = schema.table("Port").unwrap().column("qos").unwrap();

    let value = qos.value_from_json(&json!(["uuid", QUEUE_UUID])).unwrap();
    let set = value.as_set().unwrap();
    assert!(set.contains(&Value::Uuid(row_uuid(QUEUE_UUID))));
}

// ============================================================================
// Uuids
// ============================================================================

#[test]
fn test_uuid_reference_decodes_to_identifier() {
    let base = BaseType::uuid_ref("Queue", RefType::Strong);
    let value = base.to_value(&json!(["uuid", QUEUE_UUID])).unwrap();
    assert_eq!(value.as_uuid().map(|u| u.to_string()), Some(QUEUE_UUID.to_string()));
}

#[test]
fn test_uuid_expanded_row_is_placeholder() {
    let base = BaseType::uuid_ref("Queue", RefType::Strong);
    let node = json!({"dscp": 10, "other_config": ["map", []]});
    let value = base.to_value(&node).unwrap();

    let referenced = value.as_referenced_row().unwrap();
    assert_eq!(referenced.ref_table(), Some("Queue"));
    assert_eq!(referenced.document(), &node);
}

#[test]
fn test_malformed_uuid_is_no_value() {
    assert_eq!(BaseType::UUID.to_value(&json!(["uuid", "not-a-uuid"])), None);
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn test_scalar_shape_mismatch_is_no_value() {
    let column_type = ColumnType::atomic(BaseType::integer());
    assert_eq!(column_type.value_from_json(&json!("7")), None);
    assert_eq!(column_type.value_from_json(&json!(7)), Some(Value::from(7)));
}

#[test]
fn test_wire_encoding() {
    let set: ValueSet = [Value::from("a")].into_iter().collect();
    assert_eq!(Value::Set(set).to_wire(), json!(["set", ["a"]]));

    let uuid = Value::Uuid(row_uuid(BRIDGE_UUID));
    assert_eq!(uuid.to_wire(), json!(["uuid", BRIDGE_UUID]));

    let map: ValueMap = [(Value::from("k"), Value::from(true))].into_iter().collect();
    assert_eq!(Value::Map(map).to_wire(), json!(["map", [["k", true]]]));
}
