//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from any test's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use serde_json::{json, Value as JsonValue};
use std::sync::{Arc, Once};

pub use ovsdb_typed::{DatabaseSchema, RowUuid, TableSchema, Value};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route library logs to the test harness output (visible with `--nocapture`).
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

pub const DATABASE: &str = "Open_vSwitch";

pub const BRIDGE_UUID: &str = "6f4c602c-026f-4390-beea-d50d6d448100";
pub const PORT_UUID: &str = "a7e0e3b1-1d0d-4b5e-9b0b-3bc0fd7e2f11";
pub const QUEUE_UUID: &str = "0c3e2b6e-5a3d-4f59-8c7e-2d1b7a3f9e10";
pub const INTERFACE_UUID: &str = "f1d2c3b4-a596-4788-99aa-bbccddeeff00";

/// A trimmed-down `Open_vSwitch` schema document at `version`.
pub fn open_vswitch_doc(version: &str) -> JsonValue {
    json!({
        "name": DATABASE,
        "version": version,
        "cksum": "1234567890 12345",
        "tables": {
            "Bridge": {
                "columns": {
                    "name": {"type": "string", "mutable": false},
                    "datapath_id": {"type": {"key": "string", "min": 0, "max": 1}, "ephemeral": true},
                    "ports": {"type": {"key": {"type": "uuid", "refTable": "Port"}, "min": 0, "max": "unlimited"}},
                    "fail_mode": {"type": {"key": {"type": "string", "enum": ["set", ["standalone", "secure"]]}, "min": 0, "max": 1}},
                    "stp_enable": {"type": "boolean"},
                    "other_config": {"type": {"key": "string", "value": "string", "min": 0, "max": "unlimited"}},
                    "external_ids": {"type": {"key": "string", "value": "string", "min": 0, "max": "unlimited"}}
                },
                "isRoot": true,
                "indexes": [["name"]]
            },
            "Port": {
                "columns": {
                    "name": {"type": "string", "mutable": false},
                    "interfaces": {"type": {"key": {"type": "uuid", "refTable": "Interface"}, "min": 1, "max": "unlimited"}},
                    "tag": {"type": {"key": {"type": "integer", "minInteger": 0, "maxInteger": 4095}, "min": 0, "max": 1}},
                    "trunks": {"type": {"key": {"type": "integer", "minInteger": 0, "maxInteger": 4095}, "min": 0, "max": 4096}},
                    "qos": {"type": {"key": {"type": "uuid", "refTable": "QoS"}, "min": 0, "max": 1}}
                },
                "indexes": [["name"]]
            },
            "Interface": {
                "columns": {
                    "name": {"type": "string", "mutable": false},
                    "type": {"type": "string"},
                    "ofport": {"type": {"key": "integer", "min": 0, "max": 1}},
                    "mtu": {"type": {"key": "integer", "min": 0, "max": 1}, "ephemeral": true},
                    "statistics": {"type": {"key": "string", "value": "integer", "min": 0, "max": "unlimited"}},
                    "link_speed": {"type": {"key": "integer", "min": 0, "max": 1}}
                }
            },
            "QoS": {
                "columns": {
                    "type": {"type": "string"},
                    "queues": {"type": {
                        "key": {"type": "integer", "minInteger": 0, "maxInteger": 4294967295_u64},
                        "value": {"type": "uuid", "refTable": "Queue"},
                        "min": 0, "max": "unlimited"
                    }}
                },
                "isRoot": true
            },
            "Queue": {
                "columns": {
                    "dscp": {"type": {"key": {"type": "integer", "minInteger": 0, "maxInteger": 63}, "min": 0, "max": 1}},
                    "other_config": {"type": {"key": "string", "value": "string", "min": 0, "max": "unlimited"}}
                },
                "isRoot": true
            }
        }
    })
}

/// Parsed `Open_vSwitch` schema at `7.0.0`.
pub fn open_vswitch_schema() -> Arc<DatabaseSchema> {
    schema_at("7.0.0")
}

/// Parsed `Open_vSwitch` schema at `version`.
pub fn schema_at(version: &str) -> Arc<DatabaseSchema> {
    Arc::new(
        DatabaseSchema::from_document(DATABASE, &open_vswitch_doc(version))
            .expect("fixture schema must parse"),
    )
}

/// A table of the 7.0.0 fixture schema, with internal columns.
pub fn table(name: &str) -> Arc<TableSchema> {
    let schema = open_vswitch_schema().with_internally_generated_columns();
    Arc::clone(schema.table(name).expect("fixture table must exist"))
}

pub fn row_uuid(s: &str) -> RowUuid {
    s.parse().expect("fixture uuid must parse")
}
