//! Typed capability binding over runtime-discovered schemas
//!
//! Calling code declares a [`TableShape`]: a table name plus named
//! operations (`get_data`, `set_data`, `get_column`, `get_row`,
//! `get_table_schema`). This crate binds that shape to whatever schema the
//! server advertised, and to individual rows, without generated code.
//!
//! Binding goes through three stages:
//! - resolution: operation names become kinds and column names, once per
//!   shape type ([`ShapeRegistry`])
//! - activation: tables and columns are looked up once per schema, with
//!   version gating ([`ActivatedShape`])
//! - binding: an activated shape is paired with a row ([`BoundCapability`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ovsdb_binding::{CapabilityAccess, OperationDecl, ShapeDeclaration, TableShape, TypedDatabaseSchema};
//! use ovsdb_core::{DatabaseSchema, Value};
//!
//! struct Bridge;
//!
//! impl TableShape for Bridge {
//!     const TABLE: &'static str = "Bridge";
//!
//!     fn declare(shape: &mut ShapeDeclaration) {
//!         shape
//!             .operation(OperationDecl::inferred("getName"))
//!             .operation(OperationDecl::inferred("setName"));
//!     }
//! }
//!
//! let doc = serde_json::json!({
//!     "version": "7.0.0",
//!     "tables": {"Bridge": {"columns": {"name": {"type": "string"}}}}
//! });
//! let schema = Arc::new(DatabaseSchema::from_document("Open_vSwitch", &doc).unwrap());
//! let typed = TypedDatabaseSchema::new(schema);
//!
//! let row = typed.table_schema::<Bridge>().unwrap().create_row(&serde_json::json!({})).unwrap();
//! let mut bridge = typed.bind::<Bridge>(Some(row)).unwrap();
//! bridge.set_data("setName", Value::from("br0")).unwrap();
//! assert_eq!(bridge.get_data("getName").unwrap(), Some(&Value::from("br0")));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activation;
pub mod bound;
pub mod config;
pub mod error;
pub mod operation;
pub mod registry;
pub mod shape;
pub mod typed;

pub use activation::{ActivatedShape, Binding};
pub use bound::{BoundCapability, CapabilityAccess};
pub use config::RegistryConfig;
pub use error::{CapabilityError, Result};
pub use operation::{ExpectedType, OperationDecl, OperationKind, ResolvedOperation};
pub use registry::ShapeRegistry;
pub use shape::{ResolvedShape, ShapeDeclaration, TableShape};
pub use typed::{RowSide, TypedDatabaseSchema};
