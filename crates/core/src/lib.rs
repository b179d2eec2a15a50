//! Schema model and value codec for OVSDB-style databases
//!
//! This crate turns server-supplied documents into typed values:
//! - Version / VersionRange: dotted-triple schema versions and ranges over them
//! - BaseType: scalar value types with their recorded constraints
//! - ColumnType: one or two base types plus a cardinality
//! - DatabaseSchema / TableSchema / ColumnSchema: the immutable schema tree
//! - Value: decoded scalars, sets, maps, uuids and referenced rows
//! - Row / Column: one table's decoded row content
//! - TableUpdate / TableUpdates: old/new row pairs from update notifications
//! - Error: schema and document format failures
//!
//! Decoding is lenient by contract. Wire values whose shape does not fit a
//! column decode to `None`, and row fields naming undeclared columns are
//! skipped. Only structural document errors surface as [`Error`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod base_type;
pub mod column_type;
pub mod error;
pub mod row;
pub mod schema;
pub mod update;
pub mod value;
pub mod version;

pub use base_type::{BaseKind, BaseType, RefType};
pub use column_type::{ColumnType, UNLIMITED};
pub use error::{Error, Result};
pub use row::{Column, Row};
pub use schema::{ColumnSchema, DatabaseSchema, TableSchema, UUID_COLUMN, VERSION_COLUMN};
pub use update::{RowUpdate, TableUpdate, TableUpdates};
pub use value::{ReferencedRow, RowUuid, Value, ValueMap, ValueSet};
pub use version::{Version, VersionRange};
