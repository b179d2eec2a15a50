//! Error types for capability binding
//!
//! Failures found while activating a shape against a schema are stored in
//! the activated shape and returned each time the operation is invoked, so
//! [`CapabilityError`] is `Clone`.

use crate::operation::OperationKind;
use ovsdb_core::{Version, VersionRange};
use thiserror::Error;

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, CapabilityError>;

/// Error types for capability resolution, activation and invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The shape's table does not exist in the database schema
    #[error("Table schema not found: {table} in database {database}")]
    TableSchemaNotFound {
        /// Table the shape is declared over
        table: String,
        /// Database that was searched
        database: String,
    },

    /// No column of the expected name and type exists in the table
    #[error("Column schema not found: {column} in table {table}")]
    ColumnSchemaNotFound {
        /// Column the operation resolved to
        column: String,
        /// Table that was searched
        table: String,
    },

    /// The database schema version is outside the supported range
    #[error("Schema version {actual} is outside the supported range {range}")]
    SchemaVersionMismatch {
        /// Version of the database schema
        actual: Version,
        /// Declared supported range
        range: VersionRange,
    },

    /// An operation name matches no naming convention and has no explicit metadata
    #[error("Unable to bind operation {operation:?}: name matches no accessor convention")]
    CapabilityBinding {
        /// The declared operation name
        operation: String,
    },

    /// A row-dependent operation was invoked with no row bound
    #[error("Operation {operation:?} requires a bound row")]
    UnboundRow {
        /// The invoked operation
        operation: String,
    },

    /// The shape belongs to a different database than the schema
    #[error("Shape belongs to database {expected}, schema is {actual}")]
    DatabaseMismatch {
        /// Database named by the shape
        expected: String,
        /// Name of the schema it was bound to
        actual: String,
    },

    /// The operation id is not declared by the shape
    #[error("Unknown operation {operation:?}")]
    UnknownOperation {
        /// The requested operation id
        operation: String,
    },

    /// The operation was invoked through an accessor of another kind
    #[error("Operation {operation:?} is declared as {actual}, not {expected}")]
    WrongOperationKind {
        /// The requested operation id
        operation: String,
        /// Kind of the accessor that was called
        expected: OperationKind,
        /// Kind the operation is declared with
        actual: OperationKind,
    },

    /// A declared version bound is not a dotted triple
    #[error("Operation {operation:?} declares an invalid version bound: {detail}")]
    InvalidVersionBound {
        /// The declared operation name
        operation: String,
        /// Parser message
        detail: String,
    },

    /// Registry configuration could not be parsed
    #[error("Invalid registry configuration: {detail}")]
    InvalidConfig {
        /// Parser message
        detail: String,
    },
}

impl CapabilityError {
    /// Build a [`CapabilityError::TableSchemaNotFound`]
    pub fn table_schema_not_found(table: impl Into<String>, database: impl Into<String>) -> Self {
        CapabilityError::TableSchemaNotFound {
            table: table.into(),
            database: database.into(),
        }
    }

    /// Build a [`CapabilityError::ColumnSchemaNotFound`]
    pub fn column_schema_not_found(column: impl Into<String>, table: impl Into<String>) -> Self {
        CapabilityError::ColumnSchemaNotFound {
            column: column.into(),
            table: table.into(),
        }
    }

    /// Build a [`CapabilityError::UnboundRow`]
    pub fn unbound_row(operation: impl Into<String>) -> Self {
        CapabilityError::UnboundRow {
            operation: operation.into(),
        }
    }

    /// True for the two "not found" kinds
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CapabilityError::TableSchemaNotFound { .. } | CapabilityError::ColumnSchemaNotFound { .. }
        )
    }
}
