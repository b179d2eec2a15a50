//! Activation of a resolved shape against one database schema
//!
//! Every operation is looked up once, in a fixed order: schema version
//! against the operation's range, then the table, then the column. A
//! failure at any step is not raised here. It is stored with the operation
//! and returned each time the operation is invoked, so a shape can be bound
//! to a schema that only supports part of it.

use crate::error::{CapabilityError, Result};
use crate::operation::{OperationKind, ResolvedOperation};
use crate::shape::ResolvedShape;
use ovsdb_core::{ColumnSchema, DatabaseSchema, TableSchema};
use std::sync::Arc;
use tracing::debug;

/// What an operation resolved to in one schema
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// The shape's table
    Table(Arc<TableSchema>),
    /// The bound row itself
    Row,
    /// One column of the shape's table
    Column(Arc<ColumnSchema>),
}

/// A resolved shape with every operation looked up in one schema
#[derive(Debug)]
pub struct ActivatedShape {
    shape: Arc<ResolvedShape>,
    table: Option<Arc<TableSchema>>,
    bindings: Vec<Result<Binding>>,
}

impl ActivatedShape {
    /// Look up every operation of `shape` in `schema`
    pub fn activate(shape: Arc<ResolvedShape>, schema: &DatabaseSchema) -> Self {
        let table = schema.table(shape.table()).cloned();
        let bindings = shape
            .operations()
            .iter()
            .map(|op| {
                let binding = bind_operation(op, shape.table(), table.as_ref(), schema);
                if let Err(e) = &binding {
                    debug!(target: "ovsdb::binding", operation = op.name(), error = %e, "Deferring binding failure to invocation time");
                }
                binding
            })
            .collect();
        ActivatedShape {
            shape,
            table,
            bindings,
        }
    }

    /// The resolved shape
    pub fn shape(&self) -> &Arc<ResolvedShape> {
        &self.shape
    }

    /// The shape's table in this schema, if it exists
    pub fn table(&self) -> Option<&Arc<TableSchema>> {
        self.table.as_ref()
    }

    /// Declared operation and its binding
    ///
    /// Fails if `name` is not declared, or is declared with a kind other
    /// than `kind`. A stored activation failure is returned as the inner
    /// error.
    pub fn binding(&self, name: &str, kind: OperationKind) -> Result<(&ResolvedOperation, &Binding)> {
        let slot = self
            .shape
            .position(name)
            .ok_or_else(|| CapabilityError::UnknownOperation {
                operation: name.to_string(),
            })?;
        let op = &self.shape.operations()[slot];
        if op.kind() != kind {
            return Err(CapabilityError::WrongOperationKind {
                operation: name.to_string(),
                expected: kind,
                actual: op.kind(),
            });
        }
        match &self.bindings[slot] {
            Ok(binding) => Ok((op, binding)),
            Err(e) => Err(e.clone()),
        }
    }
}

fn bind_operation(
    op: &ResolvedOperation,
    table_name: &str,
    table: Option<&Arc<TableSchema>>,
    schema: &DatabaseSchema,
) -> Result<Binding> {
    if !op.versions().contains(schema.version()) {
        return Err(CapabilityError::SchemaVersionMismatch {
            actual: *schema.version(),
            range: *op.versions(),
        });
    }
    if op.kind() == OperationKind::GetRow {
        return Ok(Binding::Row);
    }

    let table = table.ok_or_else(|| CapabilityError::table_schema_not_found(table_name, schema.name()))?;
    let column = match op.column() {
        Some(column) => column,
        None => return Ok(Binding::Table(Arc::clone(table))),
    };

    table
        .find_column(column)
        .filter(|c| op.expected().matches(c.column_type()))
        .map(|c| Binding::Column(Arc::clone(c)))
        .ok_or_else(|| CapabilityError::column_schema_not_found(column, table.name()))
}
