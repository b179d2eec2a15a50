//! Bound capabilities
//!
//! A [`BoundCapability`] is a shape activated against one schema and,
//! optionally, one row. It owns that row: `set_data` mutates it in place,
//! and [`into_row`](BoundCapability::into_row) hands it back once the
//! caller is done writing.

use crate::activation::{ActivatedShape, Binding};
use crate::error::{CapabilityError, Result};
use crate::operation::OperationKind;
use crate::shape::TableShape;
use ovsdb_core::{Column, Row, TableSchema, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// One accessor per operation kind
///
/// `op` is the name the operation was declared under. Invoking an
/// undeclared name, or a name declared with another kind, fails without
/// touching the row.
pub trait CapabilityAccess {
    /// `GetTableSchema`: the table schema, never needs a row
    fn get_table_schema(&self, op: &str) -> Result<&Arc<TableSchema>>;

    /// `GetRow`: the bound row, `None` if unbound
    fn get_row(&self, op: &str) -> Result<Option<&Row>>;

    /// `GetData`: the column's value, `None` if unbound or absent from the row
    fn get_data(&self, op: &str) -> Result<Option<&Value>>;

    /// `GetColumn`: the column's schema with its value, if any
    fn get_column(&self, op: &str) -> Result<Column>;

    /// `SetData`: write the column's value and return `self` for chaining
    ///
    /// Fails with [`CapabilityError::UnboundRow`] if no row is bound.
    fn set_data(&mut self, op: &str, value: Value) -> Result<&mut Self>;
}

/// A shape bound to a schema and an optional row
pub struct BoundCapability<S: TableShape> {
    activated: Arc<ActivatedShape>,
    row: Option<Row>,
    _shape: PhantomData<fn() -> S>,
}

impl<S: TableShape> BoundCapability<S> {
    pub(crate) fn new(activated: Arc<ActivatedShape>, row: Option<Row>) -> Self {
        BoundCapability {
            activated,
            row,
            _shape: PhantomData,
        }
    }

    /// Table name of the shape
    pub fn table_name(&self) -> &'static str {
        S::TABLE
    }

    /// The activated shape behind this capability
    pub fn activated(&self) -> &Arc<ActivatedShape> {
        &self.activated
    }

    /// The bound row
    pub fn row(&self) -> Option<&Row> {
        self.row.as_ref()
    }

    /// True if a row is bound
    pub fn is_bound(&self) -> bool {
        self.row.is_some()
    }

    /// Give up the capability and keep the row
    pub fn into_row(self) -> Option<Row> {
        self.row
    }

    fn column_binding(&self, op: &str, kind: OperationKind) -> Result<&Arc<ovsdb_core::ColumnSchema>> {
        match self.activated.binding(op, kind)? {
            (_, Binding::Column(column)) => Ok(column),
            (resolved, _) => Err(CapabilityError::CapabilityBinding {
                operation: resolved.name().to_string(),
            }),
        }
    }
}

impl<S: TableShape> CapabilityAccess for BoundCapability<S> {
    fn get_table_schema(&self, op: &str) -> Result<&Arc<TableSchema>> {
        match self.activated.binding(op, OperationKind::GetTableSchema)? {
            (_, Binding::Table(table)) => Ok(table),
            (resolved, _) => Err(CapabilityError::CapabilityBinding {
                operation: resolved.name().to_string(),
            }),
        }
    }

    fn get_row(&self, op: &str) -> Result<Option<&Row>> {
        self.activated.binding(op, OperationKind::GetRow)?;
        Ok(self.row.as_ref())
    }

    fn get_data(&self, op: &str) -> Result<Option<&Value>> {
        let column = self.column_binding(op, OperationKind::GetData)?;
        Ok(self.row.as_ref().and_then(|row| row.get(column.name())))
    }

    fn get_column(&self, op: &str) -> Result<Column> {
        let column = self.column_binding(op, OperationKind::GetColumn)?;
        let data = self.row.as_ref().and_then(|row| row.get(column.name())).cloned();
        Ok(Column::new(Arc::clone(column), data))
    }

    fn set_data(&mut self, op: &str, value: Value) -> Result<&mut Self> {
        let column = Arc::clone(self.column_binding(op, OperationKind::SetData)?);
        let row = self.row.as_mut().ok_or_else(|| CapabilityError::unbound_row(op))?;
        row.set(&column, value);
        Ok(self)
    }
}

impl<S: TableShape> Clone for BoundCapability<S> {
    fn clone(&self) -> Self {
        BoundCapability::new(Arc::clone(&self.activated), self.row.clone())
    }
}

impl<S: TableShape> PartialEq for BoundCapability<S> {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row
    }
}

impl<S: TableShape> fmt::Debug for BoundCapability<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCapability")
            .field("shape", &self.activated.shape().shape_name())
            .field("row", &self.row)
            .finish()
    }
}

impl<S: TableShape> fmt::Display for BoundCapability<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.row {
            Some(row) => write!(f, "{} : {}", S::TABLE, row),
            None => write!(f, "{} : <unbound>", S::TABLE),
        }
    }
}
