//! Decoded rows
//!
//! A [`Row`] is scoped to exactly one [`TableSchema`] and maps column names to
//! [`Column`]s, each pairing the resolved [`ColumnSchema`] with its decoded value.
//! Rows are plain owned values: whoever holds a `Row` is its only writer.

use crate::schema::{ColumnSchema, TableSchema, UUID_COLUMN};
use crate::value::{RowUuid, Value};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Column
// ============================================================================

/// A column schema with its (optional) value in one row
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    schema: Arc<ColumnSchema>,
    data: Option<Value>,
}

impl Column {
    /// Pair a schema with a value
    pub fn new(schema: Arc<ColumnSchema>, data: Option<Value>) -> Self {
        Column { schema, data }
    }

    /// The column's schema
    pub fn schema(&self) -> &Arc<ColumnSchema> {
        &self.schema
    }

    /// The column's value, if any
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Take the value out
    pub fn into_data(self) -> Option<Value> {
        self.data
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(value) => write!(f, "{}={}", self.schema.name(), value),
            None => write!(f, "{}=<none>", self.schema.name()),
        }
    }
}

// ============================================================================
// Row
// ============================================================================

/// Column name to decoded value, for one table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    table: Arc<TableSchema>,
    columns: BTreeMap<String, Column>,
}

impl Row {
    /// Empty row of `table`
    pub fn new(table: Arc<TableSchema>) -> Self {
        Row {
            table,
            columns: BTreeMap::new(),
        }
    }

    /// The owning table schema
    pub fn table(&self) -> &Arc<TableSchema> {
        &self.table
    }

    /// Column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Value of the named column, `None` if absent from this row
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.get(name).and_then(Column::data)
    }

    /// Write `value` under `schema`, returning the previous value
    pub fn set(&mut self, schema: &Arc<ColumnSchema>, value: Value) -> Option<Value> {
        self.insert_column(Column::new(Arc::clone(schema), Some(value)))
            .and_then(Column::into_data)
    }

    /// Insert a whole column, returning the one it replaced
    pub fn insert_column(&mut self, column: Column) -> Option<Column> {
        self.columns
            .insert(column.schema().name().to_string(), column)
    }

    /// Remove a column from this row
    pub fn remove(&mut self, name: &str) -> Option<Column> {
        self.columns.remove(name)
    }

    /// Iterate columns in name order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Number of columns present
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if no column is present
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The row's `_uuid`, when the server sent it
    pub fn uuid(&self) -> Option<&RowUuid> {
        self.get(UUID_COLUMN).and_then(Value::as_uuid)
    }

    /// Encode back into a row-content document
    ///
    /// Columns without a value are left out.
    pub fn to_document(&self) -> JsonValue {
        let mut doc = JsonMap::new();
        for column in self.columns.values() {
            if let Some(value) = column.data() {
                doc.insert(column.schema().name().to_string(), value.to_wire());
            }
        }
        JsonValue::Object(doc)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.table.name())?;
        for (i, column) in self.columns.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", column)?;
        }
        write!(f, "}}")
    }
}
