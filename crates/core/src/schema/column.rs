//! Column schema

use crate::column_type::ColumnType;
use crate::error::{Error, Result};
use crate::value::Value;
use serde_json::Value as JsonValue;
use std::fmt;

/// A named column and its declared type
///
/// Two column schemas are equal iff name and type are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    name: String,
    column_type: ColumnType,
}

impl ColumnSchema {
    /// Create a column schema
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        ColumnSchema {
            name: name.into(),
            column_type,
        }
    }

    /// Parse `{"type": <column-type-doc>, ...}`
    pub fn from_document(name: &str, node: &JsonValue) -> Result<ColumnSchema> {
        let type_node = node.get("type").ok_or_else(|| {
            Error::schema_format(format!(
                "bad column schema for {:?}, expected \"type\" as child",
                name
            ))
        })?;
        Ok(ColumnSchema::new(name, ColumnType::from_document(type_node)?))
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    /// Decode a wire value for this column, `None` if it does not fit
    pub fn value_from_json(&self, node: &JsonValue) -> Option<Value> {
        self.column_type.value_from_json(node)
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.column_type)
    }
}
