//! Table schema, and the decoding of row and update documents against it

use crate::base_type::BaseType;
use crate::column_type::ColumnType;
use crate::error::{Error, Result};
use crate::row::{Column, Row};
use crate::schema::column::ColumnSchema;
use crate::update::TableUpdate;
use crate::value::RowUuid;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Server-generated row identity column
pub const UUID_COLUMN: &str = "_uuid";

/// Server-generated row version column
pub const VERSION_COLUMN: &str = "_version";

/// One table: a name and its columns, keyed by column name
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    name: String,
    columns: BTreeMap<String, Arc<ColumnSchema>>,
}

impl TableSchema {
    /// Build a table from its columns
    ///
    /// A later column with the same name replaces an earlier one.
    pub fn new(name: impl Into<String>, columns: impl IntoIterator<Item = ColumnSchema>) -> Self {
        TableSchema {
            name: name.into(),
            columns: columns
                .into_iter()
                .map(|c| (c.name().to_string(), Arc::new(c)))
                .collect(),
        }
    }

    /// Parse `{"columns": {"<name>": <column-doc>, ...}, ...}`
    pub fn from_document(name: &str, node: &JsonValue) -> Result<TableSchema> {
        let columns = node
            .get("columns")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| {
                Error::schema_format(format!(
                    "bad table schema for {:?}, expected \"columns\" as child",
                    name
                ))
            })?;

        let mut parsed = Vec::with_capacity(columns.len());
        for (column_name, column_node) in columns {
            trace!(target: "ovsdb::schema", table = name, column = %column_name, "Parsing column");
            parsed.push(ColumnSchema::from_document(column_name, column_node)?);
        }
        Ok(TableSchema::new(name, parsed))
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column by exact name
    pub fn column(&self, name: &str) -> Option<&Arc<ColumnSchema>> {
        self.columns.get(name)
    }

    /// Column by exact name, falling back to an ASCII case-insensitive match
    ///
    /// Used for names derived from accessor identifiers, which may differ
    /// from the schema only in letter case. If more than one column matches
    /// ignoring case, nothing is returned.
    pub fn find_column(&self, name: &str) -> Option<&Arc<ColumnSchema>> {
        if let Some(column) = self.columns.get(name) {
            return Some(column);
        }
        let mut matches = self
            .columns
            .iter()
            .filter(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, column)| column);
        match (matches.next(), matches.next()) {
            (Some(column), None) => Some(column),
            _ => None,
        }
    }

    /// True if a column of that exact name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names, sorted
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// All columns, sorted by name
    pub fn columns(&self) -> impl Iterator<Item = &Arc<ColumnSchema>> {
        self.columns.values()
    }

    /// Declared type of a column
    pub fn column_type(&self, name: &str) -> Option<&ColumnType> {
        self.columns.get(name).map(|c| c.column_type())
    }

    /// True if both `_uuid` and `_version` are present
    pub fn has_internally_generated_columns(&self) -> bool {
        self.has_column(UUID_COLUMN) && self.has_column(VERSION_COLUMN)
    }

    /// This table with `_uuid` and `_version` added
    ///
    /// Returns the same `Arc` when both are already present. Existing
    /// columns are never removed or replaced.
    pub fn with_internally_generated_columns(self: &Arc<Self>) -> Arc<Self> {
        if self.has_internally_generated_columns() {
            return Arc::clone(self);
        }
        let mut table = TableSchema::clone(self);
        for name in [UUID_COLUMN, VERSION_COLUMN] {
            table.columns.entry(name.to_string()).or_insert_with(|| {
                Arc::new(ColumnSchema::new(name, ColumnType::atomic(BaseType::UUID)))
            });
        }
        Arc::new(table)
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decode a row-content document `{"<column>": <wire-value>, ...}`
    ///
    /// Fields naming no declared column are skipped: servers may expose
    /// hidden columns that the advertised schema leaves out.
    pub fn create_row(self: &Arc<Self>, node: &JsonValue) -> Result<Row> {
        let fields = node.as_object().ok_or_else(|| {
            Error::malformed_document(format!(
                "row of table {:?} must be an object, got {}",
                self.name, node
            ))
        })?;

        let mut row = Row::new(Arc::clone(self));
        for (name, value) in fields {
            match self.columns.get(name) {
                Some(schema) => {
                    row.insert_column(Column::new(
                        Arc::clone(schema),
                        schema.value_from_json(value),
                    ));
                }
                None => {
                    debug!(target: "ovsdb::row", table = %self.name, column = %name, "Skipping undeclared column");
                }
            }
        }
        Ok(row)
    }

    /// Decode a select result `{"rows": [<row-doc>, ...]}`
    pub fn create_rows(self: &Arc<Self>, node: &JsonValue) -> Result<Vec<Row>> {
        let rows = node.get("rows").and_then(JsonValue::as_array).ok_or_else(|| {
            Error::malformed_document(format!(
                "select result for table {:?} needs a \"rows\" array",
                self.name
            ))
        })?;
        rows.iter().map(|row| self.create_row(row)).collect()
    }

    /// Decode this table's slice of an update notification
    ///
    /// `{"<row-uuid>": {"old": <row-doc>?, "new": <row-doc>?}, ...}`.
    ///
    /// Rows are keyed by [`RowUuid`]. An entry whose key is not a uuid is
    /// discarded whole, both sides included, with a `warn!` on `ovsdb::row`.
    /// Its body is not checked, so it never fails the batch.
    pub fn updates_from_document(self: &Arc<Self>, node: &JsonValue) -> Result<TableUpdate> {
        let entries = node.as_object().ok_or_else(|| {
            Error::malformed_document(format!(
                "update for table {:?} must be an object, got {}",
                self.name, node
            ))
        })?;

        let mut update = TableUpdate::new();
        for (key, entry) in entries {
            let uuid: RowUuid = match key.parse() {
                Ok(uuid) => uuid,
                Err(e) => {
                    warn!(target: "ovsdb::row", table = %self.name, key = %key, error = %e, "Skipping row with unparseable uuid");
                    continue;
                }
            };
            if !entry.is_object() {
                return Err(Error::malformed_document(format!(
                    "update for row {} of table {:?} must be an object",
                    key, self.name
                )));
            }
            let old = self.side(entry, "old")?;
            let new = self.side(entry, "new")?;
            update.add_row(uuid, old, new);
        }
        Ok(update)
    }

    fn side(self: &Arc<Self>, entry: &JsonValue, key: &str) -> Result<Option<Row>> {
        match entry.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(doc) => self.create_row(doc).map(Some),
        }
    }
}
