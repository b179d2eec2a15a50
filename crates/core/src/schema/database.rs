//! Database schema, the root of a parsed schema document

use crate::error::{Error, Result};
use crate::schema::table::TableSchema;
use crate::update::TableUpdates;
use crate::version::Version;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// A named, versioned set of tables
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSchema {
    name: String,
    version: Version,
    tables: BTreeMap<String, Arc<TableSchema>>,
}

impl DatabaseSchema {
    /// Build a schema from already-parsed tables
    pub fn new(
        name: impl Into<String>,
        version: Version,
        tables: impl IntoIterator<Item = TableSchema>,
    ) -> Self {
        DatabaseSchema {
            name: name.into(),
            version,
            tables: tables
                .into_iter()
                .map(|t| (t.name().to_string(), Arc::new(t)))
                .collect(),
        }
    }

    /// Parse a schema document
    ///
    /// ```text
    /// {"version": "7.0.0", "tables": {"<Table>": {"columns": {...}}}}
    /// ```
    ///
    /// Both `tables` and `version` are required.
    pub fn from_document(name: &str, node: &JsonValue) -> Result<DatabaseSchema> {
        let tables = node
            .get("tables")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| {
                Error::schema_format(format!(
                    "bad database schema for {:?}, expected \"tables\" as child",
                    name
                ))
            })?;
        let version = node
            .get("version")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                Error::schema_format(format!(
                    "bad database schema for {:?}, expected \"version\" as child",
                    name
                ))
            })?;
        let version: Version = version
            .parse()
            .map_err(|e| Error::schema_format(format!("bad database schema for {:?}: {}", name, e)))?;

        let mut parsed = Vec::with_capacity(tables.len());
        for (table_name, table_node) in tables {
            trace!(target: "ovsdb::schema", database = name, table = %table_name, "Parsing table");
            parsed.push(TableSchema::from_document(table_name, table_node)?);
        }
        debug!(target: "ovsdb::schema", database = name, version = %version, tables = parsed.len(), "Parsed database schema");
        Ok(DatabaseSchema::new(name, version, parsed))
    }

    /// Database name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Table by name
    pub fn table(&self, name: &str) -> Option<&Arc<TableSchema>> {
        self.tables.get(name)
    }

    /// True if the table exists
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names, sorted
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// All tables, sorted by name
    pub fn tables(&self) -> impl Iterator<Item = &Arc<TableSchema>> {
        self.tables.values()
    }

    /// True if every table carries `_uuid` and `_version`
    pub fn has_internally_generated_columns(&self) -> bool {
        self.tables.values().all(|t| t.has_internally_generated_columns())
    }

    /// This schema with `_uuid` and `_version` added to every table
    ///
    /// Returns the same `Arc` when nothing needs adding.
    pub fn with_internally_generated_columns(self: &Arc<Self>) -> Arc<Self> {
        if self.has_internally_generated_columns() {
            return Arc::clone(self);
        }
        Arc::new(DatabaseSchema {
            name: self.name.clone(),
            version: self.version,
            tables: self
                .tables
                .iter()
                .map(|(name, table)| (name.clone(), table.with_internally_generated_columns()))
                .collect(),
        })
    }

    /// Decode a multi-table update notification
    ///
    /// `{"<Table>": {"<row-uuid>": {"old": .., "new": ..}}}`. Tables this
    /// schema does not know are skipped.
    pub fn updates_from_document(&self, node: &JsonValue) -> Result<TableUpdates> {
        let tables = node.as_object().ok_or_else(|| {
            Error::malformed_document(format!("table updates must be an object, got {}", node))
        })?;

        let mut updates = TableUpdates::new();
        for (table_name, table_node) in tables {
            match self.tables.get(table_name) {
                Some(table) => {
                    updates.insert(table_name.clone(), table.updates_from_document(table_node)?);
                }
                None => {
                    debug!(target: "ovsdb::row", database = %self.name, table = %table_name, "Skipping updates for unknown table");
                }
            }
        }
        Ok(updates)
    }
}
