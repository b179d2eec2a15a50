//! Row-update batches
//!
//! A [`TableUpdate`] is what one table's slice of an update notification
//! decodes into: per row identity, the row as it was (`old`) and as it is
//! now (`new`). [`TableUpdates`] groups them by table name.

use crate::row::Row;
use crate::value::RowUuid;
use std::collections::BTreeMap;

// ============================================================================
// RowUpdate
// ============================================================================

/// Old and new state of one row
#[derive(Debug, Clone, PartialEq)]
pub struct RowUpdate {
    uuid: RowUuid,
    old: Option<Row>,
    new: Option<Row>,
}

impl RowUpdate {
    /// Create a row update
    pub fn new(uuid: RowUuid, old: Option<Row>, new: Option<Row>) -> Self {
        RowUpdate { uuid, old, new }
    }

    /// Row identity
    pub fn uuid(&self) -> &RowUuid {
        &self.uuid
    }

    /// Row before the change
    pub fn old(&self) -> Option<&Row> {
        self.old.as_ref()
    }

    /// Row after the change
    pub fn new_row(&self) -> Option<&Row> {
        self.new.as_ref()
    }

    /// Split into `(old, new)`
    pub fn into_parts(self) -> (Option<Row>, Option<Row>) {
        (self.old, self.new)
    }

    /// Only the new side is present
    pub fn is_insert(&self) -> bool {
        self.old.is_none() && self.new.is_some()
    }

    /// Only the old side is present
    pub fn is_delete(&self) -> bool {
        self.old.is_some() && self.new.is_none()
    }

    /// Both sides are present
    pub fn is_modify(&self) -> bool {
        self.old.is_some() && self.new.is_some()
    }
}

// ============================================================================
// TableUpdate
// ============================================================================

/// Row updates for one table, keyed by row identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableUpdate {
    rows: BTreeMap<RowUuid, RowUpdate>,
}

impl TableUpdate {
    /// Empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the change to one row, replacing any earlier entry for it
    pub fn add_row(&mut self, uuid: RowUuid, old: Option<Row>, new: Option<Row>) {
        self.rows.insert(uuid, RowUpdate::new(uuid, old, new));
    }

    /// Entry for one row
    pub fn get(&self, uuid: &RowUuid) -> Option<&RowUpdate> {
        self.rows.get(uuid)
    }

    /// All entries, ordered by row identity
    pub fn iter(&self) -> impl Iterator<Item = (&RowUuid, &RowUpdate)> {
        self.rows.iter()
    }

    /// Number of rows in the batch
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row's old side, where present
    pub fn old_rows(&self) -> impl Iterator<Item = (&RowUuid, &Row)> {
        self.rows
            .iter()
            .filter_map(|(uuid, update)| update.old().map(|row| (uuid, row)))
    }

    /// Every row's new side (inserts and modifications)
    pub fn new_rows(&self) -> impl Iterator<Item = (&RowUuid, &Row)> {
        self.rows
            .iter()
            .filter_map(|(uuid, update)| update.new_row().map(|row| (uuid, row)))
    }

    /// Old side of rows that have no new side (deletions)
    pub fn removed_rows(&self) -> impl Iterator<Item = (&RowUuid, &Row)> {
        self.rows
            .iter()
            .filter(|(_, update)| update.is_delete())
            .filter_map(|(uuid, update)| update.old().map(|row| (uuid, row)))
    }
}

impl IntoIterator for TableUpdate {
    type Item = (RowUuid, RowUpdate);
    type IntoIter = std::collections::btree_map::IntoIter<RowUuid, RowUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

// ============================================================================
// TableUpdates
// ============================================================================

/// Table name to [`TableUpdate`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableUpdates {
    tables: BTreeMap<String, TableUpdate>,
}

impl TableUpdates {
    /// Empty set of updates
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the batch for a table
    pub fn insert(&mut self, table: impl Into<String>, update: TableUpdate) -> Option<TableUpdate> {
        self.tables.insert(table.into(), update)
    }

    /// Batch for one table
    pub fn get(&self, table: &str) -> Option<&TableUpdate> {
        self.tables.get(table)
    }

    /// Iterate `(table name, batch)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableUpdate)> {
        self.tables.iter().map(|(name, update)| (name.as_str(), update))
    }

    /// Number of tables with updates
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True if no table has updates
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
