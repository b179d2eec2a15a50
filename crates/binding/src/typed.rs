//! Database schema with capability binding
//!
//! [`TypedDatabaseSchema`] wraps one [`DatabaseSchema`] and binds shapes to
//! it. Shapes are resolved through a [`ShapeRegistry`] (the global one by
//! default) and activated once per schema, so binding a shape to many rows
//! only costs an `Arc` clone per row.

use crate::activation::ActivatedShape;
use crate::bound::BoundCapability;
use crate::error::{CapabilityError, Result};
use crate::registry::ShapeRegistry;
use crate::shape::{ResolvedShape, TableShape};
use dashmap::DashMap;
use ovsdb_core::{DatabaseSchema, Row, RowUuid, TableSchema, TableUpdate, TableUpdates};
use std::any::TypeId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Which side of a row update to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSide {
    /// The row as it was, for every row that has one
    Old,
    /// The row as it is now (inserts and modifications)
    New,
    /// The old row of rows that were deleted
    Removed,
}

/// A database schema that capability shapes can be bound to
#[derive(Debug, Clone)]
pub struct TypedDatabaseSchema {
    schema: Arc<DatabaseSchema>,
    registry: Arc<ShapeRegistry>,
    activations: Arc<DashMap<TypeId, Arc<ActivatedShape>>>,
}

impl TypedDatabaseSchema {
    /// Wrap `schema`, resolving shapes through the global registry
    pub fn new(schema: Arc<DatabaseSchema>) -> Self {
        Self::with_registry(schema, ShapeRegistry::global())
    }

    /// Wrap `schema`, resolving shapes through `registry`
    pub fn with_registry(schema: Arc<DatabaseSchema>, registry: Arc<ShapeRegistry>) -> Self {
        TypedDatabaseSchema {
            schema,
            registry,
            activations: Arc::new(DashMap::new()),
        }
    }

    /// The wrapped schema
    pub fn schema(&self) -> &Arc<DatabaseSchema> {
        &self.schema
    }

    /// The registry shapes are resolved through
    pub fn registry(&self) -> &Arc<ShapeRegistry> {
        &self.registry
    }

    /// Same wrapper over the schema with `_uuid` and `_version` in every table
    ///
    /// Returns a clone of `self` (sharing its activations) when the schema
    /// already has them.
    pub fn with_internally_generated_columns(&self) -> Self {
        let schema = self.schema.with_internally_generated_columns();
        if Arc::ptr_eq(&schema, &self.schema) {
            return self.clone();
        }
        Self::with_registry(schema, Arc::clone(&self.registry))
    }

    /// `S` activated against this schema
    ///
    /// Resolution failures of the shape itself are returned here. Failures of
    /// single operations are kept in the activation and surface on invocation.
    pub fn activate<S: TableShape>(&self) -> Result<Arc<ActivatedShape>> {
        let key = TypeId::of::<S>();
        if let Some(hit) = self.activations.get(&key) {
            return Ok(Arc::clone(hit.value()));
        }
        let shape = self.registry.resolve::<S>()?;
        let activated = self
            .activations
            .entry(key)
            .or_insert_with(|| {
                trace!(target: "ovsdb::binding", shape = shape.shape_name(), database = %self.schema.name(), "Activating shape");
                Arc::new(ActivatedShape::activate(Arc::clone(&shape), &self.schema))
            })
            .value()
            .clone();
        Ok(activated)
    }

    /// The table `S` is declared over
    pub fn table_schema<S: TableShape>(&self) -> Result<Arc<TableSchema>> {
        let activated = self.activate::<S>()?;
        self.check_table_supported(activated.shape())?;
        activated
            .table()
            .cloned()
            .ok_or_else(|| CapabilityError::table_schema_not_found(S::TABLE, self.schema.name()))
    }

    /// Bind `S` to this schema and an optional row
    ///
    /// The shape's database name and table-level version range are checked
    /// here. Per-operation failures are deferred to invocation.
    pub fn bind<S: TableShape>(&self, row: Option<Row>) -> Result<BoundCapability<S>> {
        let activated = self.activate::<S>()?;
        self.check_table_supported(activated.shape())?;
        Ok(BoundCapability::new(activated, row))
    }

    /// Bind `S` to one side of every row in `update`
    ///
    /// Rows without the requested side are left out of the map.
    pub fn extract_rows<S: TableShape>(
        &self,
        update: &TableUpdate,
        side: RowSide,
    ) -> Result<BTreeMap<RowUuid, BoundCapability<S>>> {
        let activated = self.activate::<S>()?;
        self.check_table_supported(activated.shape())?;

        let rows: Box<dyn Iterator<Item = (&RowUuid, &Row)> + '_> = match side {
            RowSide::Old => Box::new(update.old_rows()),
            RowSide::New => Box::new(update.new_rows()),
            RowSide::Removed => Box::new(update.removed_rows()),
        };
        Ok(rows
            .map(|(uuid, row)| {
                (
                    *uuid,
                    BoundCapability::new(Arc::clone(&activated), Some(row.clone())),
                )
            })
            .collect())
    }

    /// Old side of every row of `S`'s table in `updates`
    pub fn extract_rows_old<S: TableShape>(
        &self,
        updates: &TableUpdates,
    ) -> Result<BTreeMap<RowUuid, BoundCapability<S>>> {
        self.extract_from::<S>(updates, RowSide::Old)
    }

    /// New side of every inserted or modified row of `S`'s table in `updates`
    pub fn extract_rows_updated<S: TableShape>(
        &self,
        updates: &TableUpdates,
    ) -> Result<BTreeMap<RowUuid, BoundCapability<S>>> {
        self.extract_from::<S>(updates, RowSide::New)
    }

    /// Old side of every deleted row of `S`'s table in `updates`
    pub fn extract_rows_removed<S: TableShape>(
        &self,
        updates: &TableUpdates,
    ) -> Result<BTreeMap<RowUuid, BoundCapability<S>>> {
        self.extract_from::<S>(updates, RowSide::Removed)
    }

    fn extract_from<S: TableShape>(
        &self,
        updates: &TableUpdates,
        side: RowSide,
    ) -> Result<BTreeMap<RowUuid, BoundCapability<S>>> {
        match updates.get(S::TABLE) {
            Some(update) => self.extract_rows::<S>(update, side),
            None => {
                // Still surface database and version mismatches
                let activated = self.activate::<S>()?;
                self.check_table_supported(activated.shape())?;
                Ok(BTreeMap::new())
            }
        }
    }

    fn check_table_supported(&self, shape: &ResolvedShape) -> Result<()> {
        if let Some(database) = shape.database() {
            if !database.eq_ignore_ascii_case(self.schema.name()) {
                return Err(CapabilityError::DatabaseMismatch {
                    expected: database.to_string(),
                    actual: self.schema.name().to_string(),
                });
            }
        }
        if !shape.versions().contains(self.schema.version()) {
            return Err(CapabilityError::SchemaVersionMismatch {
                actual: *self.schema.version(),
                range: *shape.versions(),
            });
        }
        Ok(())
    }
}
