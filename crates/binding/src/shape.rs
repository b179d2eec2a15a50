//! Capability shapes
//!
//! A shape is a Rust type that names one table and declares the operations
//! calling code wants over it. The declaration does not depend on any
//! database schema or row, so it is resolved once per shape type and the
//! [`ResolvedShape`] is shared from then on.
//!
//! # Example
//!
//! ```
//! use ovsdb_binding::{OperationDecl, OperationKind, ShapeDeclaration, TableShape};
//!
//! struct Bridge;
//!
//! impl TableShape for Bridge {
//!     const TABLE: &'static str = "Bridge";
//!
//!     fn declare(shape: &mut ShapeDeclaration) {
//!         shape
//!             .operation(OperationDecl::inferred("getName"))
//!             .operation(OperationDecl::inferred("setName"))
//!             .operation(OperationDecl::explicit("schema", OperationKind::GetTableSchema, None));
//!     }
//! }
//! ```

use crate::error::Result;
use crate::operation::{OperationDecl, ResolvedOperation};
use ovsdb_core::VersionRange;
use std::collections::HashMap;
use tracing::debug;

/// A typed view over one table
pub trait TableShape: 'static {
    /// Table the shape is declared over
    const TABLE: &'static str;

    /// Database the table belongs to, compared case-insensitively when binding
    const DATABASE: Option<&'static str> = None;

    /// Schema versions the table itself is supported in
    const VERSIONS: VersionRange = VersionRange::ALL;

    /// Declare the shape's operations
    fn declare(shape: &mut ShapeDeclaration);
}

/// Collects operation declarations for one shape
#[derive(Debug, Default)]
pub struct ShapeDeclaration {
    operations: Vec<OperationDecl>,
}

impl ShapeDeclaration {
    /// Add an operation
    ///
    /// Declaring the same name twice keeps the later declaration.
    pub fn operation(&mut self, decl: OperationDecl) -> &mut Self {
        self.operations.push(decl);
        self
    }
}

/// A shape with every operation resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShape {
    shape_name: &'static str,
    table: &'static str,
    database: Option<&'static str>,
    versions: VersionRange,
    operations: Vec<ResolvedOperation>,
    index: HashMap<String, usize>,
}

impl ResolvedShape {
    /// Resolve the declaration of `S`
    ///
    /// Fails with the first operation whose name matches no convention
    /// and carries no explicit metadata.
    pub fn resolve<S: TableShape>() -> Result<ResolvedShape> {
        let mut declaration = ShapeDeclaration::default();
        S::declare(&mut declaration);

        let mut operations: Vec<ResolvedOperation> = Vec::with_capacity(declaration.operations.len());
        let mut index = HashMap::with_capacity(declaration.operations.len());
        for decl in &declaration.operations {
            let resolved = decl.resolve()?;
            match index.get(resolved.name()) {
                Some(&slot) => operations[slot] = resolved,
                None => {
                    index.insert(resolved.name().to_string(), operations.len());
                    operations.push(resolved);
                }
            }
        }

        let shape_name = std::any::type_name::<S>();
        debug!(target: "ovsdb::binding", shape = shape_name, table = S::TABLE, operations = operations.len(), "Resolved capability shape");
        Ok(ResolvedShape {
            shape_name,
            table: S::TABLE,
            database: S::DATABASE,
            versions: S::VERSIONS,
            operations,
            index,
        })
    }

    /// Rust type name of the shape
    pub fn shape_name(&self) -> &'static str {
        self.shape_name
    }

    /// Table name
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Database name, if the shape declares one
    pub fn database(&self) -> Option<&'static str> {
        self.database
    }

    /// Table-level supported versions
    pub fn versions(&self) -> &VersionRange {
        &self.versions
    }

    /// Operations in declaration order
    pub fn operations(&self) -> &[ResolvedOperation] {
        &self.operations
    }

    /// Operation by name
    pub fn operation(&self, name: &str) -> Option<&ResolvedOperation> {
        self.position(name).map(|i| &self.operations[i])
    }

    /// Slot of an operation in [`operations`](Self::operations)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}
