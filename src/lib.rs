//! ovsdb-typed - schema-driven values and typed capabilities for OVSDB-style databases
//!
//! Servers in this protocol family advertise their tables, columns and value
//! shapes at runtime. This crate decodes values against that advertised
//! schema and binds caller-declared table views ("capability shapes") to it.
//!
//! # Architecture
//!
//! - [`ovsdb_core`] (re-exported at the root): versions, base and column
//!   types, the schema tree, decoded values, rows and update batches
//! - [`binding`]: shape declaration, the shape registry, activation and
//!   bound capabilities
//!
//! Transport, connection handling and monitor orchestration are left to the
//! caller; this crate only consumes the documents they deliver.

pub use ovsdb_core::*;

/// Capability binding, re-exported from `ovsdb-binding`
pub mod binding {
    pub use ovsdb_binding::*;
}
