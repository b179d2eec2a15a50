//! The immutable schema tree
//!
//! A [`DatabaseSchema`] is parsed once per schema document the server hands
//! out and never mutated afterwards. Its tables and columns are shared
//! through `Arc`, so rows and bound capabilities can hold on to the exact
//! schema objects they were decoded against.
//!
//! ## Module Structure
//!
//! - `column`: [`ColumnSchema`], a named [`ColumnType`](crate::ColumnType)
//! - `table`: [`TableSchema`], row and update construction
//! - `database`: [`DatabaseSchema`], the document root

pub mod column;
pub mod database;
pub mod table;

pub use column::ColumnSchema;
pub use database::DatabaseSchema;
pub use table::{TableSchema, UUID_COLUMN, VERSION_COLUMN};
