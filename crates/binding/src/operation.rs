//! Operation declarations
//!
//! A capability shape is a set of named operations. Each one is declared
//! either explicitly (kind and column given) or by name alone, in which
//! case the kind and column are inferred from the accessor convention:
//!
//! | Name                 | Kind        | Column        |
//! |----------------------|-------------|---------------|
//! | `set<Name>`          | `SetData`   | `<name>`      |
//! | `get<Anything>Row`   | `GetRow`    | none          |
//! | `get<Name>Column`    | `GetColumn` | `<name>`      |
//! | `get<Name>`          | `GetData`   | `<name>`      |
//!
//! `<name>` is `<Name>` with its first letter lower-cased. Column lookup
//! falls back to a case-insensitive match, so `getExternalIds` also finds a
//! column spelled `externalids`. `GetTableSchema` has no convention and is
//! only available through explicit declaration.

use crate::error::{CapabilityError, Result};
use ovsdb_core::{BaseKind, ColumnType, VersionRange};
use std::fmt;

const GET_PREFIX: &str = "get";
const SET_PREFIX: &str = "set";
const ROW_SUFFIX: &str = "Row";
const COLUMN_SUFFIX: &str = "Column";

// ============================================================================
// OperationKind
// ============================================================================

/// What an operation does when invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Return the resolved table schema
    GetTableSchema,
    /// Return the bound row
    GetRow,
    /// Return one column's value from the bound row
    GetData,
    /// Return one column's schema together with its value
    GetColumn,
    /// Write one column's value into the bound row
    SetData,
}

impl OperationKind {
    /// True for kinds that address a single column
    pub fn is_column_scoped(&self) -> bool {
        matches!(
            self,
            OperationKind::GetData | OperationKind::GetColumn | OperationKind::SetData
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::GetTableSchema => "GetTableSchema",
            OperationKind::GetRow => "GetRow",
            OperationKind::GetData => "GetData",
            OperationKind::GetColumn => "GetColumn",
            OperationKind::SetData => "SetData",
        };
        f.write_str(name)
    }
}

// ============================================================================
// ExpectedType
// ============================================================================

/// Shape of value an operation expects its column to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpectedType {
    /// Any column type
    #[default]
    Any,
    /// Single-valued column of this kind
    Scalar(BaseKind),
    /// Multi-valued atomic column of this element kind
    Set(BaseKind),
    /// Key-valued column with these key and value kinds
    Map(BaseKind, BaseKind),
}

impl ExpectedType {
    /// True if `column_type` has the expected shape
    pub fn matches(&self, column_type: &ColumnType) -> bool {
        let value_kind = column_type.value_type().kind();
        match *self {
            ExpectedType::Any => true,
            ExpectedType::Scalar(kind) => {
                !column_type.is_key_valued() && !column_type.is_multi_valued() && value_kind == kind
            }
            ExpectedType::Set(kind) => {
                !column_type.is_key_valued() && column_type.is_multi_valued() && value_kind == kind
            }
            ExpectedType::Map(key, value) => {
                column_type.key_kind() == Some(key) && value_kind == value
            }
        }
    }
}

// ============================================================================
// OperationDecl
// ============================================================================

/// One declared operation of a capability shape
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDecl {
    name: String,
    explicit: Option<(OperationKind, Option<String>)>,
    expected: ExpectedType,
    versions: VersionRange,
    declared_versions: Option<(String, String)>,
}

impl OperationDecl {
    /// Declare by name; kind and column follow the accessor convention
    pub fn inferred(name: impl Into<String>) -> Self {
        OperationDecl {
            name: name.into(),
            explicit: None,
            expected: ExpectedType::Any,
            versions: VersionRange::ALL,
            declared_versions: None,
        }
    }

    /// Declare with explicit kind and column
    ///
    /// `column` is ignored for `GetRow` and `GetTableSchema`.
    pub fn explicit(name: impl Into<String>, kind: OperationKind, column: Option<&str>) -> Self {
        OperationDecl {
            name: name.into(),
            explicit: Some((kind, column.map(str::to_string))),
            expected: ExpectedType::Any,
            versions: VersionRange::ALL,
            declared_versions: None,
        }
    }

    /// Require the column to have this shape
    pub fn expecting(mut self, expected: ExpectedType) -> Self {
        self.expected = expected;
        self
    }

    /// Restrict the schema versions this operation works against
    pub fn versions(mut self, versions: VersionRange) -> Self {
        self.versions = versions;
        self.declared_versions = None;
        self
    }

    /// Restrict the schema versions from declared bound strings
    ///
    /// `"0.0.0"` leaves that end open. The strings are parsed when the
    /// shape is resolved, and a malformed one fails resolution with
    /// [`CapabilityError::InvalidVersionBound`]. The later of this and
    /// [`versions`](Self::versions) wins.
    pub fn versions_declared(mut self, from: &str, until: &str) -> Self {
        self.declared_versions = Some((from.to_string(), until.to_string()));
        self
    }

    /// Declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve kind and column
    pub fn resolve(&self) -> Result<ResolvedOperation> {
        let (kind, column) = match &self.explicit {
            Some((kind, column)) => {
                let column = if kind.is_column_scoped() {
                    Some(column.clone().ok_or_else(|| CapabilityError::CapabilityBinding {
                        operation: self.name.clone(),
                    })?)
                } else {
                    None
                };
                (*kind, column)
            }
            None => infer(&self.name).ok_or_else(|| CapabilityError::CapabilityBinding {
                operation: self.name.clone(),
            })?,
        };
        let versions = match &self.declared_versions {
            Some((from, until)) => VersionRange::from_declared(from, until).map_err(|e| {
                CapabilityError::InvalidVersionBound {
                    operation: self.name.clone(),
                    detail: e.to_string(),
                }
            })?,
            None => self.versions,
        };
        Ok(ResolvedOperation {
            name: self.name.clone(),
            kind,
            column,
            expected: self.expected,
            versions,
        })
    }
}

/// Apply the accessor naming convention
fn infer(name: &str) -> Option<(OperationKind, Option<String>)> {
    if let Some(tail) = name.strip_prefix(SET_PREFIX) {
        return column_name(tail).map(|c| (OperationKind::SetData, Some(c)));
    }
    let tail = name.strip_prefix(GET_PREFIX)?;
    if name.ends_with(ROW_SUFFIX) {
        return Some((OperationKind::GetRow, None));
    }
    if let Some(column) = tail.strip_suffix(COLUMN_SUFFIX) {
        return column_name(column).map(|c| (OperationKind::GetColumn, Some(c)));
    }
    column_name(tail).map(|c| (OperationKind::GetData, Some(c)))
}

fn column_name(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

// ============================================================================
// ResolvedOperation
// ============================================================================

/// An operation with its kind and column known
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOperation {
    name: String,
    kind: OperationKind,
    column: Option<String>,
    expected: ExpectedType,
    versions: VersionRange,
}

impl ResolvedOperation {
    /// Declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operation kind
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Column name, for column-scoped kinds
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Expected column shape
    pub fn expected(&self) -> ExpectedType {
        self.expected
    }

    /// Supported schema versions
    pub fn versions(&self) -> &VersionRange {
        &self.versions
    }
}
