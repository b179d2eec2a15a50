//! Base types: the atoms a column type is built from
//!
//! A base type is parsed from a type document in one of two forms:
//!
//! ```text
//! "integer"
//! {"type": "string", "enum": ["set", ["access", "native-tagged"]]}
//! ```
//!
//! Constraints (`minInteger`, `maxLength`, `enum`, ...) are recorded but not
//! enforced. [`BaseType::validate`] exists as the seam for enforcement and
//! accepts every value.

use crate::error::{Error, Result};
use crate::value::{ReferencedRow, RowUuid, Value, UUID_TAG};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Strength of a uuid reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RefType {
    /// The referenced row cannot be deleted while referenced
    #[default]
    Strong,
    /// The reference is dropped when the referenced row goes away
    Weak,
}

impl FromStr for RefType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strong" => Ok(RefType::Strong),
            "weak" => Ok(RefType::Weak),
            other => Err(Error::schema_format(format!(
                "refType must be \"strong\" or \"weak\", got {:?}",
                other
            ))),
        }
    }
}

/// Variant tag of a [`BaseType`], without constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseKind {
    /// `boolean`
    Boolean,
    /// `integer`
    Integer,
    /// `real`
    Real,
    /// `string`
    String,
    /// `uuid`
    Uuid,
}

impl BaseKind {
    /// Keyword used for this kind in type documents
    pub const fn keyword(&self) -> &'static str {
        match self {
            BaseKind::Boolean => "boolean",
            BaseKind::Integer => "integer",
            BaseKind::Real => "real",
            BaseKind::String => "string",
            BaseKind::Uuid => "uuid",
        }
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Atomic value type with its declared constraints
///
/// Variant plus constraint fields fully determine equality. `BaseType` is
/// `PartialEq` only because `Real` carries float bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseType {
    /// `boolean`, no constraints
    Boolean,
    /// `integer`
    Integer {
        /// `minInteger`, defaults to `i64::MIN`
        min: i64,
        /// `maxInteger`, defaults to `i64::MAX`
        max: i64,
        /// Allowed values; empty when no `enum` was declared
        enums: BTreeSet<i64>,
    },
    /// `real`
    Real {
        /// `minReal`, defaults to `f64::MIN`
        min: f64,
        /// `maxReal`, defaults to `f64::MAX`
        max: f64,
        /// Allowed values; empty when no `enum` was declared
        enums: Vec<f64>,
    },
    /// `string`
    String {
        /// `minLength`, defaults to 0
        min_length: u64,
        /// `maxLength`, defaults to `u64::MAX`
        max_length: u64,
        /// Allowed values; empty when no `enum` was declared
        enums: BTreeSet<String>,
    },
    /// `uuid`
    Uuid {
        /// Table the referenced rows live in
        ref_table: Option<String>,
        /// Reference strength, defaults to strong
        ref_type: RefType,
    },
}

impl BaseType {
    /// Unconstrained uuid type, as used by the internally generated columns
    pub const UUID: BaseType = BaseType::Uuid {
        ref_table: None,
        ref_type: RefType::Strong,
    };

    // =========================================================================
    // Constructors
    // =========================================================================

    /// `integer` with default bounds
    pub fn integer() -> Self {
        BaseType::Integer {
            min: i64::MIN,
            max: i64::MAX,
            enums: BTreeSet::new(),
        }
    }

    /// `real` with default bounds
    pub fn real() -> Self {
        BaseType::Real {
            min: f64::MIN,
            max: f64::MAX,
            enums: Vec::new(),
        }
    }

    /// `string` with default bounds
    pub fn string() -> Self {
        BaseType::String {
            min_length: 0,
            max_length: u64::MAX,
            enums: BTreeSet::new(),
        }
    }

    /// `uuid` referencing rows of `table`
    pub fn uuid_ref(table: impl Into<String>, ref_type: RefType) -> Self {
        BaseType::Uuid {
            ref_table: Some(table.into()),
            ref_type,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Variant tag
    pub fn kind(&self) -> BaseKind {
        match self {
            BaseType::Boolean => BaseKind::Boolean,
            BaseType::Integer { .. } => BaseKind::Integer,
            BaseType::Real { .. } => BaseKind::Real,
            BaseType::String { .. } => BaseKind::String,
            BaseType::Uuid { .. } => BaseKind::Uuid,
        }
    }

    /// Referenced table of a `uuid` type
    pub fn ref_table(&self) -> Option<&str> {
        match self {
            BaseType::Uuid { ref_table, .. } => ref_table.as_deref(),
            _ => None,
        }
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parse the base type stored under `key` (`"key"` or `"value"`)
    ///
    /// A bare keyword node is read directly. An object node must carry
    /// `key`, whose child is either a keyword or `{"type": <keyword>, ...}`.
    ///
    /// Returns `Ok(None)` when the keyword is not recognized, so the caller
    /// can try the next candidate shape.
    pub fn from_document(node: &JsonValue, key: &str) -> Result<Option<BaseType>> {
        match node {
            JsonValue::Object(fields) => {
                let child = fields.get(key).ok_or_else(|| {
                    Error::schema_format(format!("not a type: missing {:?} in {}", key, node))
                })?;
                Self::from_type_node(child)
            }
            JsonValue::Array(_) => Ok(None),
            scalar => Ok(scalar_text(scalar).and_then(|kw| kw.trim().parse().ok())),
        }
    }

    fn from_type_node(node: &JsonValue) -> Result<Option<BaseType>> {
        if let Some(keyword) = node.as_str() {
            return Ok(keyword.trim().parse().ok());
        }
        let keyword = match node.get("type").and_then(JsonValue::as_str) {
            Some(keyword) => keyword.trim(),
            None => return Ok(None),
        };
        match keyword.parse::<BaseType>() {
            Ok(mut base) => {
                base.read_constraints(node)?;
                Ok(Some(base))
            }
            Err(_) => Ok(None),
        }
    }

    fn read_constraints(&mut self, node: &JsonValue) -> Result<()> {
        match self {
            BaseType::Boolean => {}
            BaseType::Integer { min, max, enums } => {
                if let Some(v) = node.get("minInteger").and_then(JsonValue::as_i64) {
                    *min = v;
                }
                if let Some(v) = node.get("maxInteger").and_then(JsonValue::as_i64) {
                    *max = v;
                }
                enums.extend(enum_atoms(node).filter_map(JsonValue::as_i64));
            }
            BaseType::Real { min, max, enums } => {
                if let Some(v) = node.get("minReal").and_then(JsonValue::as_f64) {
                    *min = v;
                }
                if let Some(v) = node.get("maxReal").and_then(JsonValue::as_f64) {
                    *max = v;
                }
                for v in enum_atoms(node).filter_map(JsonValue::as_f64) {
                    if !enums.contains(&v) {
                        enums.push(v);
                    }
                }
            }
            BaseType::String {
                min_length,
                max_length,
                enums,
            } => {
                if let Some(v) = node.get("minLength").and_then(JsonValue::as_u64) {
                    *min_length = v;
                }
                if let Some(v) = node.get("maxLength").and_then(JsonValue::as_u64) {
                    *max_length = v;
                }
                enums.extend(enum_atoms(node).filter_map(scalar_text));
            }
            BaseType::Uuid {
                ref_table,
                ref_type,
            } => {
                *ref_table = node
                    .get("refTable")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string);
                *ref_type = match node.get("refType").and_then(JsonValue::as_str) {
                    Some(s) => s.parse()?,
                    None => RefType::Strong,
                };
            }
        }
        Ok(())
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decode one scalar wire value
    ///
    /// Returns `None` when the node does not have the shape this type expects.
    ///
    /// For `uuid`, a `["uuid", id]` pair decodes to [`Value::Uuid`]; any
    /// other node is taken to be the referenced row itself and decodes to a
    /// [`Value::ReferencedRow`] carrying `refTable` and the raw node.
    pub fn to_value(&self, node: &JsonValue) -> Option<Value> {
        match self {
            BaseType::Boolean => node.as_bool().map(Value::Boolean),
            BaseType::Integer { .. } => node.as_i64().map(Value::Integer),
            BaseType::Real { .. } => node.as_f64().map(Value::Real),
            BaseType::String { .. } => node.as_str().map(|s| Value::String(s.to_string())),
            BaseType::Uuid { ref_table, .. } => match uuid_reference(node) {
                Some(id) => id.parse::<RowUuid>().ok().map(Value::Uuid),
                None => Some(Value::ReferencedRow(ReferencedRow::new(
                    ref_table.clone(),
                    node.clone(),
                ))),
            },
        }
    }

    /// Check `value` against the declared constraints
    ///
    /// Constraints are recorded only; every value is accepted.
    pub fn validate(&self, _value: &Value) -> Result<()> {
        Ok(())
    }
}

impl FromStr for BaseType {
    type Err = Error;

    /// Parse a bare keyword into an unconstrained base type
    fn from_str(keyword: &str) -> Result<Self> {
        match keyword {
            "boolean" => Ok(BaseType::Boolean),
            "integer" => Ok(BaseType::integer()),
            "real" => Ok(BaseType::real()),
            "string" => Ok(BaseType::string()),
            "uuid" => Ok(BaseType::UUID),
            other => Err(Error::unknown_base_type(other)),
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ref_table() {
            Some(table) => write!(f, "uuid->{}", table),
            None => f.write_str(self.kind().keyword()),
        }
    }
}

/// Text of a scalar node, numbers rendered the way they were sent
fn scalar_text(node: &JsonValue) -> Option<String> {
    match node {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Atoms listed by an `enum` constraint: `["set", [...]]` or a single atom
fn enum_atoms(node: &JsonValue) -> Box<dyn Iterator<Item = &JsonValue> + '_> {
    match node.get("enum") {
        Some(JsonValue::Array(tagged)) => match tagged.get(1) {
            Some(JsonValue::Array(atoms)) => Box::new(atoms.iter()),
            _ => Box::new(std::iter::empty()),
        },
        Some(atom) => Box::new(std::iter::once(atom)),
        None => Box::new(std::iter::empty()),
    }
}

/// The id string of a `["uuid", id]` pair
pub(crate) fn uuid_reference(node: &JsonValue) -> Option<&str> {
    match node.as_array().map(Vec::as_slice) {
        Some([tag, id]) if tag.as_str() == Some(UUID_TAG) => id.as_str(),
        _ => None,
    }
}
