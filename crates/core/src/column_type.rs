//! Column types: base types plus cardinality
//!
//! A column type document is either a bare keyword or an object:
//!
//! ```text
//! "string"
//! {"key": "string", "min": 0, "max": "unlimited"}
//! {"key": "string", "value": "integer", "min": 0, "max": "unlimited"}
//! ```
//!
//! Objects without `value` are *atomic* (scalar or set); objects with
//! `value` are *key-valued* (map). `min`/`max` default to 1, and a column is
//! multi-valued exactly when `min != max`.

use crate::base_type::{BaseKind, BaseType};
use crate::error::{Error, Result};
use crate::value::{Value, ValueMap, ValueSet, MAP_TAG, SET_TAG};
use serde_json::Value as JsonValue;
use std::fmt;

/// Cardinality used for `"max": "unlimited"`
pub const UNLIMITED: u64 = u64::MAX;

/// Declared type of a column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnType {
    value_type: BaseType,
    key_type: Option<BaseType>,
    min: u64,
    max: u64,
}

impl ColumnType {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Single-valued atomic column (`min = max = 1`)
    pub fn atomic(value_type: BaseType) -> Self {
        ColumnType {
            value_type,
            key_type: None,
            min: 1,
            max: 1,
        }
    }

    /// Key-valued column with cardinality `1..1`
    ///
    /// Use [`ColumnType::with_cardinality`] for the usual `0..unlimited` map.
    pub fn key_valued(key_type: BaseType, value_type: BaseType) -> Self {
        ColumnType {
            value_type,
            key_type: Some(key_type),
            min: 1,
            max: 1,
        }
    }

    /// Replace the cardinality bounds
    pub fn with_cardinality(mut self, min: u64, max: u64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Base type of the stored values (the set element type for sets)
    pub fn value_type(&self) -> &BaseType {
        &self.value_type
    }

    /// Base type of map keys, `None` for atomic columns
    pub fn key_type(&self) -> Option<&BaseType> {
        self.key_type.as_ref()
    }

    /// Minimum number of elements
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Maximum number of elements, [`UNLIMITED`] when unbounded
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Check if this column holds a set or map rather than one scalar
    pub fn is_multi_valued(&self) -> bool {
        self.min != self.max
    }

    /// Check if this column holds a map
    pub fn is_key_valued(&self) -> bool {
        self.key_type.is_some()
    }

    /// Kind of the map key type, if any
    pub fn key_kind(&self) -> Option<BaseKind> {
        self.key_type.as_ref().map(BaseType::kind)
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parse a column type document
    ///
    /// The atomic shape is tried first, then the key-valued shape.
    pub fn from_document(node: &JsonValue) -> Result<ColumnType> {
        if let Some(atomic) = Self::atomic_from_document(node)? {
            return Ok(atomic);
        }
        if let Some(key_valued) = Self::key_valued_from_document(node)? {
            return Ok(key_valued);
        }
        Err(Error::schema_format(format!(
            "unable to parse column type from {}",
            node
        )))
    }

    fn atomic_from_document(node: &JsonValue) -> Result<Option<ColumnType>> {
        if node.get("value").is_some() {
            return Ok(None);
        }
        Ok(BaseType::from_document(node, "key")?
            .map(|base| ColumnType::atomic(base).read_cardinality(node)))
    }

    fn key_valued_from_document(node: &JsonValue) -> Result<Option<ColumnType>> {
        if !node.is_object() || node.get("value").is_none() {
            return Ok(None);
        }
        let key_type = BaseType::from_document(node, "key")?;
        let value_type = BaseType::from_document(node, "value")?;
        Ok(match (key_type, value_type) {
            (Some(k), Some(v)) => Some(ColumnType::key_valued(k, v).read_cardinality(node)),
            _ => None,
        })
    }

    fn read_cardinality(mut self, node: &JsonValue) -> Self {
        if let Some(min) = node.get("min").and_then(JsonValue::as_u64) {
            self.min = min;
        }
        match node.get("max") {
            Some(JsonValue::String(s)) if s == "unlimited" => self.max = UNLIMITED,
            Some(max) => {
                if let Some(max) = max.as_u64() {
                    self.max = max;
                }
            }
            None => {}
        }
        self
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decode a wire value according to this column's shape
    ///
    /// Returns `None` ("no value") for wire shapes that do not fit; this is
    /// never an error.
    ///
    /// Multi-valued atomic columns always yield a set:
    /// - `["set", [..]]` decodes each element;
    /// - any other two-element array, or a non-array, is one element;
    /// - an array of any other length yields an empty set.
    ///
    /// Multi-valued key-valued columns yield a map for `["map", [[k, v], ..]]`
    /// (duplicate keys: last write wins) and `None` for every other shape,
    /// including the empty array.
    pub fn value_from_json(&self, node: &JsonValue) -> Option<Value> {
        if !self.is_multi_valued() {
            return self.value_type.to_value(node);
        }
        match &self.key_type {
            None => Some(Value::Set(self.set_from_json(node))),
            Some(key_type) => self.map_from_json(key_type, node).map(Value::Map),
        }
    }

    fn set_from_json(&self, node: &JsonValue) -> ValueSet {
        let mut set = ValueSet::new();
        match node.as_array() {
            Some(items) if items.len() == 2 => {
                if items[0].as_str() == Some(SET_TAG) {
                    let elements = items[1].as_array().map(Vec::as_slice).unwrap_or_default();
                    for element in elements {
                        if let Some(value) = self.value_type.to_value(element) {
                            set.insert(value);
                        }
                    }
                } else if let Some(value) = self.value_type.to_value(node) {
                    set.insert(value);
                }
            }
            // Arrays of any other length are left empty.
            Some(_) => {}
            None => {
                if let Some(value) = self.value_type.to_value(node) {
                    set.insert(value);
                }
            }
        }
        set
    }

    fn map_from_json(&self, key_type: &BaseType, node: &JsonValue) -> Option<ValueMap> {
        let items = node.as_array()?;
        if items.len() != 2 || items[0].as_str() != Some(MAP_TAG) {
            return None;
        }
        let mut map = ValueMap::new();
        for pair in items[1].as_array()? {
            if let Some([k, v]) = pair.as_array().map(Vec::as_slice) {
                if let (Some(key), Some(value)) = (key_type.to_value(k), self.value_type.to_value(v)) {
                    map.insert(key, value);
                }
            }
        }
        Some(map)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.key_type, self.is_multi_valued()) {
            (Some(key), _) => write!(f, "map<{}, {}>", key, self.value_type)?,
            (None, true) => write!(f, "set<{}>", self.value_type)?,
            (None, false) => return write!(f, "{}", self.value_type),
        }
        if self.max == UNLIMITED {
            write!(f, "[{}..unlimited]", self.min)
        } else {
            write!(f, "[{}..{}]", self.min, self.max)
        }
    }
}
