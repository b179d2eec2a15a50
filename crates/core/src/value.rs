//! Decoded column values
//!
//! This module defines:
//! - Value: the runtime representation of one decoded column value
//! - ValueSet / ValueMap: the multi-valued shapes
//! - RowUuid: a concrete row identifier
//! - ReferencedRow: the placeholder produced for an expanded uuid value
//!
//! ## Wire shapes
//!
//! | Value          | Wire form                          |
//! |----------------|------------------------------------|
//! | scalar         | bare JSON bool / number / string   |
//! | `Set`          | `["set", [<v>, ...]]`              |
//! | `Map`          | `["map", [[<k>, <v>], ...]]`       |
//! | `Uuid`         | `["uuid", "<uuid-string>"]`        |
//! | `ReferencedRow`| the raw node it was decoded from   |
//!
//! Decoding lives with the column types (`BaseType::to_value`,
//! `ColumnType::value_from_json`) because the wire shape alone is ambiguous.
//! Encoding only needs the value itself, so it lives here.

use serde::{Serialize, Serializer};
use serde_json::{json, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::{btree_set, BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Wire tag of an encoded set
pub const SET_TAG: &str = "set";
/// Wire tag of an encoded map
pub const MAP_TAG: &str = "map";
/// Wire tag of an encoded uuid reference
pub const UUID_TAG: &str = "uuid";

// ============================================================================
// RowUuid
// ============================================================================

/// Concrete row identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowUuid(uuid::Uuid);

impl RowUuid {
    /// Wrap an existing uuid
    pub const fn new(uuid: uuid::Uuid) -> Self {
        RowUuid(uuid)
    }

    /// The underlying uuid
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl FromStr for RowUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(RowUuid)
    }
}

impl From<uuid::Uuid> for RowUuid {
    fn from(uuid: uuid::Uuid) -> Self {
        RowUuid(uuid)
    }
}

impl fmt::Display for RowUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

// ============================================================================
// ReferencedRow
// ============================================================================

/// A uuid-typed value that arrived as an expanded document
///
/// Callers sometimes hand in the referenced row itself instead of a
/// `["uuid", id]` reference. The document is kept verbatim together with
/// the table the column points at, and resolving it is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencedRow {
    ref_table: Option<String>,
    document: JsonValue,
}

impl ReferencedRow {
    /// Create a placeholder for `document` pointing into `ref_table`
    pub fn new(ref_table: Option<String>, document: JsonValue) -> Self {
        ReferencedRow {
            ref_table,
            document,
        }
    }

    /// Table declared by the column's `refTable`
    pub fn ref_table(&self) -> Option<&str> {
        self.ref_table.as_deref()
    }

    /// The raw node as it was received
    pub fn document(&self) -> &JsonValue {
        &self.document
    }
}

// ============================================================================
// Collection keys
// ============================================================================

/// A value under [`Value::total_cmp`], so it can key an ordered collection
#[derive(Debug, Clone)]
struct Keyed(Value);

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// ============================================================================
// ValueSet
// ============================================================================

/// Unordered set of decoded values
///
/// Elements are unique under [`Value::total_cmp`] and iterate in that
/// order. Equality compares elements with `Value`'s own `PartialEq`.
#[derive(Debug, Clone, Default)]
pub struct ValueSet(BTreeSet<Keyed>);

impl ValueSet {
    /// Create an empty set
    pub fn new() -> Self {
        ValueSet(BTreeSet::new())
    }

    /// Insert a value, returning `false` if it was already present
    pub fn insert(&mut self, value: Value) -> bool {
        self.0.insert(Keyed(value))
    }

    /// Check membership
    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(&Keyed(value.clone()))
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set has no elements
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in [`Value::total_cmp`] order
    pub fn iter(&self) -> ValueSetIter<'_> {
        ValueSetIter(self.0.iter())
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueSet(iter.into_iter().map(Keyed).collect())
    }
}

/// Borrowing iterator over a [`ValueSet`]
#[derive(Debug, Clone)]
pub struct ValueSetIter<'a>(btree_set::Iter<'a, Keyed>);

impl<'a> Iterator for ValueSetIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|k| &k.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for ValueSetIter<'_> {}

/// Owning iterator over a [`ValueSet`]
#[derive(Debug)]
pub struct ValueSetIntoIter(btree_set::IntoIter<Keyed>);

impl Iterator for ValueSetIntoIter {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|k| k.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for ValueSetIntoIter {}

impl IntoIterator for ValueSet {
    type Item = Value;
    type IntoIter = ValueSetIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        ValueSetIntoIter(self.0.into_iter())
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = ValueSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// ValueMap
// ============================================================================

/// Unordered key/value map of decoded values
///
/// Keys are unique under [`Value::total_cmp`]; inserting an existing key
/// replaces its value. Equality ignores insertion order.
#[derive(Debug, Clone, Default)]
pub struct ValueMap(BTreeMap<Keyed, Value>);

impl ValueMap {
    /// Create an empty map
    pub fn new() -> Self {
        ValueMap(BTreeMap::new())
    }

    /// Insert a pair, returning the value previously stored under `key`
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(Keyed(key), value)
    }

    /// Look up the value stored under `key`
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(&Keyed(key.clone()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter().map(|(k, v)| (&k.0, v))
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl FromIterator<(Value, Value)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        ValueMap(iter.into_iter().map(|(k, v)| (Keyed(k), v)).collect())
    }
}

// ============================================================================
// Value
// ============================================================================

/// Decoded value of one column
///
/// Which variant a wire value decodes to is decided by the column type,
/// never by the wire value alone.
///
/// Float equality follows IEEE-754 semantics, so `Value` is `PartialEq` only.
/// Collections key their elements by [`Value::total_cmp`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `boolean` column value
    Boolean(bool),
    /// `integer` column value
    Integer(i64),
    /// `real` column value
    Real(f64),
    /// `string` column value
    String(String),
    /// `uuid` column value given as a `["uuid", id]` reference
    Uuid(RowUuid),
    /// `uuid` column value given as an expanded document
    ReferencedRow(ReferencedRow),
    /// Multi-valued atomic column value
    Set(ValueSet),
    /// Key/value column value
    Map(ValueMap),
}

impl Value {
    /// Total order over values, used to key sets and maps
    ///
    /// Variants order as declared. `Real` uses [`f64::total_cmp`], so
    /// `NaN` equals itself and `-0.0` sorts before `0.0` here even though
    /// `==` says otherwise.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Real(a), Value::Real(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::ReferencedRow(a), Value::ReferencedRow(b)) => a
                .ref_table
                .cmp(&b.ref_table)
                .then_with(|| a.document.to_string().cmp(&b.document.to_string())),
            (Value::Set(a), Value::Set(b)) => a.len().cmp(&b.len()).then_with(|| {
                a.iter()
                    .zip(b.iter())
                    .map(|(x, y)| x.total_cmp(y))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            }),
            (Value::Map(a), Value::Map(b)) => a.len().cmp(&b.len()).then_with(|| {
                a.iter()
                    .zip(b.iter())
                    .map(|((ka, va), (kb, vb))| ka.total_cmp(kb).then_with(|| va.total_cmp(vb)))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            }),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Boolean(_) => 0,
            Value::Integer(_) => 1,
            Value::Real(_) => 2,
            Value::String(_) => 3,
            Value::Uuid(_) => 4,
            Value::ReferencedRow(_) => 5,
            Value::Set(_) => 6,
            Value::Map(_) => 7,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::String(_) => "string",
            Value::Uuid(_) => "uuid",
            Value::ReferencedRow(_) => "referenced-row",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// Get as bool if this is a Boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Integer value
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Real value
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the identifier if this is a Uuid value
    pub fn as_uuid(&self) -> Option<&RowUuid> {
        match self {
            Value::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Get the placeholder if this is a ReferencedRow value
    pub fn as_referenced_row(&self) -> Option<&ReferencedRow> {
        match self {
            Value::ReferencedRow(r) => Some(r),
            _ => None,
        }
    }

    /// Get as a set if this is a Set value
    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a map if this is a Map value
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Encode to the protocol's wire form
    ///
    /// Sets are always emitted tagged, even with a single element.
    /// A non-finite `Real` has no JSON form and encodes as `null`.
    pub fn to_wire(&self) -> JsonValue {
        match self {
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Integer(i) => JsonValue::from(*i),
            Value::Real(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Uuid(u) => json!([UUID_TAG, u.to_string()]),
            Value::ReferencedRow(r) => r.document.clone(),
            Value::Set(set) => {
                let elements: Vec<JsonValue> = set.iter().map(Value::to_wire).collect();
                json!([SET_TAG, elements])
            }
            Value::Map(map) => {
                let pairs: Vec<JsonValue> = map
                    .iter()
                    .map(|(k, v)| JsonValue::Array(vec![k.to_wire(), v.to_wire()]))
                    .collect();
                json!([MAP_TAG, pairs])
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Uuid(u) => write!(f, "{}", u),
            Value::ReferencedRow(r) => write!(f, "{}", r.document),
            Value::Set(set) => {
                write!(f, "[")?;
                for (i, v) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Real(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<RowUuid> for Value {
    fn from(u: RowUuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<ValueSet> for Value {
    fn from(s: ValueSet) -> Self {
        Value::Set(s)
    }
}

impl From<ValueMap> for Value {
    fn from(m: ValueMap) -> Self {
        Value::Map(m)
    }
}
