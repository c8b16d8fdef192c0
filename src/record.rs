//! Test case records as declared by extractor test tables.
//!
//! A record is an insertion-ordered mapping from string keys to heterogeneous
//! values. Most values map directly onto JSON, but extractor tables also carry
//! native values JSON has no spelling for (type markers such as `int`,
//! compiled patterns, predicates). Those are kept as [`OpaqueValue`] and left
//! to the encoder's fallback policy.

use std::fmt;

use regex::Regex;
use serde_json::{Map, Value};

/// Top-level key whose presence excludes a record from export.
pub const SKIP_KEY: &str = "skip";

/// Test case record. Records are plain ordered maps; the alias names their role.
pub type TestCaseRecord = CaseMap;

/// Insertion-ordered string-keyed map of case values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseMap {
    fields: Vec<(String, CaseValue)>,
}

impl CaseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by the static extractor tables.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CaseValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<CaseValue>,
    ) -> Option<CaseValue> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&CaseValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// True when the map carries a top-level `skip` key, whatever its value.
    pub fn is_skipped(&self) -> bool {
        self.contains_key(SKIP_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CaseValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a map from a parsed JSON object, keeping the object's key order.
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        Self {
            fields: object
                .into_iter()
                .map(|(key, value)| (key, CaseValue::from(value)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<CaseValue>> FromIterator<(K, V)> for CaseMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = CaseMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// A single value inside a test case record.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<CaseValue>),
    Map(CaseMap),
    Opaque(OpaqueValue),
}

impl CaseValue {
    /// Marker standing for "any value of this type", e.g. `int` for view counts.
    pub fn type_marker(name: &'static str) -> Self {
        CaseValue::Opaque(OpaqueValue::TypeMarker(name))
    }

    pub fn pattern(pattern: Regex) -> Self {
        CaseValue::Opaque(OpaqueValue::Pattern(pattern))
    }

    pub fn list<T: Into<CaseValue>>(items: impl IntoIterator<Item = T>) -> Self {
        CaseValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CaseValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&CaseMap> {
        match self {
            CaseValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, CaseValue::Opaque(_))
    }
}

impl From<Value> for CaseValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CaseValue::Null,
            Value::Bool(flag) => CaseValue::Bool(flag),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    CaseValue::Int(int)
                } else if let Some(uint) = number.as_u64() {
                    CaseValue::UInt(uint)
                } else {
                    CaseValue::Float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(text) => CaseValue::Str(text),
            Value::Array(items) => {
                CaseValue::List(items.into_iter().map(CaseValue::from).collect())
            }
            Value::Object(object) => CaseValue::Map(CaseMap::from_json_object(object)),
        }
    }
}

impl From<&str> for CaseValue {
    fn from(value: &str) -> Self {
        CaseValue::Str(value.to_string())
    }
}

impl From<String> for CaseValue {
    fn from(value: String) -> Self {
        CaseValue::Str(value)
    }
}

impl From<bool> for CaseValue {
    fn from(value: bool) -> Self {
        CaseValue::Bool(value)
    }
}

impl From<i32> for CaseValue {
    fn from(value: i32) -> Self {
        CaseValue::Int(i64::from(value))
    }
}

impl From<i64> for CaseValue {
    fn from(value: i64) -> Self {
        CaseValue::Int(value)
    }
}

impl From<u64> for CaseValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(int) => CaseValue::Int(int),
            Err(_) => CaseValue::UInt(value),
        }
    }
}

impl From<f64> for CaseValue {
    fn from(value: f64) -> Self {
        CaseValue::Float(value)
    }
}

impl From<CaseMap> for CaseValue {
    fn from(value: CaseMap) -> Self {
        CaseValue::Map(value)
    }
}

impl From<OpaqueValue> for CaseValue {
    fn from(value: OpaqueValue) -> Self {
        CaseValue::Opaque(value)
    }
}

impl<T: Into<CaseValue>> From<Vec<T>> for CaseValue {
    fn from(value: Vec<T>) -> Self {
        CaseValue::list(value)
    }
}

impl<T: Into<CaseValue>> From<Option<T>> for CaseValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CaseValue::Null)
    }
}

/// Native values with no JSON representation.
#[derive(Clone)]
pub enum OpaqueValue {
    /// A type standing in for "any value of this type".
    TypeMarker(&'static str),
    /// A compiled pattern.
    Pattern(Regex),
    /// A named function from the test table.
    Callable(Callable),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl OpaqueValue {
    /// Short human-readable rendering, used by descriptive encoders and `Debug`.
    pub fn describe(&self) -> String {
        match self {
            OpaqueValue::TypeMarker(name) => format!("<{name}>"),
            OpaqueValue::Pattern(pattern) => format!("re:{}", pattern.as_str()),
            OpaqueValue::Callable(callable) => format!("<function {}>", callable.name()),
            OpaqueValue::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.describe())
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OpaqueValue::TypeMarker(a), OpaqueValue::TypeMarker(b)) => a == b,
            (OpaqueValue::Pattern(a), OpaqueValue::Pattern(b)) => a.as_str() == b.as_str(),
            (OpaqueValue::Callable(a), OpaqueValue::Callable(b)) => a == b,
            (OpaqueValue::Bytes(a), OpaqueValue::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

/// Named function attached to a record field.
///
/// Only the name survives: the exporter never evaluates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    name: &'static str,
}

impl Callable {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
