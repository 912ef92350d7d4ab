//! Extensible attributes
//!
//! WAPI attaches user-defined key/value annotations to most objects under the
//! `extattrs` field. Each entry is wrapped on the wire:
//!
//! ```json
//! { "Site": { "value": "Blr" }, "Cloud API Owned": { "value": "True" } }
//! ```
//!
//! Boolean values travel as the strings `"True"` / `"False"`; WAPI rejects
//! native JSON booleans for string-typed attributes.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single extensible attribute value
///
/// Equality follows the wire form: `String("True")` equals `Bool(true)`,
/// since both travel as `"True"` and decode as `Bool`.
#[derive(Debug, Clone)]
pub enum EaValue {
    /// Free-form string
    String(String),
    /// Integer attribute
    Int(i64),
    /// Boolean, encoded as `"True"` / `"False"`
    Bool(bool),
    /// Multi-value attribute
    List(Vec<EaValue>),
}

impl EaValue {
    /// Wire string for a boolean attribute
    pub fn bool_literal(value: bool) -> &'static str {
        if value { "True" } else { "False" }
    }

    /// String form used in search filters
    pub fn to_filter_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Bool(b) => Self::bool_literal(*b).to_string(),
            Self::List(values) => values
                .iter()
                .map(Self::to_filter_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    fn from_json(value: serde_json::Value) -> Result<Self, String> {
        match value {
            serde_json::Value::String(s) => Ok(match s.as_str() {
                "True" => Self::Bool(true),
                "False" => Self::Bool(false),
                _ => Self::String(s),
            }),
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| format!("unsupported numeric attribute value: {n}")),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            other => Err(format!("unsupported attribute value: {other}")),
        }
    }
}

impl PartialEq for EaValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::String(s), Self::Bool(b)) | (Self::Bool(b), Self::String(s)) => {
                s == Self::bool_literal(*b)
            }
            _ => false,
        }
    }
}

impl Eq for EaValue {}

impl fmt::Display for EaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_filter_string())
    }
}

impl Serialize for EaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Bool(b) => serializer.serialize_str(Self::bool_literal(*b)),
            Self::List(values) => values.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for EaValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(raw).map_err(de::Error::custom)
    }
}

impl From<&str> for EaValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EaValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for EaValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for EaValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for EaValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for EaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<EaValue>> From<Vec<T>> for EaValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

#[derive(Serialize, Deserialize)]
struct WireEntry<V> {
    value: V,
}

/// Extensible attribute bag keyed by attribute name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ea(BTreeMap<String, EaValue>);

impl Ea {
    /// Create an empty attribute bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) an attribute
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<EaValue>) -> Option<EaValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder form of [`Ea::insert`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<EaValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up an attribute
    pub fn get(&self, name: &str) -> Option<&EaValue> {
        self.0.get(name)
    }

    /// Drop an attribute, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<EaValue> {
        self.0.remove(name)
    }

    /// Whether `name` is set
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attribute names in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate attributes in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EaValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every attribute of `other` into `self`, overwriting existing names
    pub fn extend_from(&mut self, other: &Ea) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Apply an add/remove diff.
    ///
    /// Adds are applied first, then removes. A name present in both sets ends
    /// up removed. Removing a name that is not set is a no-op.
    pub fn merge(&mut self, diff: &EaDiff) {
        self.extend_from(&diff.add);
        for name in diff.remove.keys() {
            self.0.remove(name);
        }
    }

    /// Wire representation (`{name: {"value": raw}}`)
    pub fn encode(&self) -> serde_json::Value {
        let map = self
            .0
            .iter()
            .map(|(name, value)| {
                let raw = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                (name.clone(), serde_json::json!({ "value": raw }))
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<EaValue>> FromIterator<(K, V)> for Ea {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for Ea {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, &WireEntry { value })?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ea {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = BTreeMap::<String, WireEntry<EaValue>>::deserialize(deserializer)?;
        Ok(Self(wire.into_iter().map(|(k, entry)| (k, entry.value)).collect()))
    }
}

/// Add/remove instructions applied to a stored object's attributes during update.
///
/// Never stored on an object and never sent over the wire; only the names of
/// `remove` matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EaDiff {
    /// Attributes to set or overwrite
    pub add: Ea,
    /// Attributes to delete (values ignored)
    pub remove: Ea,
}

impl EaDiff {
    /// Empty diff
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite `name`
    #[must_use]
    pub fn add(mut self, name: impl Into<String>, value: impl Into<EaValue>) -> Self {
        self.add.insert(name, value);
        self
    }

    /// Remove `name`
    #[must_use]
    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.remove.insert(name, EaValue::String(String::new()));
        self
    }

    /// Whether the diff changes nothing
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}
