//! Attribute model.
//!
//! An [`Attributes`] set maps attribute names to typed values. Iteration order
//! is irrelevant to callers but kept deterministic (`BTreeMap`) so serialized
//! output and test assertions are stable.
//!
//! [`Attributes::merge_from`] is the only precedence primitive: on a key
//! collision the incoming set wins. Every layer (baseline config, route
//! evaluators, static request attributes) goes through it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single typed attribute value.
///
/// Config files write values untagged: `true`, `8080`, `0.5`, `"billing"`, or
/// a flat string map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int64(i64),
    Double(f64),
    String(String),
    StringMap(BTreeMap<String, String>),
}

impl AttributeValue {
    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::String(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::String(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int64(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Double(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

/// Name -> value attribute set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    map: BTreeMap<String, AttributeValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a single attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.map.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.map.get(name)
    }

    /// String value of `name`, or `None` if absent or not a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.map.get(name).and_then(AttributeValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `src` into `self`. Values from `src` overwrite existing values
    /// for the same key; keys present on only one side are kept.
    pub fn merge_from(&mut self, src: &Attributes) {
        for (k, v) in &src.map {
            self.map.insert(k.clone(), v.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Attributes::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}
