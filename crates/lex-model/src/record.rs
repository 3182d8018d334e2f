//! Schema-less backend records.
//!
//! Most case sections come back from the backend as flat JSON objects whose
//! shape depends on the case type. [`FieldRecord`] keeps those objects as an
//! ordered list of key/value pairs so the presentation layer can render them
//! in the order the backend sent them.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// A single primitive value of a backend record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(Number),
    Bool(bool),
    /// Arrays and nested objects. Kept (as compact JSON) so one malformed
    /// field never prevents the rest of the record from rendering.
    Unsupported(String),
}

impl FieldValue {
    /// Human-readable form of the value.
    ///
    /// Returns `None` for null, blank text and unsupported values; callers
    /// substitute their own placeholder.
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Null | Self::Unsupported(_) => None,
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) => Some(number.to_string()),
            Self::Bool(flag) => Some(flag.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            Self::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(text) => Self::Text(text),
            Value::Number(number) => Self::Number(number),
            Value::Bool(flag) => Self::Bool(flag),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Unsupported(other.to_string()),
        }
    }
}

impl From<&FieldValue> for Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Number(number) => Value::Number(number.clone()),
            FieldValue::Bool(flag) => Value::Bool(*flag),
            FieldValue::Unsupported(raw) => {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or_else(|| Self::Unsupported(value.to_string()), Self::Number)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// An ordered, flat key/value record as received from the backend.
///
/// Keys are unique: inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRecord {
    fields: Vec<(String, FieldValue)>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Text value of `key`, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key`, keeping its original position when it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(candidate, _)| *candidate == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for FieldRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for FieldRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct FieldRecordVisitor;

impl<'de> Visitor<'de> for FieldRecordVisitor {
    type Value = FieldRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a flat JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut record = FieldRecord {
            fields: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, value)) = access.next_entry::<String, FieldValue>()? {
            record.insert(key, value);
        }
        Ok(record)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(FieldRecord::new())
    }
}

impl<'de> Deserialize<'de> for FieldRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldRecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_preserves_backend_order() {
        let record: FieldRecord =
            serde_json::from_str(r#"{"zeta": 1, "alfa": "a", "medio": null}"#).unwrap();
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["zeta", "alfa", "medio"]);
    }

    #[test]
    fn nested_values_are_kept_as_unsupported() {
        let record: FieldRecord =
            serde_json::from_str(r#"{"lista": [1, 2], "nombre": "Ana"}"#).unwrap();
        assert!(record.get("lista").unwrap().is_unsupported());
        assert_eq!(record.text("nombre"), Some("Ana"));
    }

    #[test]
    fn null_record_deserializes_empty() {
        let record: FieldRecord = serde_json::from_str("null").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut record: FieldRecord = [("a", 1i64), ("b", 2)].into_iter().collect();
        record.insert("a", 3i64);
        let pairs: Vec<_> = record.iter().map(|(k, v)| (k, v.as_i64())).collect();
        assert_eq!(pairs, vec![("a", Some(3)), ("b", Some(2))]);
    }

    #[test]
    fn display_of_primitives() {
        assert_eq!(FieldValue::from(12i64).display().as_deref(), Some("12"));
        assert_eq!(FieldValue::from(1.5).display().as_deref(), Some("1.5"));
        assert_eq!(FieldValue::from(true).display().as_deref(), Some("true"));
        assert_eq!(FieldValue::from("  ").display(), None);
        assert_eq!(FieldValue::Null.display(), None);
    }

    #[test]
    fn serialize_roundtrips_order() {
        let record: FieldRecord = [("b", "x"), ("a", "y")].into_iter().collect();
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"b":"x","a":"y"}"#);
    }
}
