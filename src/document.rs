//! Dynamic document model for the source side of the stream
//!
//! Documents are loosely typed key/value records: a field is either absent or
//! holds one of a small set of scalar kinds (boolean, 32/64-bit integer,
//! double, string, UTC instant). [`FieldKind`] collapses the concrete value
//! type to the kind label the coercion expectation table and error messages
//! speak in: the three numeric widths all count as `Number`.

use crate::errors::{Result, StreamError};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// A single dynamically typed document field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Boolean(bool),

    /// 32-bit integer, the document store's narrow numeric.
    Int32(i32),

    /// 64-bit integer, the document store's wide numeric.
    Int64(i64),

    /// 64-bit floating point.
    Double(f64),

    /// UTF-8 string.
    String(String),

    /// An instant in UTC; column coercion reduces it to epoch days or epoch
    /// seconds as the target requires.
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// The dynamic kind label used by the coercion expectation table.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Int32(_) | FieldValue::Int64(_) | FieldValue::Double(_) => {
                FieldKind::Number
            }
            FieldValue::String(_) => FieldKind::String,
            FieldValue::DateTime(_) => FieldKind::DateTime,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Narrow numeric read: any numeric source, truncated to 32 bits.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Int32(v) => Some(*v),
            FieldValue::Int64(v) => Some(*v as i32),
            FieldValue::Double(v) => Some(*v as i32),
            _ => None,
        }
    }

    /// Wide numeric read: any numeric source, widened or truncated to 64 bits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int32(v) => Some(i64::from(*v)),
            FieldValue::Int64(v) => Some(*v),
            FieldValue::Double(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Floating-point read of any numeric source.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int32(v) => Some(f64::from(*v)),
            FieldValue::Int64(v) => Some(*v as f64),
            FieldValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(v) => Some(*v),
            _ => None,
        }
    }
}

/// Dynamic kind of a document field value, as named in mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Boolean,
    Number,
    String,
    DateTime,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "Boolean",
            FieldKind::Number => "Number",
            FieldKind::String => "String",
            FieldKind::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A loosely typed key/value record pulled from the document source.
///
/// Field lookup is by name; a missing key models an absent field. The stream
/// never mutates documents, it only reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn new() -> Self {
        Document {
            fields: BTreeMap::new(),
        }
    }

    /// Insert a field and return the document, for chained construction.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Field lookup by name; `None` models an absent field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Build a document from a JSON object.
    ///
    /// JSON `null` and a missing key both mean "absent"; integral numbers
    /// stay 64-bit integers and other numbers become doubles; arrays and
    /// nested objects are rejected. Date values are not parsed from strings,
    /// sources with real date scalars construct documents programmatically.
    pub fn from_json_value(value: &JsonValue) -> Result<Document> {
        let map = match value {
            JsonValue::Object(map) => map,
            other => {
                return Err(StreamError::InvalidDocument(format!(
                    "expected a JSON object, got {}",
                    json_kind(other)
                )))
            }
        };

        let mut document = Document::new();
        for (name, field) in map {
            match field {
                JsonValue::Null => {}
                JsonValue::Bool(v) => document.insert(name.clone(), FieldValue::Boolean(*v)),
                JsonValue::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        document.insert(name.clone(), FieldValue::Int64(i));
                    } else if let Some(f) = n.as_f64() {
                        document.insert(name.clone(), FieldValue::Double(f));
                    } else {
                        return Err(StreamError::InvalidDocument(format!(
                            "unrepresentable number for field \"{}\": {}",
                            name, n
                        )));
                    }
                }
                JsonValue::String(v) => document.insert(name.clone(), FieldValue::String(v.clone())),
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    return Err(StreamError::InvalidDocument(format!(
                        "unsupported nested value for field \"{}\"",
                        name
                    )))
                }
            }
        }
        Ok(document)
    }
}

impl From<BTreeMap<String, FieldValue>> for Document {
    fn from(fields: BTreeMap<String, FieldValue>) -> Self {
        Document { fields }
    }
}

impl FromIterator<(String, FieldValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Document {
            fields: iter.into_iter().collect(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Boolean(v) => serializer.serialize_bool(*v),
            FieldValue::Int32(v) => serializer.serialize_i32(*v),
            FieldValue::Int64(v) => serializer.serialize_i64(*v),
            FieldValue::Double(v) => serializer.serialize_f64(*v),
            FieldValue::String(v) => serializer.serialize_str(v),
            FieldValue::DateTime(v) => serializer.serialize_str(&v.to_rfc3339()),
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
