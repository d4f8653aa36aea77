//! Loosely-typed records produced by the file decoders.

use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A primitive field value as it appeared in the upload.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    /// A nested JSON array; its contents are never inspected.
    List,
    /// A nested JSON object; its contents are never inspected.
    Object,
}

impl RawValue {
    /// Name of the value's kind, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Number(_) => "number",
            RawValue::Text(_) => "string",
            RawValue::List => "list",
            RawValue::Object => "object",
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(flag) => RawValue::Bool(flag),
            Value::Number(number) => RawValue::Number(number),
            Value::String(text) => RawValue::Text(text),
            Value::Array(_) => RawValue::List,
            Value::Object(_) => RawValue::Object,
        }
    }
}

/// One element of an upload prior to schema validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Fields(BTreeMap<String, RawValue>),
    /// An element that is not an object, kept so it fails at its own index.
    NotAnObject(RawValue),
}

impl RawRecord {
    pub fn field(&self, name: &str) -> Option<&RawValue> {
        match self {
            RawRecord::Fields(fields) => fields.get(name),
            RawRecord::NotAnObject(_) => None,
        }
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawRecord::Fields(
                map.into_iter()
                    .map(|(key, value)| (key, RawValue::from(value)))
                    .collect(),
            ),
            other => RawRecord::NotAnObject(RawValue::from(other)),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRecord::Fields(
            iter.into_iter()
                .map(|(key, value)| (key.into(), RawValue::Text(value.into())))
                .collect(),
        )
    }
}
