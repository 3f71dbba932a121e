// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! serde support for [`Value`].
//!
//! Serialization is lossless for JSON-native variants. UUIDs, timestamps and
//! dates serialize as strings; deserializing them back yields
//! [`Value::String`], which the mapper's coercion turns into the typed
//! variant when the target field asks for it.

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq}
};

use super::{Value, WireMap};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::I16(v) => serializer.serialize_i16(*v),
            Self::I32(v) => serializer.serialize_i32(*v),
            Self::I64(v) => serializer.serialize_i64(*v),
            Self::F32(v) => serializer.serialize_f32(*v),
            Self::F64(v) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Uuid(v) => serializer.collect_str(v),
            Self::DateTime(v) => serializer.serialize_str(&v.to_rfc3339()),
            Self::Date(v) => serializer.collect_str(v),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(v) => Self::I64(v),
                None => n.as_f64().map_or(Self::Null, Self::F64)
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect()
            )
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(v),
            Value::I16(v) => Self::from(v),
            Value::I32(v) => Self::from(v),
            Value::I64(v) => Self::from(v),
            Value::F32(v) => Self::from(v),
            Value::F64(v) => Self::from(v),
            Value::String(v) => Self::String(v),
            Value::Uuid(v) => Self::String(v.to_string()),
            Value::DateTime(v) => Self::String(v.to_rfc3339()),
            Value::Date(v) => Self::String(v.to_string()),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Map(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect()
            )
        }
    }
}

/// Convert a JSON object into a [`WireMap`].
///
/// Returns `None` if `json` is not an object.
#[must_use]
pub fn wire_map_from_json(json: serde_json::Value) -> Option<WireMap> {
    match Value::from(json) {
        Value::Map(map) => Some(map),
        _ => None
    }
}
