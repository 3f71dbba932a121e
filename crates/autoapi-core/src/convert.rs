// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! String to scalar conversion for query parameters.
//!
//! Built-in conversions cover every non-custom [`ScalarType`]:
//!
//! | Type | Accepted text |
//! |------|---------------|
//! | `Bool` | `true`/`false`, `on`/`off`, `yes`/`no`, `1`/`0` (any case) |
//! | integers, floats | `str::parse` of the trimmed text |
//! | `String` | anything |
//! | `Uuid` | hyphenated or simple form |
//! | `DateTime` | RFC 3339 |
//! | `Date` | `YYYY-MM-DD` |
//!
//! Custom types get a conversion through [`Converter::register`]. Text
//! that no conversion accepts passes through as [`Value::String`], leaving
//! the decision to whoever evaluates the predicate.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::trace;
use uuid::Uuid;

use crate::value::{ScalarType, Value};

/// Conversion function for a custom scalar type.
pub type ConvertFn = fn(&str) -> Option<Value>;

/// String to [`Value`] converter with a registry for custom types.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    custom: HashMap<&'static str, ConvertFn>
}

impl Converter {
    /// Converter with the built-in conversions only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion for [`ScalarType::Custom`] named `type_name`.
    pub fn register(&mut self, type_name: &'static str, convert: ConvertFn) -> &mut Self {
        self.custom.insert(type_name, convert);
        self
    }

    /// Check if text can be converted to `ty` at all.
    #[must_use]
    pub fn can_convert(&self, ty: ScalarType) -> bool {
        match ty {
            ScalarType::Custom(name) => self.custom.contains_key(name),
            _ => true
        }
    }

    /// Convert `raw` to `ty`, or `None` if the text does not parse.
    #[must_use]
    pub fn try_convert(&self, raw: &str, ty: ScalarType) -> Option<Value> {
        let text = raw.trim();
        match ty {
            ScalarType::Bool => parse_bool(text).map(Value::Bool),
            ScalarType::I16 => text.parse().ok().map(Value::I16),
            ScalarType::I32 => text.parse().ok().map(Value::I32),
            ScalarType::I64 => text.parse().ok().map(Value::I64),
            ScalarType::F32 => text.parse().ok().map(Value::F32),
            ScalarType::F64 => text.parse().ok().map(Value::F64),
            ScalarType::String => Some(Value::String(raw.to_owned())),
            ScalarType::Uuid => Uuid::parse_str(text).ok().map(Value::Uuid),
            ScalarType::DateTime => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|instant| Value::DateTime(instant.with_timezone(&Utc))),
            ScalarType::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(Value::Date),
            ScalarType::Custom(name) => self.custom.get(name).and_then(|convert| convert(raw))
        }
    }

    /// Convert `raw` to `ty`, falling back to the raw text.
    #[must_use]
    pub fn convert(&self, raw: &str, ty: ScalarType) -> Value {
        self.try_convert(raw, ty).unwrap_or_else(|| {
            trace!(raw, ty = %ty, "passing unconvertible parameter through as text");
            Value::String(raw.to_owned())
        })
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        let converter = Converter::new();
        assert_eq!(converter.convert("18", ScalarType::I32), Value::I32(18));
        assert_eq!(converter.convert(" 42 ", ScalarType::I64), Value::I64(42));
        assert_eq!(converter.convert("2.5", ScalarType::F64), Value::F64(2.5));
    }

    #[test]
    fn unparsable_passes_through() {
        let converter = Converter::new();
        assert_eq!(
            converter.convert("notanumber", ScalarType::I32),
            Value::String("notanumber".into())
        );
        assert_eq!(converter.try_convert("notanumber", ScalarType::I32), None);
    }

    #[test]
    fn booleans() {
        let converter = Converter::new();
        assert_eq!(converter.convert("TRUE", ScalarType::Bool), Value::Bool(true));
        assert_eq!(converter.convert("off", ScalarType::Bool), Value::Bool(false));
        assert_eq!(
            converter.convert("maybe", ScalarType::Bool),
            Value::String("maybe".into())
        );
    }

    #[test]
    fn temporal_and_uuid() {
        let converter = Converter::new();
        assert!(matches!(
            converter.convert("2024-05-01", ScalarType::Date),
            Value::Date(_)
        ));
        assert!(matches!(
            converter.convert("2024-05-01T10:00:00+02:00", ScalarType::DateTime),
            Value::DateTime(_)
        ));
        assert!(matches!(
            converter.convert("67e55044-10b1-426f-9247-bb680e5fe0c8", ScalarType::Uuid),
            Value::Uuid(_)
        ));
    }

    #[test]
    fn custom_types_need_registration() {
        let status = ScalarType::Custom("Status");
        let mut converter = Converter::new();
        assert!(!converter.can_convert(status));
        assert_eq!(converter.convert("ok", status), Value::String("ok".into()));

        converter.register("Status", |raw| Some(Value::String(raw.to_uppercase())));
        assert!(converter.can_convert(status));
        assert_eq!(converter.convert("ok", status), Value::String("OK".into()));
    }

    #[test]
    fn strings_keep_whitespace() {
        let converter = Converter::new();
        assert_eq!(
            converter.convert(" ann ", ScalarType::String),
            Value::String(" ann ".into())
        );
    }
}
