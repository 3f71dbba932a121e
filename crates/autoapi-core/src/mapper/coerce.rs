// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Wire value to field value coercion.
//!
//! | Field | Wire value | Result |
//! |-------|------------|--------|
//! | scalar | already the field type | unchanged |
//! | `bool` | string | `true` if it equals `"true"` in any case, else `false` |
//! | numeric, uuid, temporal, custom | string | parsed by the converter, or unchanged if it does not parse |
//! | numeric | other numeric | widened or narrowed, floats truncate |
//! | to-one | null | empty slot |
//! | to-one | nested map | empty slot |
//! | to-one | scalar | identity reference in the target's identity type |
//! | to-many | list | identity references, nested maps dropped |
//! | to-many | null | empty list |
//!
//! Anything else passes through unchanged; the field's setter decides.

use crate::{
    access::{FieldValue, Link},
    convert::Converter,
    metadata::FieldMetadata,
    value::{ScalarType, Value}
};

/// Coerce `value` for writing into `field`.
pub(crate) fn coerce(converter: &Converter, field: &FieldMetadata, value: Value) -> FieldValue {
    if let Some(ty) = field.scalar_type() {
        return FieldValue::Scalar(coerce_scalar(converter, value, ty));
    }
    let id_type = field
        .relation()
        .and_then(|relation| relation.target_id_type());
    if field.is_to_one() {
        match value {
            Value::Null | Value::Map(_) => FieldValue::One(None),
            Value::List(_) => FieldValue::Scalar(value),
            identity => {
                FieldValue::One(Some(Link::Id(coerce_identity(converter, identity, id_type))))
            }
        }
    } else {
        match value {
            Value::Null => FieldValue::Many(Vec::new()),
            Value::List(items) => FieldValue::Many(
                items
                    .into_iter()
                    .filter(|item| !matches!(item, Value::Null | Value::Map(_) | Value::List(_)))
                    .map(|item| Link::Id(coerce_identity(converter, item, id_type)))
                    .collect()
            ),
            other => FieldValue::Scalar(other)
        }
    }
}

fn coerce_identity(converter: &Converter, value: Value, id_type: Option<ScalarType>) -> Value {
    match id_type {
        Some(ty) => coerce_scalar(converter, value, ty),
        None => value
    }
}

/// Coerce `value` towards `ty`, leaving it unchanged when no rule applies.
pub(crate) fn coerce_scalar(converter: &Converter, value: Value, ty: ScalarType) -> Value {
    if value.is_null() || value.scalar_type() == Some(ty) {
        return value;
    }
    let coerced = match (&value, ty) {
        (Value::String(text), ScalarType::Bool) => {
            Some(Value::Bool(text.eq_ignore_ascii_case("true")))
        }
        (Value::String(text), _) => converter.try_convert(text, ty),
        _ if ty.is_numeric() => convert_number(&value, ty),
        _ => None
    };
    coerced.unwrap_or(value)
}

#[allow(clippy::cast_possible_truncation)]
fn convert_number(value: &Value, ty: ScalarType) -> Option<Value> {
    let integral = || {
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|float| float.trunc() as i64))
    };
    match ty {
        ScalarType::I16 => integral().and_then(|v| i16::try_from(v).ok()).map(Value::I16),
        ScalarType::I32 => integral().and_then(|v| i32::try_from(v).ok()).map(Value::I32),
        ScalarType::I64 => integral().map(Value::I64),
        ScalarType::F32 => value.as_f64().map(|v| Value::F32(v as f32)),
        ScalarType::F64 => value.as_f64().map(Value::F64),
        _ => None
    }
}
