// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Conversion between typed Rust fields and [`Value`].

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{ScalarType, Value};

/// A Rust type that can be stored in a scalar entity field.
///
/// `from_value` is strict: it accepts only the variant matching
/// [`Self::TYPE`] (plus `Null` for optional types). Coercion of loosely
/// typed input happens before the value reaches this trait. A rejected
/// value is handed back unchanged so the caller can report its kind.
///
/// # Example
///
/// ```rust
/// use autoapi_core::{Scalar, ScalarType, Value};
///
/// assert_eq!(<Option<i32> as Scalar>::TYPE, ScalarType::I32);
/// assert_eq!(Some(3_i32).to_value(), Value::I32(3));
/// assert_eq!(<Option<i32>>::from_value(Value::Null), Ok(None));
/// assert!(i32::from_value(Value::from("3")).is_err());
/// ```
pub trait Scalar: Sized + Send + Sync + 'static {
    /// Scalar type of the field.
    const TYPE: ScalarType;

    /// Whether the field can hold null.
    const OPTIONAL: bool = false;

    /// Read the field as a dynamic value.
    fn to_value(&self) -> Value;

    /// Build the field from a dynamic value.
    ///
    /// # Errors
    ///
    /// Returns the value unchanged if its variant does not match.
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const TYPE: ScalarType = ScalarType::$variant;

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other)
                    }
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    String => String,
    Uuid => Uuid,
    DateTime<Utc> => DateTime,
    NaiveDate => Date,
}

impl<T: Scalar> Scalar for Option<T> {
    const TYPE: ScalarType = T::TYPE;
    const OPTIONAL: bool = true;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, Scalar::to_value)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_variant_match() {
        assert_eq!(i64::from_value(Value::I64(4)), Ok(4));
        assert_eq!(i64::from_value(Value::I32(4)), Err(Value::I32(4)));
        assert_eq!(String::from_value(Value::Null), Err(Value::Null));
    }

    #[test]
    fn optional_accepts_null() {
        assert_eq!(<Option<String>>::from_value(Value::Null), Ok(None));
        assert_eq!(
            <Option<String>>::from_value(Value::from("a")),
            Ok(Some("a".to_owned()))
        );
        assert!(<Option<String> as Scalar>::OPTIONAL);
        assert!(!<String as Scalar>::OPTIONAL);
    }

    #[test]
    fn to_value_of_none_is_null() {
        assert_eq!(None::<Uuid>.to_value(), Value::Null);
        assert_eq!(true.to_value(), Value::Bool(true));
    }
}
