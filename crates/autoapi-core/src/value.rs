// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamic values and the wire representation.
//!
//! Everything that crosses the engine boundary untyped is a [`Value`]:
//! converted query parameters, the fields of a [`WireMap`], identity values
//! of lazy references. Typed Rust fields convert to and from [`Value`]
//! through the [`Scalar`] trait.
//!
//! # Module Structure
//!
//! ```text
//! value.rs (Value, ScalarType, WireMap)
//! ├── scalar.rs - Scalar trait and built-in impls
//! └── json.rs   - serde / serde_json bridges
//! ```

mod json;
mod scalar;

use std::{cmp::Ordering, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
pub use json::wire_map_from_json;
pub use scalar::Scalar;
use uuid::Uuid;

/// Ordered, string-keyed map of dynamically typed values.
///
/// Insertion order is field declaration order, which keeps wire output
/// deterministic.
pub type WireMap = IndexMap<String, Value>;

/// Scalar type of a stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `bool`.
    Bool,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `String`.
    String,
    /// `uuid::Uuid`.
    Uuid,
    /// `chrono::DateTime<Utc>`.
    DateTime,
    /// `chrono::NaiveDate`.
    Date,
    /// A user-defined type, named for diagnostics and converter lookup.
    Custom(&'static str)
}

impl ScalarType {
    /// Check if this is an integer type.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::I16 | Self::I32 | Self::I64)
    }

    /// Check if this is any numeric type.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::F32 | Self::F64)
    }

    /// Check if this is a textual type.
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::String)
    }

    /// Check if values of this type support `<`, `<=`, `>`, `>=`.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.is_numeric() || matches!(self, Self::String | Self::Uuid | Self::DateTime | Self::Date)
    }

    /// Type name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Custom(name) => *name
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 16-bit signed integer.
    I16(i16),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// UTF-8 text.
    String(String),
    /// UUID.
    Uuid(Uuid),
    /// UTC timestamp.
    DateTime(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
    /// Ordered list, used for to-many relations and `IN` operands.
    List(Vec<Value>),
    /// Nested wire map, used for expanded relations.
    Map(WireMap)
}

impl Value {
    /// Check if this value is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Scalar type of this value, `None` for null, lists and maps.
    #[must_use]
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        Some(match self {
            Self::Bool(_) => ScalarType::Bool,
            Self::I16(_) => ScalarType::I16,
            Self::I32(_) => ScalarType::I32,
            Self::I64(_) => ScalarType::I64,
            Self::F32(_) => ScalarType::F32,
            Self::F64(_) => ScalarType::F64,
            Self::String(_) => ScalarType::String,
            Self::Uuid(_) => ScalarType::Uuid,
            Self::DateTime(_) => ScalarType::DateTime,
            Self::Date(_) => ScalarType::Date,
            Self::Null | Self::List(_) | Self::Map(_) => return None
        })
    }

    /// Short name of the value's kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            other => match other.scalar_type() {
                Some(ty) => ty.name(),
                None => "unknown"
            }
        }
    }

    /// Borrow the text of a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None
        }
    }

    /// Integer view of any integer variant.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I16(v) => Some(v as i64),
            Self::I32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            _ => None
        }
    }

    /// Float view of any numeric variant.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(f64::from(v)),
            Self::F64(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64)
        }
    }

    /// Borrow the items of a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None
        }
    }

    /// Borrow the entries of a [`Value::Map`].
    #[must_use]
    pub fn as_map(&self) -> Option<&WireMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None
        }
    }

    /// Compare two values of compatible kinds.
    ///
    /// Integers of different widths compare exactly; integers and floats
    /// compare as `f64`. Returns `None` for incompatible kinds, nulls,
    /// lists and maps.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            _ => match (self.as_i64(), other.as_i64()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
        }
    }

    /// Equality that ignores numeric width (`I32(1)` equals `I64(1)`).
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match self.compare(other) {
            Some(ordering) => ordering == Ordering::Equal,
            None => self == other
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Self::Uuid(v) => write!(f, "'{v}'"),
            Self::DateTime(v) => write!(f, "'{}'", v.to_rfc3339()),
            Self::Date(v) => write!(f, "'{v}'"),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_for_value! {
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
    Vec<Value> => List,
    WireMap => Map,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
