// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types.
//!
//! Each engine stage has its own error enum; [`Error`] unifies them for
//! callers that drive the whole pipeline through [`crate::Engine`].
//!
//! | Stage | Error | Fails when |
//! |-------|-------|------------|
//! | Metadata resolution | [`ResolveError`] | type is not an exposed entity or its relations are malformed |
//! | Filter compilation | [`FilterError`] | a named field does not exist or is not filterable |
//! | Mapping | [`MappingError`] | a field accessor rejects a value or metadata cannot be resolved |
//! | Field access | [`AccessError`] | an instance or value has the wrong type |

use thiserror::Error;

use crate::{metadata::RelationKind, value::ScalarType};

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Metadata resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The type does not carry the `AutoApi` marker.
    #[error("type `{type_name}` is not annotated with auto_api")]
    NotAnEntity {
        /// Simple name of the rejected type.
        type_name: String
    },

    /// More than one field is marked as identifier.
    #[error("entity `{entity}` declares more than one id field: `{first}` and `{second}`")]
    MultipleIdFields {
        /// Entity name.
        entity: String,
        /// First id field.
        first:  String,
        /// Second id field.
        second: String
    },

    /// A relation annotation does not match the field's shape.
    #[error("field `{field}` of entity `{entity}` cannot hold a {kind} relation")]
    RelationShape {
        /// Entity name.
        entity: String,
        /// Field name.
        field:  String,
        /// Declared relation kind.
        kind:   RelationKind
    },

    /// Two fields (own or inherited) share a name.
    #[error("entity `{entity}` declares field `{field}` more than once")]
    DuplicateField {
        /// Entity name.
        entity: String,
        /// Field name.
        field:  String
    }
}

impl ResolveError {
    /// Check if the type was rejected for lacking the entity marker.
    #[must_use]
    pub const fn is_not_an_entity(&self) -> bool {
        matches!(self, Self::NotAnEntity { .. })
    }

    /// Check if this is a structural error in the entity declaration.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        !self.is_not_an_entity()
    }
}

/// Filter compilation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The named field does not exist in the entity metadata.
    #[error("entity `{entity}` has no field `{field}`")]
    UnknownField {
        /// Entity name.
        entity: String,
        /// Requested field.
        field:  String
    },

    /// The named field exists but has no filter configuration.
    #[error("field `{field}` of entity `{entity}` is not filterable")]
    NotFilterable {
        /// Entity name.
        entity: String,
        /// Requested field.
        field:  String
    }
}

impl FilterError {
    /// Check if the field is missing altogether.
    #[must_use]
    pub const fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }

    /// Check if the field exists but is not filterable.
    #[must_use]
    pub const fn is_not_filterable(&self) -> bool {
        matches!(self, Self::NotFilterable { .. })
    }
}

/// Field accessor failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The instance handed to the accessor is of another type.
    #[error("instance is not a `{expected}`")]
    Downcast {
        /// Type the accessor was built for.
        expected: &'static str
    },

    /// The typed field refused the value.
    #[error("cannot store a {found} value in a {expected} field")]
    Rejected {
        /// Scalar type of the field.
        expected: ScalarType,
        /// Kind of the offered value.
        found:    &'static str
    },

    /// The value shape (scalar, to-one, to-many) does not match the field.
    #[error("cannot store a {found} in a {expected} field")]
    ShapeMismatch {
        /// Shape of the field.
        expected: &'static str,
        /// Shape of the offered value.
        found:    &'static str
    }
}

impl AccessError {
    /// Check if the accessor was used with a foreign instance.
    #[must_use]
    pub const fn is_downcast(&self) -> bool {
        matches!(self, Self::Downcast { .. })
    }

    /// Check if the field rejected the offered value.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::ShapeMismatch { .. })
    }
}

/// Mapping failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Reading or writing a field failed.
    #[error("field `{field}` of entity `{entity}`: {source}")]
    FieldAccess {
        /// Entity name.
        entity: String,
        /// Field name.
        field:  String,
        /// Accessor failure.
        #[source]
        source: AccessError
    },

    /// Metadata for a mapped or related type could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The constructed instance is not of the requested type.
    #[error("metadata for `{expected}` built an instance of another type")]
    TypeMismatch {
        /// Requested type.
        expected: String
    }
}

impl MappingError {
    /// Check if a field accessor failed.
    #[must_use]
    pub const fn is_field_access(&self) -> bool {
        matches!(self, Self::FieldAccess { .. })
    }

    /// Check if metadata resolution failed.
    #[must_use]
    pub const fn is_resolve(&self) -> bool {
        matches!(self, Self::Resolve(_))
    }

    /// Name of the failing field, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::FieldAccess { field, .. } => Some(field),
            _ => None
        }
    }
}

/// Any engine failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Metadata resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Filter compilation failed.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Mapping failed.
    #[error(transparent)]
    Mapping(#[from] MappingError)
}
