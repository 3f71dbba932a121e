// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relation metadata.

use std::fmt;

use crate::{descriptor::TypeHandle, value::ScalarType};

/// Cardinality and ownership of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// To-one, possibly owned by the other side.
    OneToOne,
    /// To-one, owned by this side.
    ManyToOne,
    /// To-many, owned by the other side.
    OneToMany,
    /// To-many, referencing.
    ManyToMany
}

impl RelationKind {
    /// Check if the relation points at a single entity.
    #[must_use]
    pub const fn is_to_one(&self) -> bool {
        matches!(self, Self::OneToOne | Self::ManyToOne)
    }

    /// Check if the relation points at a collection.
    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        !self.is_to_one()
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OneToOne => "one-to-one",
            Self::ManyToOne => "many-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToMany => "many-to-many"
        })
    }
}

/// Relation of a field to another entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationMetadata {
    pub(crate) kind:           RelationKind,
    pub(crate) target:         TypeHandle,
    pub(crate) inverse_field:  Option<String>,
    pub(crate) target_id_type: Option<ScalarType>
}

impl RelationMetadata {
    /// Relation kind.
    #[must_use]
    pub const fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Check if the relation points at a single entity.
    #[must_use]
    pub const fn is_to_one(&self) -> bool {
        self.kind.is_to_one()
    }

    /// Check if the relation points at a collection.
    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        self.kind.is_to_many()
    }

    /// Related entity type.
    #[must_use]
    pub const fn target(&self) -> &TypeHandle {
        &self.target
    }

    /// Field of the target that owns the relation (`mapped_by`).
    #[must_use]
    pub fn inverse_field(&self) -> Option<&str> {
        self.inverse_field.as_deref()
    }

    /// Scalar type of the target's identity field.
    #[must_use]
    pub const fn target_id_type(&self) -> Option<ScalarType> {
        self.target_id_type
    }
}
