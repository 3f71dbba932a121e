// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resolved field metadata.

use std::sync::Arc;

use super::RelationMetadata;
use crate::{
    access::FieldAccess,
    descriptor::{Constraint, GenerationType},
    filter::FilterConfig,
    value::ScalarType
};

/// Declared type of a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Scalar of the given type.
    Scalar(ScalarType),
    /// Relation slot; see [`FieldMetadata::relation`].
    Relation
}

/// One persisted field of an entity, with its decoded flags.
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    pub(crate) name:         String,
    pub(crate) ty:           FieldType,
    pub(crate) accessor:     Arc<dyn FieldAccess>,
    pub(crate) nullable:     bool,
    pub(crate) hidden:       bool,
    pub(crate) read_only:    bool,
    pub(crate) is_id:        bool,
    pub(crate) is_version:   bool,
    pub(crate) json_ignored: bool,
    pub(crate) generation:   Option<GenerationType>,
    pub(crate) validations:  Vec<Constraint>,
    pub(crate) filter:       Option<FilterConfig>,
    pub(crate) relation:     Option<RelationMetadata>,
    pub(crate) declared_in:  &'static str
}

impl FieldMetadata {
    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn ty(&self) -> FieldType {
        self.ty
    }

    /// Scalar type, `None` for relations.
    #[must_use]
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        match self.ty {
            FieldType::Scalar(ty) => Some(ty),
            FieldType::Relation => None
        }
    }

    /// Accessor pair.
    #[must_use]
    pub fn accessor(&self) -> &dyn FieldAccess {
        self.accessor.as_ref()
    }

    /// Whether the field can hold null.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the field is excluded from the wire in both directions.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether the field is never written from input.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether this is the identity field.
    #[must_use]
    pub const fn is_id(&self) -> bool {
        self.is_id
    }

    /// Whether this is the optimistic-lock version field.
    #[must_use]
    pub const fn is_version(&self) -> bool {
        self.is_version
    }

    /// Whether external JSON serializers ignore the field.
    #[must_use]
    pub const fn is_json_ignored(&self) -> bool {
        self.json_ignored
    }

    /// Identity generation strategy.
    #[must_use]
    pub const fn generation(&self) -> Option<GenerationType> {
        self.generation
    }

    /// Declared validation constraints.
    #[must_use]
    pub fn validations(&self) -> &[Constraint] {
        &self.validations
    }

    /// Filter configuration.
    #[must_use]
    pub const fn filter(&self) -> Option<&FilterConfig> {
        self.filter.as_ref()
    }

    /// Relation, for relation fields.
    #[must_use]
    pub const fn relation(&self) -> Option<&RelationMetadata> {
        self.relation.as_ref()
    }

    /// Simple name of the type that declares the field: the entity itself
    /// or one of its shared bases.
    #[must_use]
    pub const fn declared_in(&self) -> &'static str {
        self.declared_in
    }

    /// Check if the field is written from wire input.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        !self.is_id && !self.hidden && !self.read_only
    }

    /// Check if the field is a to-one relation.
    #[must_use]
    pub fn is_to_one(&self) -> bool {
        self.relation.as_ref().is_some_and(|r| r.kind.is_to_one())
    }
}
