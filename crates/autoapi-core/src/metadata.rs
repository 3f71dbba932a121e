// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural metadata of entity types.
//!
//! [`MetadataResolver`] turns an [`EntityDescriptor`] into an immutable
//! [`EntityMetadata`]; [`MetadataCache`] memoizes the result per type.
//! Both the filter compiler and the mapper consume metadata only.
//!
//! # Module Structure
//!
//! ```text
//! metadata.rs (EntityMetadata)
//! ├── field.rs    - FieldMetadata, FieldType
//! ├── relation.rs - RelationMetadata, RelationKind
//! ├── resolver.rs - MetadataResolver
//! └── cache.rs    - MetadataCache
//! ```
//!
//! [`EntityDescriptor`]: crate::descriptor::EntityDescriptor

mod cache;
mod field;
mod relation;
mod resolver;

use std::any::{Any, TypeId};

pub use cache::MetadataCache;
pub use field::{FieldMetadata, FieldType};
pub use relation::{RelationKind, RelationMetadata};
pub use resolver::MetadataResolver;

use crate::{
    access::FieldValue,
    descriptor::{ApiConfig, AuditConfig, Constructor, SoftDeleteConfig},
    error::AccessError,
    value::{ScalarType, Value}
};

/// Resolved, immutable description of an entity type.
#[derive(Debug, Clone)]
pub struct EntityMetadata {
    pub(crate) type_id:      TypeId,
    pub(crate) type_name:    &'static str,
    pub(crate) rust_path:    &'static str,
    pub(crate) storage_name: String,
    pub(crate) id_type:      Option<ScalarType>,
    pub(crate) fields:       Vec<FieldMetadata>,
    pub(crate) api:          ApiConfig,
    pub(crate) soft_delete:  Option<SoftDeleteConfig>,
    pub(crate) auditable:    Option<AuditConfig>,
    pub(crate) construct:    Constructor
}

impl EntityMetadata {
    /// Type identifier.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Simple type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fully qualified Rust path.
    #[must_use]
    pub const fn rust_path(&self) -> &'static str {
        self.rust_path
    }

    /// Storage (table) name.
    #[must_use]
    pub fn storage_name(&self) -> &str {
        &self.storage_name
    }

    /// Scalar type of the identity field.
    #[must_use]
    pub const fn id_type(&self) -> Option<ScalarType> {
        self.id_type
    }

    /// Fields in resolution order: own fields, then inherited ones.
    #[must_use]
    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    /// Field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Identity field.
    #[must_use]
    pub fn id_field(&self) -> Option<&FieldMetadata> {
        self.fields.iter().find(|field| field.is_id)
    }

    /// Relation fields.
    pub fn relations(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.fields.iter().filter(|field| field.relation.is_some())
    }

    /// Fields with a filter configuration.
    pub fn filterable_fields(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.fields.iter().filter(|field| field.filter.is_some())
    }

    /// Exposure configuration, with the default path filled in.
    #[must_use]
    pub const fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Soft-delete configuration.
    #[must_use]
    pub const fn soft_delete(&self) -> Option<&SoftDeleteConfig> {
        self.soft_delete.as_ref()
    }

    /// Audit configuration.
    #[must_use]
    pub const fn auditable(&self) -> Option<&AuditConfig> {
        self.auditable.as_ref()
    }

    /// Check if soft delete is configured.
    #[must_use]
    pub const fn is_soft_delete_enabled(&self) -> bool {
        self.soft_delete.is_some()
    }

    /// Check if auditing is configured.
    #[must_use]
    pub const fn is_auditable(&self) -> bool {
        self.auditable.is_some()
    }

    /// Build a zero-valued instance.
    #[must_use]
    pub fn new_instance(&self) -> Box<dyn Any + Send + Sync> {
        (self.construct)()
    }

    /// Read the identity value of `instance`.
    ///
    /// Returns [`Value::Null`] when the entity has no identity field.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] if `instance` is not of this type.
    pub fn identity_of(&self, instance: &dyn Any) -> Result<Value, AccessError> {
        let Some(id) = self.id_field() else {
            return Ok(Value::Null);
        };
        match id.accessor.read(instance)? {
            FieldValue::Scalar(value) => Ok(value),
            other => Err(AccessError::ShapeMismatch {
                expected: "scalar",
                found:    other.shape()
            })
        }
    }
}
