// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Descriptor to metadata resolution.
//!
//! # Resolution Rules
//!
//! - The type must carry [`TypeAnnotation::AutoApi`].
//! - Own fields come first, then fields of embedded shared bases,
//!   recursively. Embedded values of other types and transient fields are
//!   skipped.
//! - A field is nullable when its Rust type is `Option<_>` and it carries
//!   neither `NotNull`, `NotBlank` nor `Column { nullable: false }`.
//! - Identity fields are always read-only.
//! - A relation slot without a relation marker is many-to-one (`Ref<T>`) or
//!   one-to-many (`Vec<Ref<T>>`).
//! - The storage name is the `Table` annotation or the snake_case type name.

use std::sync::Arc;

use convert_case::{Case, Casing};
use tracing::{debug, trace};

use super::{EntityMetadata, FieldMetadata, FieldType, RelationKind, RelationMetadata};
use crate::{
    access::{FieldAccess, Nested, Projection},
    descriptor::{
        ApiConfig, EntityDescriptor, FieldAnnotation, FieldDescriptor, FieldKind, TypeAnnotation,
        TypeHandle, ValueShape
    },
    error::ResolveError,
    value::ScalarType
};

/// Stateless resolver from descriptors to metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataResolver;

impl MetadataResolver {
    /// Create a resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolve the metadata of the described type.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotAnEntity`] if the type lacks `AutoApi`
    /// - [`ResolveError::MultipleIdFields`] if more than one field is an id
    /// - [`ResolveError::RelationShape`] if a relation marker does not fit
    ///   the field
    /// - [`ResolveError::DuplicateField`] if an inherited field shadows
    ///   another
    pub fn resolve(&self, descriptor: &EntityDescriptor) -> Result<EntityMetadata, ResolveError> {
        let api = descriptor
            .api()
            .ok_or_else(|| ResolveError::NotAnEntity {
                type_name: descriptor.type_name.to_owned()
            })?;

        let mut fields = Vec::with_capacity(descriptor.fields.len());
        let mut path = Vec::new();
        collect_fields(descriptor, descriptor, &mut path, &mut fields)?;

        let mut ids = fields.iter().filter(|field| field.is_id);
        let id_type = match (ids.next(), ids.next()) {
            (Some(first), Some(second)) => {
                return Err(ResolveError::MultipleIdFields {
                    entity: descriptor.type_name.to_owned(),
                    first:  first.name.clone(),
                    second: second.name.clone()
                });
            }
            (Some(id), None) => id.scalar_type(),
            _ => None
        };

        let storage_name = storage_name(descriptor);
        let metadata = EntityMetadata {
            type_id: descriptor.type_id,
            type_name: descriptor.type_name,
            rust_path: descriptor.rust_path,
            api: api_with_path(api, descriptor.type_name),
            soft_delete: descriptor.annotations.iter().find_map(|annotation| match annotation {
                TypeAnnotation::SoftDelete(config) => Some(config.clone()),
                _ => None
            }),
            auditable: descriptor.annotations.iter().find_map(|annotation| match annotation {
                TypeAnnotation::Auditable(config) => Some(config.clone()),
                _ => None
            }),
            construct: descriptor.construct,
            storage_name,
            id_type,
            fields
        };

        debug!(
            entity = metadata.type_name,
            storage = %metadata.storage_name,
            fields = metadata.fields.len(),
            "resolved entity metadata"
        );
        Ok(metadata)
    }
}

fn collect_fields(
    entity: &EntityDescriptor,
    owner: &EntityDescriptor,
    path: &mut Vec<Arc<dyn Projection>>,
    out: &mut Vec<FieldMetadata>
) -> Result<(), ResolveError> {
    let mut bases = Vec::new();

    for field in &owner.fields {
        if field.has(|annotation| matches!(annotation, FieldAnnotation::Transient)) {
            trace!(entity = entity.type_name, field = field.name, "skipping transient field");
            continue;
        }
        match &field.kind {
            FieldKind::Transient => {}
            FieldKind::Embedded {
                base,
                projection
            } => bases.push((base, projection)),
            FieldKind::Value {
                shape,
                access
            } => {
                let accessor: Arc<dyn FieldAccess> = if path.is_empty() {
                    Arc::clone(access)
                } else {
                    Arc::new(Nested::new(path.clone(), Arc::clone(access)))
                };
                let resolved = resolve_field(entity, owner, field, shape, accessor)?;
                if out.iter().any(|existing| existing.name == resolved.name) {
                    return Err(ResolveError::DuplicateField {
                        entity: entity.type_name.to_owned(),
                        field:  resolved.name
                    });
                }
                out.push(resolved);
            }
        }
    }

    for (base, projection) in bases {
        let base_descriptor = base.descriptor();
        if !base_descriptor.is_shared_base() {
            trace!(
                entity = entity.type_name,
                base = base.name(),
                "skipping embedded value that is not a shared base"
            );
            continue;
        }
        path.push(Arc::clone(projection));
        collect_fields(entity, &base_descriptor, path, out)?;
        path.pop();
    }

    Ok(())
}

#[derive(Default)]
struct Flags {
    is_id:        bool,
    is_version:   bool,
    hidden:       bool,
    read_only:    bool,
    json_ignored: bool,
    not_null:     bool
}

fn resolve_field(
    entity: &EntityDescriptor,
    owner: &EntityDescriptor,
    field: &FieldDescriptor,
    shape: &ValueShape,
    accessor: Arc<dyn FieldAccess>
) -> Result<FieldMetadata, ResolveError> {
    let mut flags = Flags::default();
    let mut generation = None;
    let mut validations = Vec::new();
    let mut filter = None;
    let mut declared: Option<(RelationKind, Option<String>)> = None;

    for annotation in &field.annotations {
        match annotation {
            FieldAnnotation::Id | FieldAnnotation::EmbeddedId => flags.is_id = true,
            FieldAnnotation::Version => flags.is_version = true,
            FieldAnnotation::Hidden => flags.hidden = true,
            FieldAnnotation::ReadOnly => flags.read_only = true,
            FieldAnnotation::JsonIgnore => flags.json_ignored = true,
            FieldAnnotation::Generated(strategy) => generation = Some(*strategy),
            FieldAnnotation::Column {
                nullable
            } => flags.not_null |= !nullable,
            FieldAnnotation::Constraint(constraint) => {
                flags.not_null |= constraint.forbids_null();
                validations.push(constraint.clone());
            }
            FieldAnnotation::Filterable(config) => {
                filter.get_or_insert_with(|| config.clone());
            }
            FieldAnnotation::OneToOne {
                mapped_by
            } => declared = Some((RelationKind::OneToOne, mapped_by.clone())),
            FieldAnnotation::ManyToOne => declared = Some((RelationKind::ManyToOne, None)),
            FieldAnnotation::OneToMany {
                mapped_by
            } => declared = Some((RelationKind::OneToMany, mapped_by.clone())),
            FieldAnnotation::ManyToMany {
                mapped_by
            } => declared = Some((RelationKind::ManyToMany, mapped_by.clone())),
            FieldAnnotation::Transient => {}
        }
    }

    let shape_error = |kind| ResolveError::RelationShape {
        entity: entity.type_name.to_owned(),
        field: field.name.to_owned(),
        kind
    };

    let (ty, optional, relation) = match shape {
        ValueShape::Scalar {
            ty,
            optional
        } => {
            if let Some((kind, _)) = declared {
                return Err(shape_error(kind));
            }
            (FieldType::Scalar(*ty), *optional, None)
        }
        ValueShape::ToOne(target) => {
            let (kind, mapped_by) = declared.unwrap_or((RelationKind::ManyToOne, None));
            if !kind.is_to_one() {
                return Err(shape_error(kind));
            }
            (FieldType::Relation, true, Some(relation(kind, target, mapped_by)))
        }
        ValueShape::ToMany(target) => {
            let (kind, mapped_by) = declared.unwrap_or((RelationKind::OneToMany, None));
            if !kind.is_to_many() {
                return Err(shape_error(kind));
            }
            (FieldType::Relation, false, Some(relation(kind, target, mapped_by)))
        }
    };

    Ok(FieldMetadata {
        name: field.name.to_owned(),
        nullable: optional && !flags.not_null,
        hidden: flags.hidden,
        read_only: flags.read_only || flags.is_id,
        is_id: flags.is_id,
        is_version: flags.is_version,
        json_ignored: flags.json_ignored,
        declared_in: owner.type_name,
        ty,
        accessor,
        generation,
        validations,
        filter,
        relation
    })
}

fn relation(kind: RelationKind, target: &TypeHandle, mapped_by: Option<String>) -> RelationMetadata {
    RelationMetadata {
        kind,
        target: *target,
        inverse_field: mapped_by,
        target_id_type: id_type_of(&target.descriptor())
    }
}

/// Identity type read straight from a descriptor, without resolving it.
fn id_type_of(descriptor: &EntityDescriptor) -> Option<ScalarType> {
    let is_id = |field: &FieldDescriptor| {
        field.has(|annotation| matches!(annotation, FieldAnnotation::Id | FieldAnnotation::EmbeddedId))
    };
    let own = descriptor.fields.iter().find_map(|field| match &field.kind {
        FieldKind::Value {
            shape: ValueShape::Scalar {
                ty, ..
            },
            ..
        } if is_id(field) => Some(*ty),
        _ => None
    });
    own.or_else(|| {
        descriptor.fields.iter().find_map(|field| match &field.kind {
            FieldKind::Embedded {
                base, ..
            } => {
                let base = base.descriptor();
                base.is_shared_base().then(|| id_type_of(&base)).flatten()
            }
            _ => None
        })
    })
}

fn storage_name(descriptor: &EntityDescriptor) -> String {
    descriptor
        .annotations
        .iter()
        .find_map(|annotation| match annotation {
            TypeAnnotation::Table(name) if !name.is_empty() => Some(name.clone()),
            _ => None
        })
        .unwrap_or_else(|| descriptor.type_name.to_case(Case::Snake))
}

fn api_with_path(api: &ApiConfig, type_name: &str) -> ApiConfig {
    let mut api = api.clone();
    if api.path.as_deref().is_none_or(str::is_empty) {
        let mut path = format!("/{}", type_name.to_case(Case::Snake));
        if !path.ends_with('s') {
            path.push('s');
        }
        api.path = Some(path);
    }
    api
}
