// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw structural descriptions of entity types.
//!
//! An [`EntityDescriptor`] is what a type registry hands to the resolver:
//! the type's markers, its fields in declaration order, and an accessor
//! pair per field. It is the explicit per-type registration table that
//! stands in for runtime reflection.
//!
//! Descriptors are usually produced by `#[derive(Entity)]`, but can be
//! written by hand:
//!
//! ```rust
//! use autoapi_core::prelude::*;
//!
//! #[derive(Default)]
//! struct Tag {
//!     id:    i64,
//!     label: String
//! }
//!
//! impl Entity for Tag {
//!     fn descriptor() -> EntityDescriptor {
//!         EntityDescriptor::of::<Self>()
//!             .named("Tag")
//!             .annotate(TypeAnnotation::AutoApi(ApiConfig::new()))
//!             .field(
//!                 FieldDescriptor::scalar::<Self, i64>("id", |t| &t.id, |t| &mut t.id)
//!                     .annotate(FieldAnnotation::Id)
//!             )
//!             .field(FieldDescriptor::scalar::<Self, String>(
//!                 "label",
//!                 |t| &t.label,
//!                 |t| &mut t.label
//!             ))
//!     }
//! }
//!
//! let descriptor = Tag::descriptor();
//! assert_eq!(descriptor.type_name, "Tag");
//! assert_eq!(descriptor.fields.len(), 2);
//! ```
//!
//! # Module Structure
//!
//! ```text
//! descriptor.rs (EntityDescriptor, FieldDescriptor, TypeHandle, Entity)
//! └── annotation.rs - TypeAnnotation, FieldAnnotation and their payloads
//! ```

mod annotation;

use std::{
    any::{Any, TypeId, type_name},
    fmt,
    sync::Arc
};

pub use annotation::{
    ApiConfig, AuditConfig, Constraint, Expose, FieldAnnotation, GenerationType,
    SoftDeleteConfig, TypeAnnotation
};

use crate::{
    access::{EmbeddedField, FieldAccess, Projection, RefField, RefListField, ScalarField},
    relation::Ref,
    value::{Scalar, ScalarType}
};

/// A domain type known to the engine.
///
/// Implemented by `#[derive(Entity)]` or by hand. The descriptor is
/// rebuilt on every call; the resolver caches what it derives from it.
pub trait Entity: Any + Send + Sync + Default {
    /// Describe the type's markers and fields.
    fn descriptor() -> EntityDescriptor;
}

/// Builds a zero-valued instance of an entity type.
pub type Constructor = fn() -> Box<dyn Any + Send + Sync>;

fn construct<T: Entity>() -> Box<dyn Any + Send + Sync> {
    Box::new(T::default())
}

pub(crate) fn simple_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Lazy handle to a related entity type.
///
/// Holds the descriptor function rather than the descriptor, so that
/// self-referencing and mutually referencing types never recurse while
/// their descriptors are built.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    type_id:    TypeId,
    name:       &'static str,
    descriptor: fn() -> EntityDescriptor
}

impl TypeHandle {
    /// Handle for entity type `T`.
    #[must_use]
    pub fn of<T: Entity>() -> Self {
        Self {
            type_id:    TypeId::of::<T>(),
            name:       simple_name::<T>(),
            descriptor: T::descriptor
        }
    }

    /// Type identifier.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Simple type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Build the type's descriptor.
    #[must_use]
    pub fn descriptor(&self) -> EntityDescriptor {
        (self.descriptor)()
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeHandle").field(&self.name).finish()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeHandle {}

/// Shape of a value-carrying field.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueShape {
    /// Plain scalar.
    Scalar {
        /// Scalar type.
        ty:       ScalarType,
        /// Whether the Rust type is `Option<_>`.
        optional: bool
    },
    /// `Ref<T>` slot.
    ToOne(TypeHandle),
    /// `Vec<Ref<T>>` slot.
    ToMany(TypeHandle)
}

/// What a field holds and how to reach it.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Scalar or relation slot with its accessor.
    Value {
        /// Field shape.
        shape:  ValueShape,
        /// Accessor pair.
        access: Arc<dyn FieldAccess>
    },
    /// Embedded value of another described type.
    Embedded {
        /// Embedded type.
        base:       TypeHandle,
        /// Borrow from owner to embedded value.
        projection: Arc<dyn Projection>
    },
    /// Field with no accessor; never part of the entity structure.
    Transient
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name.
    pub name:        &'static str,
    /// Shape and accessor.
    pub kind:        FieldKind,
    /// Declared markers, in declaration order.
    pub annotations: Vec<FieldAnnotation>
}

impl FieldDescriptor {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            annotations: Vec::new()
        }
    }

    /// Scalar field of `E` holding `T`.
    #[must_use]
    pub fn scalar<E: Any, T: Scalar>(
        name: &'static str,
        get: fn(&E) -> &T,
        get_mut: fn(&mut E) -> &mut T
    ) -> Self {
        Self::new(
            name,
            FieldKind::Value {
                shape:  ValueShape::Scalar {
                    ty:       T::TYPE,
                    optional: T::OPTIONAL
                },
                access: Arc::new(ScalarField::new(get, get_mut))
            }
        )
    }

    /// To-one relation field of `E` pointing at `T`.
    #[must_use]
    pub fn to_one<E: Any, T: Entity>(
        name: &'static str,
        get: fn(&E) -> &Ref<T>,
        get_mut: fn(&mut E) -> &mut Ref<T>
    ) -> Self {
        Self::new(
            name,
            FieldKind::Value {
                shape:  ValueShape::ToOne(TypeHandle::of::<T>()),
                access: Arc::new(RefField::new(get, get_mut))
            }
        )
    }

    /// To-many relation field of `E` pointing at `T`.
    #[must_use]
    pub fn to_many<E: Any, T: Entity>(
        name: &'static str,
        get: fn(&E) -> &Vec<Ref<T>>,
        get_mut: fn(&mut E) -> &mut Vec<Ref<T>>
    ) -> Self {
        Self::new(
            name,
            FieldKind::Value {
                shape:  ValueShape::ToMany(TypeHandle::of::<T>()),
                access: Arc::new(RefListField::new(get, get_mut))
            }
        )
    }

    /// Embedded value of `E` of described type `B`.
    #[must_use]
    pub fn embedded<E: Any, B: Entity>(
        name: &'static str,
        get: fn(&E) -> &B,
        get_mut: fn(&mut E) -> &mut B
    ) -> Self {
        Self::new(
            name,
            FieldKind::Embedded {
                base:       TypeHandle::of::<B>(),
                projection: Arc::new(EmbeddedField::new(get, get_mut))
            }
        )
    }

    /// Field excluded from the entity structure.
    #[must_use]
    pub fn transient(name: &'static str) -> Self {
        Self::new(name, FieldKind::Transient).annotate(FieldAnnotation::Transient)
    }

    /// Add a marker.
    #[must_use]
    pub fn annotate(mut self, annotation: FieldAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Check if a marker matching `predicate` is declared.
    pub fn has(&self, predicate: impl Fn(&FieldAnnotation) -> bool) -> bool {
        self.annotations.iter().any(predicate)
    }
}

/// Structural description of one entity type.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    /// Type identifier.
    pub type_id:     TypeId,
    /// Simple type name.
    pub type_name:   &'static str,
    /// Fully qualified Rust path.
    pub rust_path:   &'static str,
    /// Type markers.
    pub annotations: Vec<TypeAnnotation>,
    /// Fields in declaration order.
    pub fields:      Vec<FieldDescriptor>,
    /// Zero-value constructor.
    pub construct:   Constructor
}

impl EntityDescriptor {
    /// Empty descriptor for `T`.
    #[must_use]
    pub fn of<T: Entity>() -> Self {
        Self {
            type_id:     TypeId::of::<T>(),
            type_name:   simple_name::<T>(),
            rust_path:   type_name::<T>(),
            annotations: Vec::new(),
            fields:      Vec::new(),
            construct:   construct::<T>
        }
    }

    /// Override the simple type name.
    #[must_use]
    pub const fn named(mut self, type_name: &'static str) -> Self {
        self.type_name = type_name;
        self
    }

    /// Add a type marker.
    #[must_use]
    pub fn annotate(mut self, annotation: TypeAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Exposure configuration, if the type is an exposed entity.
    #[must_use]
    pub fn api(&self) -> Option<&ApiConfig> {
        self.annotations.iter().find_map(|annotation| match annotation {
            TypeAnnotation::AutoApi(config) => Some(config),
            _ => None
        })
    }

    /// Check if the type shares its fields with embedding types.
    #[must_use]
    pub fn is_shared_base(&self) -> bool {
        self.annotations
            .iter()
            .any(|annotation| matches!(annotation, TypeAnnotation::SharedBase))
    }
}
