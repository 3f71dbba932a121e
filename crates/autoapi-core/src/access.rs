// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-erased field accessors.
//!
//! Metadata stores one [`FieldAccess`] object per field. The mapper and the
//! in-memory filter evaluator read and write entity fields through it
//! without knowing the concrete entity type.
//!
//! # Architecture
//!
//! ```text
//! FieldAccess (trait object)
//! ├── ScalarField<E, T>   - T: Scalar       ↔ FieldValue::Scalar
//! ├── RefField<E, T>      - Ref<T>          ↔ FieldValue::One
//! ├── RefListField<E, T>  - Vec<Ref<T>>     ↔ FieldValue::Many
//! └── Nested              - projection path + inner accessor
//!
//! Projection (trait object)
//! └── EmbeddedField<E, B> - E → B, used to reach shared base fields
//! ```
//!
//! Accessors are built from plain function pointers, so they are `Send`,
//! `Sync` and cheap to share behind an [`Arc`].

use std::{
    any::{Any, type_name},
    fmt,
    sync::Arc
};

use crate::{
    error::AccessError,
    relation::Ref,
    value::{Scalar, Value}
};

/// Shared, type-erased entity instance.
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

/// Target of a relation slot as seen through an accessor.
#[derive(Clone)]
pub enum Link {
    /// Loaded related instance.
    Instance(SharedInstance),
    /// Identity of an unloaded related instance.
    Id(Value)
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(instance) => f
                .debug_tuple("Instance")
                .field(&Arc::as_ptr(instance).cast::<()>())
                .finish(),
            Self::Id(identity) => f.debug_tuple("Id").field(identity).finish()
        }
    }
}

/// Field content as seen through an accessor.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Scalar field content.
    Scalar(Value),
    /// To-one relation slot.
    One(Option<Link>),
    /// To-many relation slots.
    Many(Vec<Link>)
}

impl FieldValue {
    /// Shape name used in diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::One(_) => "to-one relation",
            Self::Many(_) => "to-many relation"
        }
    }
}

/// Reads and writes one field of a type-erased instance.
pub trait FieldAccess: Send + Sync {
    /// Read the field.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Downcast`] if `instance` has the wrong type.
    fn read(&self, instance: &dyn Any) -> Result<FieldValue, AccessError>;

    /// Overwrite the field.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] if `instance` has the wrong type or the
    /// field refuses `value`.
    fn write(&self, instance: &mut dyn Any, value: FieldValue) -> Result<(), AccessError>;
}

impl fmt::Debug for dyn FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldAccess")
    }
}

/// Borrows an embedded value out of its owner.
pub trait Projection: Send + Sync {
    /// Project a shared borrow.
    fn project<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any>;

    /// Project a mutable borrow.
    fn project_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
}

impl fmt::Debug for dyn Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Projection")
    }
}

fn downcast<E: Any>(instance: &dyn Any) -> Result<&E, AccessError> {
    instance.downcast_ref::<E>().ok_or(AccessError::Downcast {
        expected: type_name::<E>()
    })
}

fn downcast_mut<E: Any>(instance: &mut dyn Any) -> Result<&mut E, AccessError> {
    instance.downcast_mut::<E>().ok_or(AccessError::Downcast {
        expected: type_name::<E>()
    })
}

const fn shape_mismatch(expected: &'static str, found: &FieldValue) -> AccessError {
    AccessError::ShapeMismatch {
        expected,
        found: found.shape()
    }
}

/// Accessor for a scalar field of `E` holding `T`.
pub struct ScalarField<E, T> {
    get:     fn(&E) -> &T,
    get_mut: fn(&mut E) -> &mut T
}

impl<E, T> ScalarField<E, T> {
    /// Create the accessor from a pair of field projections.
    #[must_use]
    pub const fn new(get: fn(&E) -> &T, get_mut: fn(&mut E) -> &mut T) -> Self {
        Self {
            get,
            get_mut
        }
    }
}

impl<E: Any, T: Scalar> FieldAccess for ScalarField<E, T> {
    fn read(&self, instance: &dyn Any) -> Result<FieldValue, AccessError> {
        let entity = downcast::<E>(instance)?;
        Ok(FieldValue::Scalar((self.get)(entity).to_value()))
    }

    fn write(&self, instance: &mut dyn Any, value: FieldValue) -> Result<(), AccessError> {
        let value = match value {
            FieldValue::Scalar(value) => value,
            other => return Err(shape_mismatch("scalar", &other))
        };
        let entity = downcast_mut::<E>(instance)?;
        let typed = T::from_value(value).map_err(|rejected| AccessError::Rejected {
            expected: T::TYPE,
            found:    rejected.kind()
        })?;
        *(self.get_mut)(entity) = typed;
        Ok(())
    }
}

fn link_of<T: Any + Send + Sync>(slot: &Ref<T>) -> Option<Link> {
    match slot {
        Ref::Null => None,
        Ref::Id(identity) => Some(Link::Id(identity.clone())),
        Ref::Loaded(_) | Ref::Inverse(_) => slot
            .get()
            .map(|instance| Link::Instance(instance as SharedInstance))
    }
}

fn slot_of<T: Any + Send + Sync>(link: Link) -> Result<Ref<T>, AccessError> {
    match link {
        Link::Id(identity) => Ok(Ref::Id(identity)),
        Link::Instance(instance) => instance
            .downcast::<T>()
            .map(Ref::Loaded)
            .map_err(|_| AccessError::Downcast {
                expected: type_name::<T>()
            })
    }
}

/// Accessor for a to-one relation field of `E` pointing at `T`.
pub struct RefField<E, T> {
    get:     fn(&E) -> &Ref<T>,
    get_mut: fn(&mut E) -> &mut Ref<T>
}

impl<E, T> RefField<E, T> {
    /// Create the accessor from a pair of field projections.
    #[must_use]
    pub const fn new(get: fn(&E) -> &Ref<T>, get_mut: fn(&mut E) -> &mut Ref<T>) -> Self {
        Self {
            get,
            get_mut
        }
    }
}

impl<E: Any, T: Any + Send + Sync> FieldAccess for RefField<E, T> {
    fn read(&self, instance: &dyn Any) -> Result<FieldValue, AccessError> {
        let entity = downcast::<E>(instance)?;
        Ok(FieldValue::One(link_of((self.get)(entity))))
    }

    fn write(&self, instance: &mut dyn Any, value: FieldValue) -> Result<(), AccessError> {
        let link = match value {
            FieldValue::One(link) => link,
            other => return Err(shape_mismatch("to-one relation", &other))
        };
        let slot = match link {
            Some(link) => slot_of::<T>(link)?,
            None => Ref::Null
        };
        *(self.get_mut)(downcast_mut::<E>(instance)?) = slot;
        Ok(())
    }
}

/// Accessor for a to-many relation field of `E` pointing at `T`.
pub struct RefListField<E, T> {
    get:     fn(&E) -> &Vec<Ref<T>>,
    get_mut: fn(&mut E) -> &mut Vec<Ref<T>>
}

impl<E, T> RefListField<E, T> {
    /// Create the accessor from a pair of field projections.
    #[must_use]
    pub const fn new(get: fn(&E) -> &Vec<Ref<T>>, get_mut: fn(&mut E) -> &mut Vec<Ref<T>>) -> Self {
        Self {
            get,
            get_mut
        }
    }
}

impl<E: Any, T: Any + Send + Sync> FieldAccess for RefListField<E, T> {
    fn read(&self, instance: &dyn Any) -> Result<FieldValue, AccessError> {
        let entity = downcast::<E>(instance)?;
        Ok(FieldValue::Many(
            (self.get)(entity).iter().filter_map(link_of).collect()
        ))
    }

    fn write(&self, instance: &mut dyn Any, value: FieldValue) -> Result<(), AccessError> {
        let links = match value {
            FieldValue::Many(links) => links,
            other => return Err(shape_mismatch("to-many relation", &other))
        };
        let slots = links
            .into_iter()
            .map(slot_of::<T>)
            .collect::<Result<Vec<_>, _>>()?;
        *(self.get_mut)(downcast_mut::<E>(instance)?) = slots;
        Ok(())
    }
}

/// Projection from `E` to an embedded `B`.
pub struct EmbeddedField<E, B> {
    get:     fn(&E) -> &B,
    get_mut: fn(&mut E) -> &mut B
}

impl<E, B> EmbeddedField<E, B> {
    /// Create the projection from a pair of field projections.
    #[must_use]
    pub const fn new(get: fn(&E) -> &B, get_mut: fn(&mut E) -> &mut B) -> Self {
        Self {
            get,
            get_mut
        }
    }
}

impl<E: Any, B: Any> Projection for EmbeddedField<E, B> {
    fn project<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
        let entity = instance.downcast_ref::<E>()?;
        Some((self.get)(entity))
    }

    fn project_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let entity = instance.downcast_mut::<E>()?;
        Some((self.get_mut)(entity))
    }
}

/// Accessor reaching a field through a chain of embedded projections.
#[derive(Debug)]
pub struct Nested {
    path:  Vec<Arc<dyn Projection>>,
    inner: Arc<dyn FieldAccess>
}

impl Nested {
    /// Compose `inner` behind `path`, outermost projection first.
    #[must_use]
    pub const fn new(path: Vec<Arc<dyn Projection>>, inner: Arc<dyn FieldAccess>) -> Self {
        Self {
            path,
            inner
        }
    }
}

impl FieldAccess for Nested {
    fn read(&self, instance: &dyn Any) -> Result<FieldValue, AccessError> {
        let mut current = instance;
        for step in &self.path {
            current = step.project(current).ok_or(AccessError::Downcast {
                expected: "embedded owner"
            })?;
        }
        self.inner.read(current)
    }

    fn write(&self, instance: &mut dyn Any, value: FieldValue) -> Result<(), AccessError> {
        let mut current = instance;
        for step in &self.path {
            current = step.project_mut(current).ok_or(AccessError::Downcast {
                expected: "embedded owner"
            })?;
        }
        self.inner.write(current, value)
    }
}
