// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relation slots for entity fields.
//!
//! A to-one relation is stored as [`Ref<T>`], a to-many relation as
//! `Vec<Ref<T>>`. A slot can be empty, hold only the identity of the related
//! entity (a lazy reference), or point at a loaded instance.
//!
//! Object graphs with back-references are built with [`Ref::Inverse`], which
//! holds a [`Weak`] pointer so that `Arc` cycles do not leak:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use autoapi_core::Ref;
//!
//! #[derive(Default)]
//! struct Node {
//!     parent: Ref<Node>
//! }
//!
//! let child = Arc::new(Node::default());
//! let looped = Arc::new_cyclic(|me| Node {
//!     parent: Ref::Inverse(me.clone())
//! });
//!
//! assert!(child.parent.is_null());
//! assert!(looped.parent.get().is_some());
//! ```

use std::{
    fmt,
    sync::{Arc, Weak}
};

use crate::value::Value;

/// Relation slot pointing at an entity of type `T`.
pub enum Ref<T> {
    /// No related entity.
    Null,
    /// Lazy reference carrying only the related entity's identity.
    Id(Value),
    /// Loaded related entity.
    Loaded(Arc<T>),
    /// Back-reference to an entity owned elsewhere in the graph.
    Inverse(Weak<T>)
}

impl<T> Ref<T> {
    /// Wrap a freshly built entity.
    #[must_use]
    pub fn loaded(entity: T) -> Self {
        Self::Loaded(Arc::new(entity))
    }

    /// Share an already allocated entity.
    #[must_use]
    pub fn shared(entity: &Arc<T>) -> Self {
        Self::Loaded(Arc::clone(entity))
    }

    /// Back-reference to an already allocated entity.
    #[must_use]
    pub fn inverse(entity: &Arc<T>) -> Self {
        Self::Inverse(Arc::downgrade(entity))
    }

    /// Lazy reference by identity.
    #[must_use]
    pub fn id(identity: impl Into<Value>) -> Self {
        Self::Id(identity.into())
    }

    /// Check if the slot is empty.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Related entity, if loaded and still alive.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        match self {
            Self::Loaded(entity) => Some(Arc::clone(entity)),
            Self::Inverse(entity) => entity.upgrade(),
            Self::Null | Self::Id(_) => None
        }
    }

    /// Identity of a lazy reference.
    #[must_use]
    pub const fn identity(&self) -> Option<&Value> {
        match self {
            Self::Id(identity) => Some(identity),
            _ => None
        }
    }
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Self::Null
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Null => Self::Null,
            Self::Id(identity) => Self::Id(identity.clone()),
            Self::Loaded(entity) => Self::Loaded(Arc::clone(entity)),
            Self::Inverse(entity) => Self::Inverse(Weak::clone(entity))
        }
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Id(identity) => f.debug_tuple("Id").field(identity).finish(),
            Self::Loaded(entity) => f.debug_tuple("Loaded").field(&Arc::as_ptr(entity)).finish(),
            Self::Inverse(entity) => f.debug_tuple("Inverse").field(&entity.as_ptr()).finish()
        }
    }
}
