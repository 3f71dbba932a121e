// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field lookup for in-memory predicate evaluation.

use std::{any::Any, collections::HashMap};

use tracing::trace;

use crate::{
    access::{FieldValue, Link},
    metadata::{EntityMetadata, FieldMetadata, MetadataCache},
    value::{Value, WireMap}
};

/// Something an [`Expr`](super::Expr) can be evaluated against.
pub trait Record {
    /// Value of `field`; `None` if the record has no such field.
    fn value(&self, field: &str) -> Option<Value>;
}

impl Record for WireMap {
    fn value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl<S: std::hash::BuildHasher> Record for HashMap<String, Value, S> {
    fn value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

/// A typed entity instance viewed through its metadata.
///
/// Scalar fields read as their value. Relation fields read as the related
/// identity (a list of identities for to-many relations), so that a filter
/// on a relation field compares identities.
pub struct EntityRecord<'a> {
    cache:    &'a MetadataCache,
    metadata: &'a EntityMetadata,
    instance: &'a dyn Any
}

impl<'a> EntityRecord<'a> {
    /// View `instance` through `metadata`; `cache` resolves related types.
    #[must_use]
    pub const fn new(
        cache: &'a MetadataCache,
        metadata: &'a EntityMetadata,
        instance: &'a dyn Any
    ) -> Self {
        Self {
            cache,
            metadata,
            instance
        }
    }

    fn identity(&self, field: &FieldMetadata, link: Link) -> Option<Value> {
        match link {
            Link::Id(identity) => Some(identity),
            Link::Instance(related) => {
                let target = self.cache.resolve_handle(field.relation()?.target()).ok()?;
                target.identity_of(&*related).ok()
            }
        }
    }
}

impl Record for EntityRecord<'_> {
    fn value(&self, name: &str) -> Option<Value> {
        let field = self.metadata.field(name)?;
        let read = match field.accessor().read(self.instance) {
            Ok(read) => read,
            Err(err) => {
                trace!(entity = self.metadata.type_name(), field = name, %err, "field unreadable");
                return None;
            }
        };
        match read {
            FieldValue::Scalar(value) => Some(value),
            FieldValue::One(None) => Some(Value::Null),
            FieldValue::One(Some(link)) => self.identity(field, link),
            FieldValue::Many(links) => Some(Value::List(
                links
                    .into_iter()
                    .filter_map(|link| self.identity(field, link))
                    .collect()
            ))
        }
    }
}
