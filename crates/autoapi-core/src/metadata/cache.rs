// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-type metadata memoization.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::Arc
};

use parking_lot::RwLock;
use tracing::debug;

use super::{EntityMetadata, MetadataResolver};
use crate::{
    descriptor::{Entity, EntityDescriptor, TypeHandle},
    error::ResolveError
};

/// Compute-if-absent cache of resolved metadata, keyed by type.
///
/// Resolution runs outside the lock. If two threads resolve the same type
/// concurrently, the first inserted result wins and both callers receive
/// it. Failed resolutions are not cached.
///
/// The cache is an ordinary value: construct it once and share it through
/// an [`Arc`].
#[derive(Debug, Default)]
pub struct MetadataCache {
    resolver: MetadataResolver,
    entries:  RwLock<HashMap<TypeId, Arc<EntityMetadata>>>
}

impl MetadataCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached metadata for `type_id`, without resolving.
    #[must_use]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<EntityMetadata>> {
        self.entries.read().get(&type_id).cloned()
    }

    /// Metadata of the described type, resolving it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the descriptor does not resolve.
    pub fn resolve(&self, descriptor: &EntityDescriptor) -> Result<Arc<EntityMetadata>, ResolveError> {
        if let Some(metadata) = self.get(descriptor.type_id) {
            return Ok(metadata);
        }
        let resolved = Arc::new(self.resolver.resolve(descriptor)?);
        let mut entries = self.entries.write();
        let metadata = Arc::clone(entries.entry(descriptor.type_id).or_insert(resolved));
        debug!(entity = metadata.type_name(), cached = entries.len(), "metadata cached");
        Ok(metadata)
    }

    /// Metadata of the type behind `handle`.
    ///
    /// The descriptor is only built on a cache miss.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the descriptor does not resolve.
    pub fn resolve_handle(&self, handle: &TypeHandle) -> Result<Arc<EntityMetadata>, ResolveError> {
        match self.get(handle.type_id()) {
            Some(metadata) => Ok(metadata),
            None => self.resolve(&handle.descriptor())
        }
    }

    /// Metadata of entity type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if `T` does not resolve.
    pub fn get_or_resolve<T: Entity>(&self) -> Result<Arc<EntityMetadata>, ResolveError> {
        self.resolve_handle(&TypeHandle::of::<T>())
    }

    /// Number of cached types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
