// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Precomputed per-type field plans and their bounded cache.

use std::{any::TypeId, sync::Arc};

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::metadata::{EntityMetadata, FieldMetadata};

/// Fields of one entity type selected for output and for input.
#[derive(Debug)]
pub struct EntityMapper {
    metadata: Arc<EntityMetadata>,
    output:   Vec<usize>,
    input:    Vec<usize>
}

impl EntityMapper {
    /// Select output fields (not hidden) and input fields (writable).
    #[must_use]
    pub fn compile(metadata: Arc<EntityMetadata>) -> Self {
        let output = indices(&metadata, |field| !field.is_hidden());
        let input = indices(&metadata, FieldMetadata::is_writable);
        debug!(
            entity = metadata.type_name(),
            output = output.len(),
            input = input.len(),
            "compiled entity mapper"
        );
        Self {
            metadata,
            output,
            input
        }
    }

    /// Metadata the plan was compiled from.
    #[must_use]
    pub fn metadata(&self) -> &Arc<EntityMetadata> {
        &self.metadata
    }

    /// Fields emitted on output, in declaration order.
    pub fn output_fields(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.output.iter().map(|&index| &self.metadata.fields()[index])
    }

    /// Fields accepted on input, in declaration order.
    pub fn input_fields(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.input.iter().map(|&index| &self.metadata.fields()[index])
    }
}

fn indices(metadata: &EntityMetadata, keep: impl Fn(&FieldMetadata) -> bool) -> Vec<usize> {
    metadata
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| keep(field))
        .map(|(index, _)| index)
        .collect()
}

/// Bounded type → [`EntityMapper`] cache.
///
/// When full, inserting drops the oldest entry.
#[derive(Debug)]
pub struct MapperCache {
    capacity: usize,
    entries:  Mutex<IndexMap<TypeId, Arc<EntityMapper>>>
}

impl MapperCache {
    /// Capacity used by [`MapperCache::new`].
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Cache with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Cache holding at most `capacity` entries (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(IndexMap::with_capacity(capacity))
        }
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached plan for `type_id`.
    #[must_use]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<EntityMapper>> {
        self.entries.lock().get(&type_id).cloned()
    }

    /// Cached plan for `metadata`'s type, compiling it on a miss.
    pub fn get_or_compile(&self, metadata: &Arc<EntityMetadata>) -> Arc<EntityMapper> {
        let mut entries = self.entries.lock();
        if let Some(mapper) = entries.get(&metadata.type_id()) {
            return Arc::clone(mapper);
        }
        let mapper = Arc::new(EntityMapper::compile(Arc::clone(metadata)));
        entries.insert(metadata.type_id(), Arc::clone(&mapper));
        while entries.len() > self.capacity {
            if let Some((_, evicted)) = entries.shift_remove_index(0) {
                debug!(entity = evicted.metadata().type_name(), "evicted entity mapper");
            }
        }
        mapper
    }

    /// Number of cached plans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if no plan is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every cached plan.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for MapperCache {
    fn default() -> Self {
        Self::new()
    }
}
