// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! State of one root mapping call.

use std::{any::Any, collections::HashSet};

use super::MappingConfig;

/// Address of an instance, used as its identity on the active path.
///
/// Two borrows of the same instance share an address; a related instance
/// behind a `Ref` has the address of its `Arc` payload.
#[must_use]
pub fn identity_of(instance: &dyn Any) -> usize {
    std::ptr::from_ref(instance).cast::<()>().addr()
}

/// Active recursion path of one root mapping call.
///
/// Instances are entered on descent and exited on return, so the set only
/// ever holds the chain from the root to the instance being mapped.
/// Siblings mapped one after another never see each other.
#[derive(Debug)]
pub struct MappingContext {
    config: MappingConfig,
    path:   HashSet<usize>
}

impl MappingContext {
    /// Empty path for a new root call.
    #[must_use]
    pub fn new(config: MappingConfig) -> Self {
        Self {
            config,
            path: HashSet::new()
        }
    }

    /// Options of this call.
    #[must_use]
    pub const fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Push `address` onto the path. Returns `false` if it was already there.
    pub fn enter(&mut self, address: usize) -> bool {
        self.path.insert(address)
    }

    /// Pop `address` off the path.
    pub fn exit(&mut self, address: usize) {
        self.path.remove(&address);
    }

    /// Check if `address` is on the active path and cycles are detected.
    #[must_use]
    pub fn is_being_mapped(&self, address: usize) -> bool {
        self.config.detects_cycles() && self.path.contains(&address)
    }

    /// Check if a relation at `depth` hops pointing at `address` may be
    /// expanded into a nested map.
    #[must_use]
    pub fn may_expand(&self, depth: u32, address: usize) -> bool {
        depth < self.config.max_depth() && !self.is_being_mapped(address)
    }

    /// Number of instances on the active path.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }
}
