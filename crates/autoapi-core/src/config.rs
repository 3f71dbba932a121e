// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Engine configuration.
//!
//! Every key is optional:
//!
//! ```json
//! {
//!     "mapping": { "max_depth": 1, "detect_cycles": true, "include_null_fields": false },
//!     "mapper_cache_capacity": 256
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::mapper::{MapperCache, MappingConfig};

/// Settings for an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Mapping options used when a call does not pass its own.
    pub mapping:               MappingConfig,
    /// Maximum number of compiled mapper plans kept.
    pub mapper_cache_capacity: usize
}

impl EngineConfig {
    /// Set the default mapping options.
    #[must_use]
    pub const fn mapping(mut self, mapping: MappingConfig) -> Self {
        self.mapping = mapping;
        self
    }

    /// Set the mapper cache capacity.
    #[must_use]
    pub const fn mapper_cache_capacity(mut self, capacity: usize) -> Self {
        self.mapper_cache_capacity = capacity;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mapping:               MappingConfig::default(),
            mapper_cache_capacity: MapperCache::DEFAULT_CAPACITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.mapper_cache_capacity, 256);
        assert_eq!(config.mapping, MappingConfig::SHALLOW);
    }

    #[test]
    fn partial_document() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"mapping": {"max_depth": -2, "detect_cycles": false}}"#)
                .unwrap();
        assert_eq!(config.mapping, MappingConfig::new(0, false, false));
        assert_eq!(config.mapper_cache_capacity, 256);
    }

    #[test]
    fn builder() {
        let config = EngineConfig::default()
            .mapping(MappingConfig::DEEP)
            .mapper_cache_capacity(8);
        assert_eq!(config.mapping.max_depth(), 3);
        assert_eq!(config.mapper_cache_capacity, 8);
    }
}
