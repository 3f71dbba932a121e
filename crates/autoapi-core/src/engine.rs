// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! One handle over the metadata cache, filter compiler and mapper.

use std::sync::Arc;

use tracing::debug;

use crate::{
    Result,
    config::EngineConfig,
    convert::Converter,
    descriptor::Entity,
    filter::{FilterCompiler, Params, Predicate},
    mapper::{Mapper, MapperCache, MappingConfig},
    metadata::{EntityMetadata, MetadataCache},
    value::WireMap
};

/// Metadata cache, filter compiler and mapper wired together.
///
/// Each part is also usable on its own; the engine only shares the
/// metadata cache between them and applies the configured mapping
/// defaults.
///
/// # Example
///
/// ```rust,ignore
/// let engine = Engine::new(EngineConfig::default());
/// let predicate = engine.compile::<Person, _>(&params, None)?;
/// let wire = engine.to_wire(&person)?;
/// ```
#[derive(Debug)]
pub struct Engine {
    config:   EngineConfig,
    metadata: Arc<MetadataCache>,
    compiler: FilterCompiler,
    mapper:   Mapper
}

impl Engine {
    /// Engine with the built-in value conversions.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_converter(config, Converter::new())
    }

    /// Engine whose filter compiler and mapper use `converter`.
    #[must_use]
    pub fn with_converter(config: EngineConfig, converter: Converter) -> Self {
        let metadata = Arc::new(MetadataCache::new());
        let mapper = Mapper::with_mapper_cache(
            Arc::clone(&metadata),
            MapperCache::with_capacity(config.mapper_cache_capacity)
        )
        .with_converter(converter.clone());
        debug!(
            max_depth = config.mapping.max_depth(),
            mapper_cache_capacity = config.mapper_cache_capacity,
            "engine created"
        );
        Self {
            config,
            metadata,
            compiler: FilterCompiler::with_converter(converter),
            mapper
        }
    }

    /// Configuration the engine was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared metadata cache.
    #[must_use]
    pub const fn metadata_cache(&self) -> &Arc<MetadataCache> {
        &self.metadata
    }

    /// Filter compiler.
    #[must_use]
    pub const fn compiler(&self) -> &FilterCompiler {
        &self.compiler
    }

    /// Mapper.
    #[must_use]
    pub const fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// Metadata of `T`, resolved on first use.
    ///
    /// # Errors
    ///
    /// Returns the resolution error if `T` is not a valid entity.
    pub fn metadata<T: Entity>(&self) -> Result<Arc<EntityMetadata>> {
        Ok(self.metadata.get_or_resolve::<T>()?)
    }

    /// Compile query parameters for `T`.
    ///
    /// # Errors
    ///
    /// Fails if `T` cannot be resolved.
    pub fn compile<T: Entity, P: Params + ?Sized>(
        &self,
        params: &P,
        fetch_hints: Option<&[String]>
    ) -> Result<Predicate> {
        let metadata = self.metadata::<T>()?;
        Ok(self.compiler.compile(&metadata, params, fetch_hints)?)
    }

    /// Map `entity` with the configured defaults.
    ///
    /// # Errors
    ///
    /// See [`Mapper::to_wire`].
    pub fn to_wire<T: Entity>(&self, entity: &T) -> Result<WireMap> {
        self.to_wire_with(entity, &self.config.mapping)
    }

    /// Map `entity` with explicit options.
    ///
    /// # Errors
    ///
    /// See [`Mapper::to_wire`].
    pub fn to_wire_with<T: Entity>(&self, entity: &T, config: &MappingConfig) -> Result<WireMap> {
        Ok(self.mapper.to_wire_entity(entity, config)?)
    }

    /// Build `T` from `wire`.
    ///
    /// # Errors
    ///
    /// See [`Mapper::from_wire_entity`].
    pub fn from_wire<T: Entity>(&self, wire: &WireMap) -> Result<T> {
        Ok(self.mapper.from_wire_entity(wire)?)
    }

    /// Apply `wire` to `entity`.
    ///
    /// # Errors
    ///
    /// See [`Mapper::update_in_place`].
    pub fn update<T: Entity>(&self, entity: &mut T, wire: &WireMap) -> Result<()> {
        Ok(self.mapper.update_entity(entity, wire)?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
