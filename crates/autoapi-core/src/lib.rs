// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime engine for autoapi entities.
//!
//! This crate resolves the structure of entity types once, compiles query
//! parameters into filter predicates against that structure, and maps
//! entity instances to and from wire maps. It is used by code generated
//! with `#[derive(Entity)]` and can be used standalone with hand-written
//! descriptors.
//!
//! # Overview
//!
//! - [`MetadataResolver`] / [`MetadataCache`]: descriptor to immutable
//!   [`EntityMetadata`], memoized per type
//! - [`FilterCompiler`]: query parameters to [`Predicate`]
//! - [`Mapper`]: entity graphs to [`WireMap`] and back, depth bounded and
//!   cycle safe
//! - [`Engine`]: the three wired over one metadata cache
//! - [`prelude`]: convenient re-exports
//!
//! # Architecture
//!
//! ```text
//! EntityDescriptor ──resolve──► EntityMetadata ──┬──► FilterCompiler ──► Predicate
//!   (derive or hand)             (cached, Arc)   │
//!                                                └──► Mapper ◄──► WireMap
//! ```
//!
//! The filter compiler and the mapper depend on metadata only, never on
//! each other.
//!
//! # Usage
//!
//! ```rust,ignore
//! use autoapi_core::prelude::*;
//!
//! let engine = Engine::new(EngineConfig::default());
//! let predicate = engine.compile::<Person, _>(&params, None)?;
//! let wire = engine.to_wire_with(&person, &MappingConfig::STANDARD)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access;
pub mod config;
pub mod convert;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod filter;
pub mod mapper;
pub mod metadata;
pub mod prelude;
pub mod relation;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use config::EngineConfig;
pub use descriptor::{Entity, EntityDescriptor, FieldDescriptor, TypeHandle};
pub use engine::Engine;
pub use error::{AccessError, Error, FilterError, MappingError, ResolveError, Result};
pub use filter::{Expr, FilterCompiler, FilterConfig, FilterOp, Predicate};
pub use mapper::{Mapper, MappingConfig};
pub use metadata::{EntityMetadata, FieldMetadata, MetadataCache, MetadataResolver};
pub use relation::Ref;
pub use value::{Scalar, ScalarType, Value, WireMap};
