// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use autoapi_core::prelude::*;
//! ```

pub use crate::{
    Engine, EngineConfig, Entity, EntityDescriptor, EntityMetadata, Error, Expr, FieldDescriptor,
    FilterCompiler, FilterConfig, FilterOp, Mapper, MappingConfig, MetadataCache, Predicate, Ref,
    Result, Scalar, ScalarType, Value, WireMap,
    descriptor::{ApiConfig, Constraint, FieldAnnotation, GenerationType, TypeAnnotation},
    filter::{Params, QueryKind, Record},
    mapper::MapperCache
};
