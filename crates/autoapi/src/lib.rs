// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # autoapi
//!
//! One crate, all features. Re-exports:
//! - [`Entity`] derive macro from `autoapi-derive-impl`
//! - All types from `autoapi-core` ([`Engine`], [`FilterCompiler`],
//!   [`Mapper`], [`MetadataCache`], [`Ref`])
//!
//! Generated code names `::autoapi_core`, so crates deriving [`Entity`]
//! depend on `autoapi-core` next to this crate.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use autoapi::{Engine, Entity, MappingConfig, Ref};
//!
//! #[derive(Debug, Default, Entity)]
//! #[auto_api(path = "/people")]
//! pub struct Person {
//!     #[id]
//!     pub id: i64,
//!     #[filter(eq, like)]
//!     pub name: String,
//!     #[filter(range)]
//!     pub age: Option<i32>,
//!     #[many_to_one]
//!     pub team: Ref<Team>
//! }
//!
//! let engine = Engine::default();
//! let params = [("name_like", "ann"), ("age_gte", "18")];
//! let predicate = engine.compile::<Person, _>(&params[..], None)?;
//! let wire = engine.to_wire_with(&person, &MappingConfig::STANDARD)?;
//! ```

pub use autoapi_core::*;
pub use autoapi_derive_impl::Entity;
