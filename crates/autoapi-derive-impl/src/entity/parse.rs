// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Entity derive macro.
//!
//! Entity-level `#[entity(...)]` options are parsed with [`darling`]. The
//! marker attributes (`#[auto_api]`, `#[soft_delete]`, `#[auditable]`) and
//! every field attribute are parsed by hand with `parse_nested_meta`,
//! because they are bare markers or carry small nested option lists.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── entity.rs      - EntityDef
//! │   ├── attrs.rs   - #[entity(...)] via darling
//! │   └── markers.rs - #[auto_api] #[soft_delete] #[auditable]
//! └── field.rs       - FieldDef
//!     ├── shape.rs
//!     ├── storage.rs
//!     ├── relation.rs
//!     ├── filter.rs
//!     └── validation.rs
//! ```
//!
//! # Data Structures
//!
//! ```text
//! EntityDef
//! ├── ident, generics
//! ├── name, table, shared_base      (#[entity(...)])
//! ├── api: Option<ApiDef>           (#[auto_api])
//! ├── soft_delete, auditable
//! └── fields: Vec<FieldDef>
//!     └── FieldDef
//!         ├── ident, ty, shape, doc
//!         ├── storage: StorageConfig
//!         ├── relation: Option<RelationConfig>
//!         ├── filter: Option<FilterConfig>
//!         └── constraints: Vec<Constraint>
//! ```

mod entity;
mod field;

pub use entity::EntityDef;
pub use field::{FieldDef, FieldShape};
