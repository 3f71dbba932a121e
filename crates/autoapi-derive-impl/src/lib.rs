// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Internal proc-macro implementation for autoapi. Use the `autoapi` crate
//! instead of depending on this one directly.
//!
//! The only macro is `#[derive(Entity)]`, which turns attribute markers on
//! a struct and its fields into an `autoapi_core::Entity` implementation:
//! a descriptor with one accessor pair per field, read by the runtime
//! metadata resolver.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod entity;
mod utils;

use proc_macro::TokenStream;

/// Derive an `autoapi_core::Entity` implementation.
///
/// The generated `descriptor()` lists every named field in declaration
/// order with its markers, so the runtime resolver never needs reflection.
/// The struct must implement `Default`.
///
/// # Entity Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[auto_api]` | Expose the type as an entity. Without it resolution fails with `NotAnEntity`. |
/// | `#[auto_api(path = "/people", expose = "read_only", pagination = false, sorting = false, description = "...", tags("a", "b"))]` | Exposure options. `description` defaults to the doc comment summary. |
/// | `#[entity(name = "Person")]` | Simple name used in metadata and errors. Defaults to the struct name. |
/// | `#[entity(table = "people")]` | Storage name. Defaults to the snake_case struct name. |
/// | `#[entity(shared_base)]` | Fields are inherited by structs embedding this one with `#[base]`. |
/// | `#[soft_delete]` / `#[soft_delete(deleted_field = "...", deleted_at_field = "...")]` | Soft-delete markers. |
/// | `#[auditable]` / `#[auditable(versioned, created_at_field = "...", ...)]` | Audit markers. |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[id]` / `#[embedded_id]` | Identity field. At most one per entity. |
/// | `#[version]` | Optimistic-lock version. |
/// | `#[hidden]` | Never read from or written to the wire. |
/// | `#[read_only]` | Emitted, never written from input. |
/// | `#[transient]` | Not part of the entity structure. |
/// | `#[json_ignore]` | Recorded for external serializers. |
/// | `#[generated]` / `#[generated(identity)]` | Storage-generated value: `auto`, `identity`, `sequence`, `uuid`. |
/// | `#[column(nullable = false)]` | Column options. |
/// | `#[validate(not_blank, length(max = 80), email, ...)]` | Validation constraints. |
/// | `#[filter]` / `#[filter(like, range, param = "q", case_sensitive = false)]` | Query filter operators. |
/// | `#[one_to_one]`, `#[many_to_one]`, `#[one_to_many(mapped_by = "x")]`, `#[many_to_many]` | Relation kind. |
/// | `#[base]` | Embedded shared base whose fields are inherited. |
///
/// Field shapes follow the field type: `Ref<T>` is a to-one relation,
/// `Vec<Ref<T>>` a to-many relation, anything else a scalar implementing
/// `autoapi_core::Scalar`.
///
/// # Filter Operators
///
/// | Operator | Parameter |
/// |----------|-----------|
/// | `eq` | `field` |
/// | `like` | `field_like` |
/// | `gt`, `gte`, `lt`, `lte` | `field_gt`, `field_gte`, `field_lt`, `field_lte` |
/// | `range` | `field_gte`, `field_lte` |
/// | `in_list`, `not_in` | `field_in`, `field_not_in` |
/// | `is_null` | `field_null` |
/// | `between` | `field_between` |
///
/// # Example
///
/// ```rust,ignore
/// use autoapi::{Entity, Ref};
///
/// /// A person in the directory.
/// #[derive(Debug, Default, Entity)]
/// #[auto_api(path = "/people", tags("directory"))]
/// #[entity(table = "people")]
/// pub struct Person {
///     #[id]
///     #[generated(identity)]
///     pub id: i64,
///
///     #[validate(not_blank)]
///     #[filter(eq, like, case_sensitive = false)]
///     pub name: String,
///
///     #[filter(range, between)]
///     pub age: Option<i32>,
///
///     #[hidden]
///     pub password_hash: String,
///
///     #[many_to_one]
///     #[filter]
///     pub team: Ref<Team>,
/// }
/// ```
#[proc_macro_derive(
    Entity,
    attributes(
        entity,
        auto_api,
        soft_delete,
        auditable,
        id,
        embedded_id,
        version,
        hidden,
        read_only,
        transient,
        json_ignore,
        generated,
        column,
        validate,
        filter,
        one_to_one,
        many_to_one,
        one_to_many,
        many_to_many,
        base
    )
)]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
