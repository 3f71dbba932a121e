// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | Default | Description |
//! |-----------|---------|-------------|
//! | `name` | struct name | Simple name in metadata and errors |
//! | `table` | snake_case name | Storage name |
//! | `shared_base` | `false` | Fields are inherited through `#[base]` |

use darling::FromDeriveInput;
use syn::{Generics, Ident};

/// Options parsed from `#[entity(...)]`.
///
/// ```rust,ignore
/// #[entity(name = "Person", table = "people")]
/// #[entity(shared_base)]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
pub struct EntityAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Simple name override.
    #[darling(default)]
    pub name: Option<String>,

    /// Storage name override.
    #[darling(default)]
    pub table: Option<String>,

    /// Whether embedding types inherit this type's fields.
    #[darling(default)]
    pub shared_base: bool
}
