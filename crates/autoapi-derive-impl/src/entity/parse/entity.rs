// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level parsing and the main [`EntityDef`] structure.
//!
//! # Module Structure
//!
//! ```text
//! entity/
//! ├── attrs.rs  : EntityAttrs (darling parsing struct)
//! ├── markers.rs: #[auto_api], #[soft_delete], #[auditable]
//! └── tests.rs  : Unit tests
//! ```

mod attrs;
mod markers;

use darling::FromDeriveInput;
use syn::{Data, DeriveInput, Fields, Generics, Ident};

use self::attrs::EntityAttrs;
pub use self::markers::{ApiDef, AuditDef, SoftDeleteDef};
use super::field::FieldDef;
use crate::utils::docs::extract_doc_summary;

/// Parsed entity: type-level options plus every named field in
/// declaration order.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident:       Ident,
    /// Struct generics, forwarded to the generated impl.
    pub generics:    Generics,
    /// `#[entity(name = "...")]`.
    pub name:        Option<String>,
    /// `#[entity(table = "...")]`.
    pub table:       Option<String>,
    /// `#[entity(shared_base)]`.
    pub shared_base: bool,
    /// `#[auto_api(...)]`.
    pub api:         Option<ApiDef>,
    /// `#[soft_delete(...)]`.
    pub soft_delete: Option<SoftDeleteDef>,
    /// `#[auditable(...)]`.
    pub auditable:   Option<AuditDef>,
    /// Fields in declaration order.
    pub fields:      Vec<FieldDef>
}

impl EntityDef {
    /// Parse entity definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to an enum, union, tuple or unit struct
    /// - Unknown `#[entity(...)]` or marker options
    /// - Any field error from [`FieldDef::from_field`]
    /// - More than one `#[id]` / `#[embedded_id]` field
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;

        let Data::Struct(data) = &input.data else {
            return Err(darling::Error::custom("Entity can only be derived for structs")
                .with_span(&input.ident));
        };
        let Fields::Named(named) = &data.fields else {
            return Err(
                darling::Error::custom("Entity requires named fields").with_span(&input.ident)
            );
        };

        let mut errors = darling::Error::accumulator();
        let fields: Vec<FieldDef> = named
            .named
            .iter()
            .filter_map(|field| errors.handle(FieldDef::from_field(field)))
            .collect();

        let summary = extract_doc_summary(&input.attrs);
        let api = errors
            .handle(markers::parse_auto_api(&input.attrs, summary.as_deref()).map_err(Into::into))
            .flatten();
        let soft_delete = errors
            .handle(markers::parse_soft_delete(&input.attrs).map_err(Into::into))
            .flatten();
        let auditable = errors
            .handle(markers::parse_auditable(&input.attrs).map_err(Into::into))
            .flatten();

        let mut identities = fields.iter().filter(|field| field.is_identity());
        if let (Some(first), Some(second)) = (identities.next(), identities.next()) {
            errors.push(
                darling::Error::custom(format!(
                    "entity declares more than one id field: `{}` and `{}`",
                    first.name_str(),
                    second.name_str()
                ))
                .with_span(&second.ident)
            );
        }

        errors.finish()?;

        Ok(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            name: attrs.name,
            table: attrs.table,
            shared_base: attrs.shared_base,
            api,
            soft_delete,
            auditable,
            fields
        })
    }
}
