// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relation markers.
//!
//! ```rust,ignore
//! #[many_to_one]
//! pub team: Ref<Team>,
//!
//! #[one_to_many(mapped_by = "team")]
//! pub members: Vec<Ref<Person>>,
//! ```
//!
//! A relation-shaped field without a marker defaults to many-to-one for
//! `Ref<T>` and one-to-many for `Vec<Ref<T>>`.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, LitStr, Meta};

use super::FieldShape;

/// Declared relation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// `#[one_to_one]`.
    OneToOne,
    /// `#[many_to_one]`.
    ManyToOne,
    /// `#[one_to_many]`.
    OneToMany,
    /// `#[many_to_many]`.
    ManyToMany
}

impl RelationKind {
    fn from_attr_name(name: &str) -> Option<Self> {
        match name {
            "one_to_one" => Some(Self::OneToOne),
            "many_to_one" => Some(Self::ManyToOne),
            "one_to_many" => Some(Self::OneToMany),
            "many_to_many" => Some(Self::ManyToMany),
            _ => None
        }
    }

    /// Attribute spelling.
    #[must_use]
    pub const fn attr_name(self) -> &'static str {
        match self {
            Self::OneToOne => "one_to_one",
            Self::ManyToOne => "many_to_one",
            Self::OneToMany => "one_to_many",
            Self::ManyToMany => "many_to_many"
        }
    }

    /// Check if the kind relates to a collection.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

/// Parsed relation marker.
#[derive(Debug, Clone)]
pub struct RelationConfig {
    /// Relation kind.
    pub kind:      RelationKind,
    /// Owning field on the other side.
    pub mapped_by: Option<String>,
    /// Marker span for diagnostics.
    pub span:      Span
}

impl RelationConfig {
    /// Parse `attr` if it is a relation marker.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown options and for `mapped_by` on
    /// `#[many_to_one]`, which never has an owning side elsewhere.
    pub fn from_attr(attr: &Attribute) -> syn::Result<Option<Self>> {
        let Some(kind) = attr
            .path()
            .get_ident()
            .and_then(|ident| RelationKind::from_attr_name(&ident.to_string()))
        else {
            return Ok(None);
        };
        let mut mapped_by = None;
        if !matches!(attr.meta, Meta::Path(_)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("mapped_by") && kind != RelationKind::ManyToOne {
                    mapped_by = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else {
                    Err(meta.error(format!("unknown {} option", kind.attr_name())))
                }
            })?;
        }
        Ok(Some(Self {
            kind,
            mapped_by,
            span: attr_span(attr)
        }))
    }

    /// Check that the marker fits the field's shape.
    ///
    /// # Errors
    ///
    /// Returns an error pointing at the marker when a collection kind sits
    /// on `Ref<T>`, a single kind on `Vec<Ref<T>>`, or any kind on a scalar.
    pub fn check_shape(&self, shape: &FieldShape) -> syn::Result<()> {
        let fits = match shape {
            FieldShape::Scalar => false,
            FieldShape::ToOne(_) => !self.kind.is_collection(),
            FieldShape::ToMany(_) => self.kind.is_collection()
        };
        if fits {
            return Ok(());
        }
        let expected = if self.kind.is_collection() {
            "`Vec<Ref<T>>`"
        } else {
            "`Ref<T>`"
        };
        Err(syn::Error::new(
            self.span,
            format!("#[{}] requires a field of type {expected}", self.kind.attr_name())
        ))
    }

    /// Field annotation for this relation.
    pub fn annotation(&self) -> TokenStream {
        let mapped_by = match &self.mapped_by {
            Some(name) => quote! { ::core::option::Option::Some(::std::string::String::from(#name)) },
            None => quote! { ::core::option::Option::None }
        };
        match self.kind {
            RelationKind::OneToOne => quote! {
                ::autoapi_core::descriptor::FieldAnnotation::OneToOne { mapped_by: #mapped_by }
            },
            RelationKind::ManyToOne => quote! { ::autoapi_core::descriptor::FieldAnnotation::ManyToOne },
            RelationKind::OneToMany => quote! {
                ::autoapi_core::descriptor::FieldAnnotation::OneToMany { mapped_by: #mapped_by }
            },
            RelationKind::ManyToMany => quote! {
                ::autoapi_core::descriptor::FieldAnnotation::ManyToMany { mapped_by: #mapped_by }
            }
        }
    }
}

fn attr_span(attr: &Attribute) -> Span {
    attr.path().get_ident().map_or_else(Span::call_site, syn::Ident::span)
}
