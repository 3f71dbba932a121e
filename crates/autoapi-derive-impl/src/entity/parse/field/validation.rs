// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[validate(...)]` parsing.
//!
//! Constraints are recorded in the descriptor for validators and schema
//! generators. `not_null` and `not_blank` also make the field non-nullable
//! in resolved metadata.
//!
//! # Supported Constraints
//!
//! | Constraint | Descriptor |
//! |------------|------------|
//! | `not_null` | `NotNull` |
//! | `not_blank` | `NotBlank` |
//! | `not_empty` | `NotEmpty` |
//! | `length(min = N, max = N)` | `Length` |
//! | `range(min = N, max = N)` | `Range` |
//! | `email` | `Email` |
//! | `url` | `Url` |
//! | `pattern = "..."` | `Pattern` |
//! | `past`, `past_or_present` | `Past`, `PastOrPresent` |
//! | `future`, `future_or_present` | `Future`, `FutureOrPresent` |
//! | `assert_true`, `assert_false` | `AssertTrue`, `AssertFalse` |
//!
//! ```rust,ignore
//! #[validate(not_blank, length(max = 80))]
//! pub name: String,
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Lit, LitInt, LitStr, Token, meta::ParseNestedMeta};

/// One parsed constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `not_null`.
    NotNull,
    /// `not_blank`.
    NotBlank,
    /// `not_empty`.
    NotEmpty,
    /// `length(min, max)`.
    Length(Option<usize>, Option<usize>),
    /// `range(min, max)`.
    Range(Option<f64>, Option<f64>),
    /// `email`.
    Email,
    /// `url`.
    Url,
    /// `pattern = "..."`.
    Pattern(String),
    /// `past`.
    Past,
    /// `past_or_present`.
    PastOrPresent,
    /// `future`.
    Future,
    /// `future_or_present`.
    FutureOrPresent,
    /// `assert_true`.
    AssertTrue,
    /// `assert_false`.
    AssertFalse
}

impl Constraint {
    /// Descriptor expression for this constraint.
    pub fn tokens(&self) -> TokenStream {
        let path = quote! { ::autoapi_core::descriptor::Constraint };
        match self {
            Self::NotNull => quote! { #path::NotNull },
            Self::NotBlank => quote! { #path::NotBlank },
            Self::NotEmpty => quote! { #path::NotEmpty },
            Self::Length(min, max) => {
                let min = optional(min.map(|v| quote! { #v }));
                let max = optional(max.map(|v| quote! { #v }));
                quote! { #path::Length { min: #min, max: #max } }
            }
            Self::Range(min, max) => {
                let min = optional(min.map(float));
                let max = optional(max.map(float));
                quote! { #path::Range { min: #min, max: #max } }
            }
            Self::Email => quote! { #path::Email },
            Self::Url => quote! { #path::Url },
            Self::Pattern(regex) => {
                quote! { #path::Pattern(::std::string::String::from(#regex)) }
            }
            Self::Past => quote! { #path::Past },
            Self::PastOrPresent => quote! { #path::PastOrPresent },
            Self::Future => quote! { #path::Future },
            Self::FutureOrPresent => quote! { #path::FutureOrPresent },
            Self::AssertTrue => quote! { #path::AssertTrue },
            Self::AssertFalse => quote! { #path::AssertFalse }
        }
    }
}

fn float(value: f64) -> TokenStream {
    let magnitude = value.abs();
    if value.is_sign_negative() {
        quote! { -#magnitude }
    } else {
        quote! { #magnitude }
    }
}

fn optional(value: Option<TokenStream>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None }
    }
}

/// Parse every `#[validate(...)]` attribute of a field, in order.
///
/// # Errors
///
/// Returns an error for unknown constraints and malformed bounds.
pub fn parse_validation_attrs(attrs: &[Attribute]) -> syn::Result<Vec<Constraint>> {
    let mut constraints = Vec::new();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            let name = meta.path.get_ident().map(ToString::to_string);
            let constraint = match name.as_deref() {
                Some("not_null") => Constraint::NotNull,
                Some("not_blank") => Constraint::NotBlank,
                Some("not_empty") => Constraint::NotEmpty,
                Some("email") => Constraint::Email,
                Some("url") => Constraint::Url,
                Some("past") => Constraint::Past,
                Some("past_or_present") => Constraint::PastOrPresent,
                Some("future") => Constraint::Future,
                Some("future_or_present") => Constraint::FutureOrPresent,
                Some("assert_true") => Constraint::AssertTrue,
                Some("assert_false") => Constraint::AssertFalse,
                Some("pattern") => Constraint::Pattern(meta.value()?.parse::<LitStr>()?.value()),
                Some("length") => {
                    let (mut min, mut max) = (None, None);
                    meta.parse_nested_meta(|bound| {
                        let value: usize = bound.value()?.parse::<LitInt>()?.base10_parse()?;
                        if bound.path.is_ident("min") {
                            min = Some(value);
                        } else if bound.path.is_ident("max") {
                            max = Some(value);
                        } else {
                            return Err(bound.error("expected `min` or `max`"));
                        }
                        Ok(())
                    })?;
                    Constraint::Length(min, max)
                }
                Some("range") => {
                    let (mut min, mut max) = (None, None);
                    meta.parse_nested_meta(|bound| {
                        let value = parse_number(&bound)?;
                        if bound.path.is_ident("min") {
                            min = Some(value);
                        } else if bound.path.is_ident("max") {
                            max = Some(value);
                        } else {
                            return Err(bound.error("expected `min` or `max`"));
                        }
                        Ok(())
                    })?;
                    Constraint::Range(min, max)
                }
                _ => return Err(meta.error("unknown validation constraint"))
            };
            constraints.push(constraint);
            Ok(())
        })?;
    }

    Ok(constraints)
}

/// Signed integer or float literal.
fn parse_number(meta: &ParseNestedMeta<'_>) -> syn::Result<f64> {
    let input = meta.value()?;
    let negative = input.parse::<Option<Token![-]>>()?.is_some();
    let value: f64 = match input.parse::<Lit>()? {
        Lit::Int(int) => int.base10_parse()?,
        Lit::Float(float) => float.base10_parse()?,
        other => return Err(syn::Error::new_spanned(other, "expected a number"))
    };
    Ok(if negative { -value } else { value })
}
