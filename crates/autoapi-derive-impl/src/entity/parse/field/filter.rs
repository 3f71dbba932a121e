// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[filter(...)]` parsing.
//!
//! # Syntax
//!
//! - `#[filter]`: equality only
//! - `#[filter(eq, like, range)]`: listed operators
//! - `#[filter(in_list, param = "status", case_sensitive = false)]`: with
//!   options
//!
//! When no operator is listed, equality is enabled. The description
//! defaults to the field's doc comment summary.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, LitBool, LitStr, Meta};

/// Filter operator spelled in `#[filter(...)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `eq`.
    Equals,
    /// `like`.
    Like,
    /// `gt`.
    GreaterThan,
    /// `gte`.
    GreaterThanOrEqual,
    /// `lt`.
    LessThan,
    /// `lte`.
    LessThanOrEqual,
    /// `range`.
    Range,
    /// `in_list`.
    In,
    /// `not_in`.
    NotIn,
    /// `is_null`.
    IsNull,
    /// `between`.
    Between
}

impl FilterOp {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "eq" => Self::Equals,
            "like" => Self::Like,
            "gt" => Self::GreaterThan,
            "gte" => Self::GreaterThanOrEqual,
            "lt" => Self::LessThan,
            "lte" => Self::LessThanOrEqual,
            "range" => Self::Range,
            "in_list" => Self::In,
            "not_in" => Self::NotIn,
            "is_null" => Self::IsNull,
            "between" => Self::Between,
            _ => return None
        })
    }

    fn tokens(self) -> TokenStream {
        let variant = match self {
            Self::Equals => quote! { Equals },
            Self::Like => quote! { Like },
            Self::GreaterThan => quote! { GreaterThan },
            Self::GreaterThanOrEqual => quote! { GreaterThanOrEqual },
            Self::LessThan => quote! { LessThan },
            Self::LessThanOrEqual => quote! { LessThanOrEqual },
            Self::Range => quote! { Range },
            Self::In => quote! { In },
            Self::NotIn => quote! { NotIn },
            Self::IsNull => quote! { IsNull },
            Self::Between => quote! { Between }
        };
        quote! { ::autoapi_core::FilterOp::#variant }
    }
}

/// Parsed `#[filter(...)]`.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Enabled operators in declaration order.
    pub operators:      Vec<FilterOp>,
    /// `param = "..."`.
    pub param_name:     Option<String>,
    /// `case_sensitive = bool`; `true` unless stated.
    pub case_sensitive: bool,
    /// `description = "..."`.
    pub description:    Option<String>
}

impl FilterConfig {
    /// Parse a `#[filter]` attribute.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown operators or options.
    pub fn from_attr(attr: &Attribute) -> syn::Result<Self> {
        let mut config = Self {
            operators:      Vec::new(),
            param_name:     None,
            case_sensitive: true,
            description:    None
        };

        if !matches!(attr.meta, Meta::Path(_)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("param") {
                    config.param_name = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("case_sensitive") {
                    config.case_sensitive = meta.value()?.parse::<LitBool>()?.value;
                } else if meta.path.is_ident("description") {
                    config.description = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if let Some(op) = meta
                    .path
                    .get_ident()
                    .and_then(|ident| FilterOp::parse(&ident.to_string()))
                {
                    if !config.operators.contains(&op) {
                        config.operators.push(op);
                    }
                } else {
                    return Err(meta.error(
                        "unknown filter operator, expected one of: eq, like, gt, gte, lt, lte, \
                         range, in_list, not_in, is_null, between"
                    ));
                }
                Ok(())
            })?;
        }

        if config.operators.is_empty() {
            config.operators.push(FilterOp::Equals);
        }
        Ok(config)
    }

    /// `FilterConfig` expression; `doc` is the fallback description.
    pub fn tokens(&self, doc: Option<&str>) -> TokenStream {
        let operators = self.operators.iter().map(|op| op.tokens());
        let mut expr = quote! {
            ::autoapi_core::FilterConfig::new(::std::vec![#(#operators),*])
        };
        if let Some(param) = &self.param_name {
            expr = quote! { #expr.param_name(#param) };
        }
        if !self.case_sensitive {
            expr = quote! { #expr.case_sensitive(false) };
        }
        if let Some(description) = self.description.as_deref().or(doc) {
            expr = quote! { #expr.description(#description) };
        }
        expr
    }
}
