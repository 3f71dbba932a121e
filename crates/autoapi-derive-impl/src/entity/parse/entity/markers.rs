// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-level marker attributes.
//!
//! | Attribute | Options |
//! |-----------|---------|
//! | `#[auto_api]` | `path`, `expose`, `pagination`, `sorting`, `description`, `tags(...)` |
//! | `#[soft_delete]` | `deleted_field`, `deleted_at_field` |
//! | `#[auditable]` | `versioned`, `created_at_field`, `updated_at_field`, `created_by_field`, `updated_by_field` |
//!
//! Every marker may appear bare. A repeated marker is an error.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, LitBool, LitStr, Meta, Token, parse::Parse};

/// Operations exposed for the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExposeDef {
    /// `"all"`.
    #[default]
    All,
    /// `"read_only"`.
    ReadOnly,
    /// `"create_update"`.
    CreateUpdate,
    /// `"custom"`.
    Custom
}

impl ExposeDef {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "all" => Ok(Self::All),
            "read_only" => Ok(Self::ReadOnly),
            "create_update" => Ok(Self::CreateUpdate),
            "custom" => Ok(Self::Custom),
            _ => Err(syn::Error::new_spanned(
                value,
                "expected one of: \"all\", \"read_only\", \"create_update\", \"custom\""
            ))
        }
    }

    fn tokens(self) -> TokenStream {
        let variant = match self {
            Self::All => quote! { All },
            Self::ReadOnly => quote! { ReadOnly },
            Self::CreateUpdate => quote! { CreateUpdate },
            Self::Custom => quote! { Custom }
        };
        quote! { ::autoapi_core::descriptor::Expose::#variant }
    }
}

/// Parsed `#[auto_api(...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDef {
    /// Base path.
    pub path:        Option<String>,
    /// Exposed operations.
    pub expose:      ExposeDef,
    /// Pagination switch.
    pub pagination:  bool,
    /// Sorting switch.
    pub sorting:     bool,
    /// Description; the doc summary when not given.
    pub description: Option<String>,
    /// Tags.
    pub tags:        Vec<String>
}

impl ApiDef {
    /// `ApiConfig` expression.
    pub fn tokens(&self) -> TokenStream {
        let mut expr = quote! { ::autoapi_core::descriptor::ApiConfig::new() };
        if let Some(path) = &self.path {
            expr = quote! { #expr.path(#path) };
        }
        if self.expose != ExposeDef::All {
            let expose = self.expose.tokens();
            expr = quote! { #expr.expose(#expose) };
        }
        if !self.pagination {
            expr = quote! { #expr.pagination(false) };
        }
        if !self.sorting {
            expr = quote! { #expr.sorting(false) };
        }
        if let Some(description) = &self.description {
            expr = quote! { #expr.description(#description) };
        }
        for tag in &self.tags {
            expr = quote! { #expr.tag(#tag) };
        }
        expr
    }
}

/// Parsed `#[soft_delete(...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftDeleteDef {
    /// Flag field.
    pub deleted_field:    String,
    /// Timestamp field.
    pub deleted_at_field: String
}

impl Default for SoftDeleteDef {
    fn default() -> Self {
        Self {
            deleted_field:    "deleted".to_owned(),
            deleted_at_field: "deleted_at".to_owned()
        }
    }
}

impl SoftDeleteDef {
    /// `SoftDeleteConfig` expression.
    pub fn tokens(&self) -> TokenStream {
        let Self {
            deleted_field,
            deleted_at_field
        } = self;
        quote! {
            ::autoapi_core::descriptor::SoftDeleteConfig {
                deleted_field: ::std::string::String::from(#deleted_field),
                deleted_at_field: ::std::string::String::from(#deleted_at_field)
            }
        }
    }
}

/// Parsed `#[auditable(...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditDef {
    /// Versioned history.
    pub versioned:        bool,
    /// Creation timestamp field.
    pub created_at_field: String,
    /// Update timestamp field.
    pub updated_at_field: String,
    /// Creator field.
    pub created_by_field: String,
    /// Last updater field.
    pub updated_by_field: String
}

impl Default for AuditDef {
    fn default() -> Self {
        Self {
            versioned:        false,
            created_at_field: "created_at".to_owned(),
            updated_at_field: "updated_at".to_owned(),
            created_by_field: "created_by".to_owned(),
            updated_by_field: "updated_by".to_owned()
        }
    }
}

impl AuditDef {
    /// `AuditConfig` expression.
    pub fn tokens(&self) -> TokenStream {
        let Self {
            versioned,
            created_at_field,
            updated_at_field,
            created_by_field,
            updated_by_field
        } = self;
        quote! {
            ::autoapi_core::descriptor::AuditConfig {
                versioned: #versioned,
                created_at_field: ::std::string::String::from(#created_at_field),
                updated_at_field: ::std::string::String::from(#updated_at_field),
                created_by_field: ::std::string::String::from(#created_by_field),
                updated_by_field: ::std::string::String::from(#updated_by_field)
            }
        }
    }
}

/// The single attribute named `name`, or an error at the repeat.
fn single<'a>(attrs: &'a [Attribute], name: &str) -> syn::Result<Option<&'a Attribute>> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident(name));
    let first = found.next();
    if let Some(repeat) = found.next() {
        return Err(syn::Error::new_spanned(
            repeat,
            format!("duplicate #[{name}] attribute")
        ));
    }
    Ok(first)
}

/// `true` for a bare flag, otherwise the `= bool` value.
fn flag(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<LitBool>()?.value)
    } else {
        Ok(true)
    }
}

/// Parse `#[auto_api(...)]`; `doc` is the fallback description.
///
/// # Errors
///
/// Returns an error for unknown options, a bad `expose` value or a repeated
/// attribute.
pub fn parse_auto_api(attrs: &[Attribute], doc: Option<&str>) -> syn::Result<Option<ApiDef>> {
    let Some(attr) = single(attrs, "auto_api")? else {
        return Ok(None);
    };
    let mut api = ApiDef {
        path:        None,
        expose:      ExposeDef::All,
        pagination:  true,
        sorting:     true,
        description: None,
        tags:        Vec::new()
    };

    if !matches!(attr.meta, Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("path") {
                api.path = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("expose") {
                api.expose = ExposeDef::parse(&meta.value()?.parse()?)?;
            } else if meta.path.is_ident("pagination") {
                api.pagination = flag(&meta)?;
            } else if meta.path.is_ident("sorting") {
                api.sorting = flag(&meta)?;
            } else if meta.path.is_ident("description") {
                api.description = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("tags") {
                let content;
                syn::parenthesized!(content in meta.input);
                let tags = content.parse_terminated(<LitStr as Parse>::parse, Token![,])?;
                api.tags.extend(tags.iter().map(LitStr::value));
            } else {
                return Err(meta.error("unknown auto_api option"));
            }
            Ok(())
        })?;
    }

    if api.description.is_none() {
        api.description = doc.map(str::to_owned);
    }
    Ok(Some(api))
}

/// Parse `#[soft_delete(...)]`.
///
/// # Errors
///
/// Returns an error for unknown options or a repeated attribute.
pub fn parse_soft_delete(attrs: &[Attribute]) -> syn::Result<Option<SoftDeleteDef>> {
    let Some(attr) = single(attrs, "soft_delete")? else {
        return Ok(None);
    };
    let mut config = SoftDeleteDef::default();
    if !matches!(attr.meta, Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            let target = if meta.path.is_ident("deleted_field") {
                &mut config.deleted_field
            } else if meta.path.is_ident("deleted_at_field") {
                &mut config.deleted_at_field
            } else {
                return Err(meta.error("unknown soft_delete option"));
            };
            *target = meta.value()?.parse::<LitStr>()?.value();
            Ok(())
        })?;
    }
    Ok(Some(config))
}

/// Parse `#[auditable(...)]`.
///
/// # Errors
///
/// Returns an error for unknown options or a repeated attribute.
pub fn parse_auditable(attrs: &[Attribute]) -> syn::Result<Option<AuditDef>> {
    let Some(attr) = single(attrs, "auditable")? else {
        return Ok(None);
    };
    let mut config = AuditDef::default();
    if !matches!(attr.meta, Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("versioned") {
                config.versioned = flag(&meta)?;
                return Ok(());
            }
            let target = if meta.path.is_ident("created_at_field") {
                &mut config.created_at_field
            } else if meta.path.is_ident("updated_at_field") {
                &mut config.updated_at_field
            } else if meta.path.is_ident("created_by_field") {
                &mut config.created_by_field
            } else if meta.path.is_ident("updated_by_field") {
                &mut config.updated_by_field
            } else {
                return Err(meta.error("unknown auditable option"));
            };
            *target = meta.value()?.parse::<LitStr>()?.value();
            Ok(())
        })?;
    }
    Ok(Some(config))
}
