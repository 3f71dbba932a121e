// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage and exposure markers on entity fields.
//!
//! # Attributes
//!
//! | Attribute | Annotation |
//! |-----------|------------|
//! | `#[id]` | `Id` |
//! | `#[embedded_id]` | `EmbeddedId` |
//! | `#[version]` | `Version` |
//! | `#[hidden]` | `Hidden` |
//! | `#[read_only]` | `ReadOnly` |
//! | `#[transient]` | `Transient` (field builder) |
//! | `#[json_ignore]` | `JsonIgnore` |
//! | `#[generated]`, `#[generated(identity)]` | `Generated(..)` |
//! | `#[column(nullable = false)]` | `Column { nullable }` |
//! | `#[base]` | embedded field builder |

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, LitBool, Meta, Token};

/// Storage-generated value strategy from `#[generated(...)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Generation {
    /// `#[generated]` or `#[generated(auto)]`.
    #[default]
    Auto,
    /// `#[generated(identity)]`.
    Identity,
    /// `#[generated(sequence)]`.
    Sequence,
    /// `#[generated(uuid)]`.
    Uuid
}

impl Generation {
    fn tokens(self) -> TokenStream {
        match self {
            Self::Auto => quote! { ::autoapi_core::descriptor::GenerationType::Auto },
            Self::Identity => quote! { ::autoapi_core::descriptor::GenerationType::Identity },
            Self::Sequence => quote! { ::autoapi_core::descriptor::GenerationType::Sequence },
            Self::Uuid => quote! { ::autoapi_core::descriptor::GenerationType::Uuid }
        }
    }
}

/// Storage and exposure markers of one field.
#[derive(Debug, Default, Clone)]
pub struct StorageConfig {
    /// `#[id]`.
    pub is_id:          bool,
    /// `#[embedded_id]`.
    pub is_embedded_id: bool,
    /// `#[version]`.
    pub is_version:     bool,
    /// `#[hidden]`.
    pub hidden:         bool,
    /// `#[read_only]`.
    pub read_only:      bool,
    /// `#[transient]`.
    pub transient:      bool,
    /// `#[json_ignore]`.
    pub json_ignore:    bool,
    /// `#[base]`.
    pub is_base:        bool,
    /// `#[generated(...)]`.
    pub generated:      Option<Generation>,
    /// `#[column(nullable = ...)]`.
    pub nullable:       Option<bool>
}

impl StorageConfig {
    /// Apply `attr` if it is a storage marker.
    ///
    /// Returns `Ok(false)` for attributes this config does not own.
    ///
    /// # Errors
    ///
    /// Returns an error for markers carrying arguments they do not accept
    /// and for unknown `generated` or `column` options.
    pub fn apply(&mut self, attr: &Attribute) -> syn::Result<bool> {
        let Some(name) = attr.path().get_ident().map(ToString::to_string) else {
            return Ok(false);
        };
        let flag = match name.as_str() {
            "id" => &mut self.is_id,
            "embedded_id" => &mut self.is_embedded_id,
            "version" => &mut self.is_version,
            "hidden" => &mut self.hidden,
            "read_only" => &mut self.read_only,
            "transient" => &mut self.transient,
            "json_ignore" => &mut self.json_ignore,
            "base" => &mut self.is_base,
            "generated" => {
                self.generated = Some(parse_generation(attr)?);
                return Ok(true);
            }
            "column" => {
                self.nullable = parse_column(attr)?;
                return Ok(true);
            }
            _ => return Ok(false)
        };
        attr.meta.require_path_only()?;
        *flag = true;
        Ok(true)
    }

    /// Check if the field is an identifier of either kind.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.is_id || self.is_embedded_id
    }

    /// Field annotations for these markers, in a stable order.
    ///
    /// `#[transient]` and `#[base]` select the field builder instead and
    /// produce no annotation here.
    pub fn annotations(&self) -> Vec<TokenStream> {
        let annotation = quote! { ::autoapi_core::descriptor::FieldAnnotation };
        let mut out = Vec::new();
        if self.is_id {
            out.push(quote! { #annotation::Id });
        }
        if self.is_embedded_id {
            out.push(quote! { #annotation::EmbeddedId });
        }
        if self.is_version {
            out.push(quote! { #annotation::Version });
        }
        if self.hidden {
            out.push(quote! { #annotation::Hidden });
        }
        if self.read_only {
            out.push(quote! { #annotation::ReadOnly });
        }
        if self.json_ignore {
            out.push(quote! { #annotation::JsonIgnore });
        }
        if let Some(generation) = self.generated {
            let strategy = generation.tokens();
            out.push(quote! { #annotation::Generated(#strategy) });
        }
        if let Some(nullable) = self.nullable {
            out.push(quote! { #annotation::Column { nullable: #nullable } });
        }
        out
    }
}

fn parse_generation(attr: &Attribute) -> syn::Result<Generation> {
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(Generation::Auto);
    }
    let mut generation = None;
    attr.parse_nested_meta(|meta| {
        let strategy = if meta.path.is_ident("auto") {
            Generation::Auto
        } else if meta.path.is_ident("identity") {
            Generation::Identity
        } else if meta.path.is_ident("sequence") {
            Generation::Sequence
        } else if meta.path.is_ident("uuid") {
            Generation::Uuid
        } else {
            return Err(meta.error("expected one of: auto, identity, sequence, uuid"));
        };
        if generation.replace(strategy).is_some() {
            return Err(meta.error("only one generation strategy is allowed"));
        }
        Ok(())
    })?;
    Ok(generation.unwrap_or_default())
}

fn parse_column(attr: &Attribute) -> syn::Result<Option<bool>> {
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(None);
    }
    let mut nullable = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("nullable") {
            let value = if meta.input.peek(Token![=]) {
                meta.value()?.parse::<LitBool>()?.value
            } else {
                true
            };
            nullable = Some(value);
            Ok(())
        } else {
            Err(meta.error("unknown column option, expected `nullable`"))
        }
    })?;
    Ok(nullable)
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn parse(attrs: &[Attribute]) -> syn::Result<StorageConfig> {
        let mut config = StorageConfig::default();
        for attr in attrs {
            config.apply(attr)?;
        }
        Ok(config)
    }

    #[test]
    fn default_has_no_markers() {
        let config = StorageConfig::default();
        assert!(!config.is_identity());
        assert!(config.annotations().is_empty());
    }

    #[test]
    fn marker_flags() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[id]),
            parse_quote!(#[version]),
            parse_quote!(#[hidden]),
            parse_quote!(#[read_only]),
            parse_quote!(#[json_ignore])
        ];
        let config = parse(&attrs).unwrap();
        assert!(config.is_id);
        assert!(config.is_identity());
        assert!(config.is_version);
        assert!(config.hidden);
        assert!(config.read_only);
        assert!(config.json_ignore);
        assert_eq!(config.annotations().len(), 5);
    }

    #[test]
    fn foreign_attributes_are_not_owned() {
        let mut config = StorageConfig::default();
        assert!(!config.apply(&parse_quote!(#[serde(rename = "x")])).unwrap());
        assert!(!config.apply(&parse_quote!(#[filter])).unwrap());
    }

    #[test]
    fn markers_reject_arguments() {
        let mut config = StorageConfig::default();
        assert!(config.apply(&parse_quote!(#[hidden(always)])).is_err());
    }

    #[test]
    fn generation_strategies() {
        let bare = parse(&[parse_quote!(#[generated])]).unwrap();
        assert_eq!(bare.generated, Some(Generation::Auto));
        let identity = parse(&[parse_quote!(#[generated(identity)])]).unwrap();
        assert_eq!(identity.generated, Some(Generation::Identity));
        let uuid = parse(&[parse_quote!(#[generated(uuid)])]).unwrap();
        assert_eq!(uuid.generated, Some(Generation::Uuid));
        assert!(parse(&[parse_quote!(#[generated(random)])]).is_err());
        assert!(parse(&[parse_quote!(#[generated(identity, uuid)])]).is_err());
    }

    #[test]
    fn column_nullability() {
        let strict = parse(&[parse_quote!(#[column(nullable = false)])]).unwrap();
        assert_eq!(strict.nullable, Some(false));
        let loose = parse(&[parse_quote!(#[column(nullable)])]).unwrap();
        assert_eq!(loose.nullable, Some(true));
        let plain = parse(&[parse_quote!(#[column])]).unwrap();
        assert_eq!(plain.nullable, None);
        assert!(parse(&[parse_quote!(#[column(length = 10)])]).is_err());
    }
}
