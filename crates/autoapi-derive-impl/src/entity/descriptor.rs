// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Entity` implementation generation.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! #[automatically_derived]
//! impl ::autoapi_core::Entity for Person {
//!     fn descriptor() -> ::autoapi_core::EntityDescriptor {
//!         ::autoapi_core::EntityDescriptor::of::<Self>()
//!             .annotate(TypeAnnotation::AutoApi(ApiConfig::new().path("/people")))
//!             .field(
//!                 FieldDescriptor::scalar::<Self, i64>("id", |e| &e.id, |e| &mut e.id)
//!                     .annotate(FieldAnnotation::Id)
//!             )
//!             .field(FieldDescriptor::to_one::<Self, Team>("team", |e| &e.team, |e| &mut e.team)
//!                     .annotate(FieldAnnotation::ManyToOne))
//!     }
//! }
//! ```
//!
//! Accessors are non-capturing closures coerced to `fn` pointers, so the
//! descriptor costs no allocation per field beyond its annotations.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, FieldDef, FieldShape};

/// Generate the `Entity` implementation for `entity`.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();

    let named = entity.name.as_ref().map(|name| quote! { .named(#name) });
    let annotations = type_annotations(entity);
    let fields = entity.fields.iter().map(field_descriptor);

    quote! {
        #[automatically_derived]
        impl #impl_generics ::autoapi_core::Entity for #ident #ty_generics #where_clause {
            fn descriptor() -> ::autoapi_core::EntityDescriptor {
                ::autoapi_core::EntityDescriptor::of::<Self>()
                    #named
                    #(.annotate(#annotations))*
                    #(.field(#fields))*
            }
        }
    }
}

fn type_annotations(entity: &EntityDef) -> Vec<TokenStream> {
    let annotation = quote! { ::autoapi_core::descriptor::TypeAnnotation };
    let mut out = Vec::new();
    if let Some(api) = &entity.api {
        let config = api.tokens();
        out.push(quote! { #annotation::AutoApi(#config) });
    }
    if let Some(table) = &entity.table {
        out.push(quote! { #annotation::Table(::std::string::String::from(#table)) });
    }
    if entity.shared_base {
        out.push(quote! { #annotation::SharedBase });
    }
    if let Some(soft_delete) = &entity.soft_delete {
        let config = soft_delete.tokens();
        out.push(quote! { #annotation::SoftDelete(#config) });
    }
    if let Some(auditable) = &entity.auditable {
        let config = auditable.tokens();
        out.push(quote! { #annotation::Auditable(#config) });
    }
    out
}

fn field_descriptor(field: &FieldDef) -> TokenStream {
    let name = field.name_str();
    let ident = &field.ident;
    let builder = quote! { ::autoapi_core::FieldDescriptor };

    if field.storage.transient {
        return quote! { #builder::transient(#name) };
    }

    let accessors = quote! { #name, |e| &e.#ident, |e| &mut e.#ident };
    let base = if field.storage.is_base {
        let ty = &field.ty;
        quote! { #builder::embedded::<Self, #ty>(#accessors) }
    } else {
        match &field.shape {
            FieldShape::Scalar => {
                let ty = &field.ty;
                quote! { #builder::scalar::<Self, #ty>(#accessors) }
            }
            FieldShape::ToOne(target) => quote! { #builder::to_one::<Self, #target>(#accessors) },
            FieldShape::ToMany(target) => quote! { #builder::to_many::<Self, #target>(#accessors) }
        }
    };

    let annotations = field_annotations(field);
    quote! { #base #(.annotate(#annotations))* }
}

fn field_annotations(field: &FieldDef) -> Vec<TokenStream> {
    let annotation = quote! { ::autoapi_core::descriptor::FieldAnnotation };
    let mut out = field.storage.annotations();
    if let Some(relation) = &field.relation {
        out.push(relation.annotation());
    }
    out.extend(field.constraints.iter().map(|constraint| {
        let constraint = constraint.tokens();
        quote! { #annotation::Constraint(#constraint) }
    }));
    if let Some(filter) = &field.filter {
        let config = filter.tokens(field.doc.as_deref());
        out.push(quote! { #annotation::Filterable(#config) });
    }
    out
}
