// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field shape detection from the declared type.
//!
//! | Declared type | Shape |
//! |---------------|-------|
//! | `Ref<T>` | [`FieldShape::ToOne`] |
//! | `Vec<Ref<T>>` | [`FieldShape::ToMany`] |
//! | anything else | [`FieldShape::Scalar`] |
//!
//! Detection is syntactic on the last path segment, so `autoapi::Ref<T>`
//! and a plain imported `Ref<T>` are treated alike.

use syn::{GenericArgument, PathArguments, Type};

/// Structural shape of a field.
#[derive(Debug, Clone)]
pub enum FieldShape {
    /// Plain value implementing `Scalar`.
    Scalar,
    /// Single relation slot; holds the target type.
    ToOne(Type),
    /// Relation collection; holds the target type.
    ToMany(Type)
}

impl FieldShape {
    /// Detect the shape of `ty`.
    pub fn of(ty: &Type) -> Self {
        if let Some(target) = single_argument(ty, "Ref") {
            return Self::ToOne(target.clone());
        }
        if let Some(item) = single_argument(ty, "Vec")
            && let Some(target) = single_argument(item, "Ref")
        {
            return Self::ToMany(target.clone());
        }
        Self::Scalar
    }

    /// Check if the field holds a relation.
    #[must_use]
    pub const fn is_relation(&self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

/// The only type argument of `ty` when its last segment is `wrapper`.
fn single_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None
    });
    match (types.next(), types.next()) {
        (Some(ty), None) => Some(ty),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use syn::parse_quote;

    use super::*;

    fn target(shape: &FieldShape) -> String {
        match shape {
            FieldShape::ToOne(ty) | FieldShape::ToMany(ty) => ty.to_token_stream().to_string(),
            FieldShape::Scalar => String::new()
        }
    }

    #[test]
    fn ref_is_to_one() {
        let shape = FieldShape::of(&parse_quote!(Ref<Team>));
        assert!(matches!(shape, FieldShape::ToOne(_)));
        assert_eq!(target(&shape), "Team");
    }

    #[test]
    fn qualified_ref_is_to_one() {
        let shape = FieldShape::of(&parse_quote!(::autoapi::Ref<crate::model::Team>));
        assert!(matches!(shape, FieldShape::ToOne(_)));
        assert_eq!(target(&shape), "crate :: model :: Team");
    }

    #[test]
    fn vec_of_ref_is_to_many() {
        let shape = FieldShape::of(&parse_quote!(Vec<Ref<Person>>));
        assert!(matches!(shape, FieldShape::ToMany(_)));
        assert_eq!(target(&shape), "Person");
    }

    #[test]
    fn everything_else_is_scalar() {
        let types: [Type; 6] = [
            parse_quote!(i64),
            parse_quote!(Option<String>),
            parse_quote!(Vec<String>),
            parse_quote!(Option<Ref<Team>>),
            parse_quote!(Ref),
            parse_quote!(&'static str)
        ];
        for ty in types {
            let shape = FieldShape::of(&ty);
            assert!(!shape.is_relation(), "{}", ty.to_token_stream());
        }
    }
}
