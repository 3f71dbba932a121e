// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! # Architecture
//!
//! ```text
//! field.rs (coordinator)
//! ├── shape.rs       - Ref<T> / Vec<Ref<T>> / scalar detection
//! ├── storage.rs     - #[id] #[hidden] #[generated] #[column] #[base] ...
//! ├── relation.rs    - #[one_to_one] #[many_to_one] #[one_to_many] #[many_to_many]
//! ├── filter.rs      - #[filter(...)]
//! └── validation.rs  - #[validate(...)]
//! ```
//!
//! Every field is checked on its own here: relation markers must fit the
//! shape and `#[base]` must sit on a plain struct value. Checks that span
//! fields live on [`EntityDef`](super::EntityDef).

mod filter;
mod relation;
mod shape;
mod storage;
mod validation;

pub use filter::FilterConfig;
pub use relation::RelationConfig;
pub use shape::FieldShape;
pub use storage::StorageConfig;
use syn::{Field, Ident, Type, ext::IdentExt};
pub use validation::{Constraint, parse_validation_attrs};

use crate::utils::docs::extract_doc_summary;

/// Field definition with all parsed attributes.
///
/// # Example
///
/// ```rust,ignore
/// #[id]                          // StorageConfig::is_id
/// #[generated(identity)]         // StorageConfig::generated
/// pub id: i64,
///
/// #[many_to_one]                 // RelationConfig
/// #[filter]                      // FilterConfig
/// pub team: Ref<Team>,
/// ```
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident:       Ident,
    /// Declared type.
    pub ty:          Type,
    /// Shape derived from the type.
    pub shape:       FieldShape,
    /// Doc comment summary.
    pub doc:         Option<String>,
    /// Storage and exposure markers.
    pub storage:     StorageConfig,
    /// Relation marker.
    pub relation:    Option<RelationConfig>,
    /// Filter configuration.
    pub filter:      Option<FilterConfig>,
    /// Validation constraints.
    pub constraints: Vec<Constraint>
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// - Unnamed field
    /// - Unknown options in any marker
    /// - More than one relation marker or `#[filter]`
    /// - Relation marker not matching the field type
    /// - `#[base]` on a relation, or combined with `#[transient]`
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Entity fields must be named").with_span(field)
        })?;
        let ty = field.ty.clone();
        let shape = FieldShape::of(&ty);
        let doc = extract_doc_summary(&field.attrs);
        let constraints = parse_validation_attrs(&field.attrs)?;

        let mut storage = StorageConfig::default();
        let mut relation: Option<RelationConfig> = None;
        let mut filter = None;

        for attr in &field.attrs {
            if storage.apply(attr)? {
                continue;
            }
            if let Some(parsed) = RelationConfig::from_attr(attr)? {
                if relation.is_some() {
                    return Err(darling::Error::custom("only one relation marker is allowed")
                        .with_span(attr));
                }
                relation = Some(parsed);
            } else if attr.path().is_ident("filter") {
                if filter.is_some() {
                    return Err(
                        darling::Error::custom("duplicate #[filter] attribute").with_span(attr)
                    );
                }
                filter = Some(FilterConfig::from_attr(attr)?);
            }
        }

        if let Some(relation) = &relation {
            relation.check_shape(&shape)?;
        }
        if storage.is_base && shape.is_relation() {
            return Err(darling::Error::custom(
                "#[base] requires an embedded struct, not a relation"
            )
            .with_span(&field.ty));
        }
        if storage.is_base && storage.transient {
            return Err(darling::Error::custom("#[base] and #[transient] are exclusive")
                .with_span(&ident));
        }

        Ok(Self {
            ident,
            ty,
            shape,
            doc,
            storage,
            relation,
            filter,
            constraints
        })
    }

    /// Field name as seen on the wire; raw identifiers lose their `r#`.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Check if the field is an identifier.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.storage.is_identity()
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{filter::FilterOp, relation::RelationKind, storage::Generation, *};

    fn first_field(item: syn::ItemStruct) -> Field {
        item.fields.into_iter().next().unwrap()
    }

    #[test]
    fn plain_scalar() {
        let field = first_field(parse_quote! {
            struct Person {
                /// Display name.
                pub name: String
            }
        });
        let def = FieldDef::from_field(&field).unwrap();
        assert_eq!(def.name_str(), "name");
        assert!(matches!(def.shape, FieldShape::Scalar));
        assert_eq!(def.doc.as_deref(), Some("Display name."));
        assert!(def.relation.is_none());
        assert!(def.filter.is_none());
        assert!(!def.is_identity());
    }

    #[test]
    fn raw_identifier_is_unraw() {
        let field = first_field(parse_quote! {
            struct Person {
                pub r#type: String
            }
        });
        assert_eq!(FieldDef::from_field(&field).unwrap().name_str(), "type");
    }

    #[test]
    fn all_markers() {
        let field = first_field(parse_quote! {
            struct Person {
                #[id]
                #[generated(identity)]
                #[filter(eq, in_list)]
                #[validate(not_null)]
                #[serde(rename = "ident")]
                pub id: i64
            }
        });
        let def = FieldDef::from_field(&field).unwrap();
        assert!(def.is_identity());
        assert_eq!(def.storage.generated, Some(Generation::Identity));
        assert_eq!(
            def.filter.as_ref().map(|f| f.operators.clone()),
            Some(vec![FilterOp::Equals, FilterOp::In])
        );
        assert_eq!(def.constraints, vec![Constraint::NotNull]);
    }

    #[test]
    fn relation_field() {
        let field = first_field(parse_quote! {
            struct Team {
                #[one_to_many(mapped_by = "team")]
                pub members: Vec<Ref<Person>>
            }
        });
        let def = FieldDef::from_field(&field).unwrap();
        assert!(matches!(def.shape, FieldShape::ToMany(_)));
        assert_eq!(def.relation.map(|r| r.kind), Some(RelationKind::OneToMany));
    }

    #[test]
    fn relation_on_wrong_shape_fails() {
        let field = first_field(parse_quote! {
            struct Person {
                #[many_to_one]
                pub team_id: i64
            }
        });
        assert!(FieldDef::from_field(&field).is_err());
    }

    #[test]
    fn two_relation_markers_fail() {
        let field = first_field(parse_quote! {
            struct Person {
                #[many_to_one]
                #[one_to_one]
                pub team: Ref<Team>
            }
        });
        assert!(FieldDef::from_field(&field).is_err());
    }

    #[test]
    fn duplicate_filter_fails() {
        let field = first_field(parse_quote! {
            struct Person {
                #[filter]
                #[filter(like)]
                pub name: String
            }
        });
        assert!(FieldDef::from_field(&field).is_err());
    }

    #[test]
    fn base_must_be_a_struct_value() {
        let field = first_field(parse_quote! {
            struct Invoice {
                #[base]
                pub stamp: Ref<Stamp>
            }
        });
        assert!(FieldDef::from_field(&field).is_err());

        let field = first_field(parse_quote! {
            struct Invoice {
                #[base]
                pub stamp: Stamp
            }
        });
        assert!(FieldDef::from_field(&field).unwrap().storage.is_base);
    }
}
