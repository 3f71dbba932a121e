// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query parameter compilation.
//!
//! # Compilation
//!
//! For each field with a filter configuration, in field order, and for each
//! operator in [`COMPILATION_ORDER`], the compiler looks up the operator's
//! parameter and, if present, adds one condition. All conditions form one
//! conjunction; no conditions yield [`Expr::True`].
//!
//! Soft failures never abort compilation:
//!
//! - values that do not convert to the field type pass through as text
//! - `_between` with anything but two comma-separated parts is ignored
//! - ordering comparisons on unordered types (`bool`) are ignored
//!
//! # Fetch Policy
//!
//! | Hints | Eager relations | Distinct |
//! |-------|-----------------|----------|
//! | non-empty | named to-one relations | yes |
//! | none or empty | every non-hidden to-one relation | yes |
//!
//! To-many relations are never fetched eagerly.

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher
};

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::{COMPILATION_ORDER, Expr, FilterConfig, FilterOp, Predicate};
use crate::{
    convert::Converter,
    error::FilterError,
    metadata::{EntityMetadata, FieldMetadata},
    value::{ScalarType, Value}
};

/// String-keyed query parameters.
pub trait Params {
    /// Raw value of parameter `name`.
    fn param(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> Params for HashMap<String, String, S> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: BuildHasher> Params for IndexMap<String, String, S> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Params for BTreeMap<String, String> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Params for [(&str, &str)] {
    fn param(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// Compiles query parameters into [`Predicate`]s.
///
/// Stateless apart from its [`Converter`]; share it freely.
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    converter: Converter
}

impl FilterCompiler {
    /// Compiler with the built-in conversions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler using `converter`.
    #[must_use]
    pub const fn with_converter(converter: Converter) -> Self {
        Self {
            converter
        }
    }

    /// Value converter.
    #[must_use]
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Compile `params` against `metadata`.
    ///
    /// `fetch_hints` names the to-one relations to load eagerly; `None` or
    /// an empty list selects every non-hidden to-one relation.
    ///
    /// # Errors
    ///
    /// None at present: unknown hints are dropped and malformed values are
    /// absorbed. The `Result` leaves room for metadata consistency checks.
    pub fn compile<P: Params + ?Sized>(
        &self,
        metadata: &EntityMetadata,
        params: &P,
        fetch_hints: Option<&[String]>
    ) -> Result<Predicate, FilterError> {
        let mut conditions = Vec::new();
        for field in metadata.filterable_fields() {
            if let Some(config) = field.filter() {
                self.field_conditions(field, config, params, &mut conditions);
            }
        }
        let filter = Expr::all(conditions);
        let fetch = fetch_plan(metadata, fetch_hints);
        debug!(
            entity = metadata.type_name(),
            filter = %filter,
            fetch = ?fetch,
            "compiled filter"
        );
        Ok(Predicate::new(filter).with_fetch(fetch))
    }

    /// Compile the conditions of the single field `name`.
    ///
    /// # Errors
    ///
    /// - [`FilterError::UnknownField`] if `metadata` has no such field
    /// - [`FilterError::NotFilterable`] if the field has no filter config
    pub fn compile_field<P: Params + ?Sized>(
        &self,
        metadata: &EntityMetadata,
        name: &str,
        params: &P
    ) -> Result<Expr, FilterError> {
        let field = metadata.field(name).ok_or_else(|| FilterError::UnknownField {
            entity: metadata.type_name().to_owned(),
            field:  name.to_owned()
        })?;
        let config = field.filter().ok_or_else(|| FilterError::NotFilterable {
            entity: metadata.type_name().to_owned(),
            field:  name.to_owned()
        })?;
        let mut conditions = Vec::new();
        self.field_conditions(field, config, params, &mut conditions);
        Ok(Expr::all(conditions))
    }

    fn field_conditions<P: Params + ?Sized>(
        &self,
        field: &FieldMetadata,
        config: &FilterConfig,
        params: &P,
        out: &mut Vec<Expr>
    ) {
        let base = config.base_name(field.name());
        let ty = operand_type(field);
        let name = field.name();
        let ignore_case = !config.case_sensitive && ty.is_some_and(|ty| ty.is_textual());

        for op in COMPILATION_ORDER {
            if !config.supports(op) {
                continue;
            }
            let Some(suffix) = op.suffix() else {
                continue;
            };
            let param = format!("{base}{suffix}");
            let Some(raw) = params.param(&param) else {
                continue;
            };

            let condition = match op {
                FilterOp::Equals if ignore_case => Some(Expr::eq_ignore_case(name, raw)),
                FilterOp::Equals => Some(Expr::eq(name, self.convert(raw, ty))),
                FilterOp::Like if ignore_case => {
                    Some(Expr::like_ignore_case(name, &format!("%{raw}%")))
                }
                FilterOp::Like => Some(Expr::like(name, format!("%{raw}%"))),
                FilterOp::GreaterThan
                | FilterOp::GreaterThanOrEqual
                | FilterOp::LessThan
                | FilterOp::LessThanOrEqual
                    if ty.is_some_and(|ty| !comparable(ty)) =>
                {
                    trace!(field = name, %op, "ignoring ordering filter on unordered type");
                    None
                }
                FilterOp::GreaterThan => Some(Expr::gt(name, self.convert(raw, ty))),
                FilterOp::GreaterThanOrEqual => Some(Expr::ge(name, self.convert(raw, ty))),
                FilterOp::LessThan => Some(Expr::lt(name, self.convert(raw, ty))),
                FilterOp::LessThanOrEqual => Some(Expr::le(name, self.convert(raw, ty))),
                FilterOp::In => Some(Expr::in_list(name, self.convert_list(raw, ty))),
                FilterOp::NotIn => Some(!Expr::in_list(name, self.convert_list(raw, ty))),
                FilterOp::IsNull if raw.eq_ignore_ascii_case("true") => Some(Expr::is_null(name)),
                FilterOp::IsNull => Some(Expr::is_not_null(name)),
                FilterOp::Between => match split_list(raw).as_slice() {
                    [low, high] => Some(Expr::between(
                        name,
                        self.convert(low, ty),
                        self.convert(high, ty)
                    )),
                    parts => {
                        trace!(
                            param = %param,
                            parts = parts.len(),
                            "ignoring between filter without exactly two bounds"
                        );
                        None
                    }
                },
                FilterOp::Range => None
            };
            out.extend(condition);
        }
    }

    fn convert(&self, raw: &str, ty: Option<ScalarType>) -> Value {
        match ty {
            Some(ty) => self.converter.convert(raw, ty),
            None => Value::String(raw.to_owned())
        }
    }

    fn convert_list(&self, raw: &str, ty: Option<ScalarType>) -> Vec<Value> {
        split_list(raw)
            .into_iter()
            .map(|part| self.convert(part, ty))
            .collect()
    }
}

/// Type operands are converted to: the scalar type, or the target's
/// identity type for relation fields.
fn operand_type(field: &FieldMetadata) -> Option<ScalarType> {
    field
        .scalar_type()
        .or_else(|| field.relation().and_then(|relation| relation.target_id_type()))
}

/// Custom types may define an order the engine cannot see.
const fn comparable(ty: ScalarType) -> bool {
    ty.is_ordered() || matches!(ty, ScalarType::Custom(_))
}

/// Comma-separated list; trailing empty parts are dropped.
fn split_list(raw: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = raw.split(',').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

fn fetch_plan(metadata: &EntityMetadata, hints: Option<&[String]>) -> Vec<String> {
    match hints {
        Some(hints) if !hints.is_empty() => {
            let mut fetch: Vec<String> = Vec::with_capacity(hints.len());
            for hint in hints {
                match metadata.field(hint) {
                    Some(field) if field.is_to_one() => {
                        if !fetch.contains(hint) {
                            fetch.push(hint.clone());
                        }
                    }
                    _ => debug!(
                        entity = metadata.type_name(),
                        hint = %hint,
                        "ignoring fetch hint that is not a to-one relation"
                    )
                }
            }
            fetch
        }
        _ => metadata
            .relations()
            .filter(|field| field.is_to_one() && !field.is_hidden())
            .map(|field| field.name().to_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        filter::QueryKind,
        fixtures::{Person, Team},
        metadata::MetadataCache,
        relation::Ref,
        value::WireMap
    };

    fn person() -> Arc<EntityMetadata> {
        MetadataCache::new().get_or_resolve::<Person>().unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn compile(pairs: &[(&str, &str)]) -> Predicate {
        FilterCompiler::new()
            .compile(&person(), &params(pairs), None)
            .unwrap()
    }

    #[test]
    fn no_params_is_always_true() {
        let predicate = compile(&[]);
        assert!(predicate.filter().is_true());
    }

    #[test]
    fn person_scenario() {
        let predicate = compile(&[("name_like", "ann"), ("age_gte", "18"), ("age_lte", "65")]);
        assert_eq!(
            predicate.filter(),
            &Expr::all([
                Expr::like_ignore_case("name", "%ann%"),
                Expr::ge("age", 18_i32),
                Expr::le("age", 65_i32),
            ])
        );
    }

    #[test]
    fn range_accepts_single_bound() {
        let predicate = compile(&[("age_lte", "65")]);
        assert_eq!(predicate.filter(), &Expr::le("age", 65_i32));
    }

    #[test]
    fn undeclared_operator_is_ignored() {
        let predicate = compile(&[("age_gt", "18"), ("name_between", "a,b")]);
        assert!(predicate.filter().is_true());
    }

    #[test]
    fn malformed_between_is_ignored() {
        for raw in ["notanumber", "1,2,3", ""] {
            let predicate = compile(&[("age_between", raw)]);
            assert!(predicate.filter().is_true(), "{raw}");
        }
        let predicate = compile(&[("age_between", "18,65,")]);
        assert_eq!(predicate.filter(), &Expr::between("age", 18_i32, 65_i32));
    }

    #[test]
    fn garbage_values_pass_through() {
        let predicate = compile(&[("age_between", "x,y"), ("age_in", "1,abc")]);
        assert_eq!(
            predicate.filter(),
            &Expr::all([
                Expr::in_list("age", vec![Value::I32(1), Value::from("abc")]),
                Expr::between("age", "x", "y"),
            ])
        );
    }

    #[test]
    fn case_insensitive_equality_on_text() {
        let predicate = compile(&[("name", "ANN")]);
        assert_eq!(predicate.filter(), &Expr::eq_ignore_case("name", "ann"));
    }

    #[test]
    fn null_checks() {
        assert_eq!(compile(&[("email_null", "TRUE")]).filter(), &Expr::is_null("email"));
        assert_eq!(
            compile(&[("email_null", "nope")]).filter(),
            &Expr::is_not_null("email")
        );
    }

    #[test]
    fn booleans_convert() {
        assert_eq!(
            compile(&[("active", "true")]).filter(),
            &Expr::eq("active", true)
        );
    }

    #[test]
    fn relation_filter_compares_identity() {
        assert_eq!(compile(&[("team", "4")]).filter(), &Expr::eq("team", 4_i64));
    }

    #[test]
    fn default_fetch_skips_hidden_and_to_many() {
        let predicate = compile(&[]);
        assert_eq!(predicate.fetch(), ["team".to_owned()]);
        assert!(predicate.is_distinct());
        let count = predicate.plan(QueryKind::Count);
        assert!(count.fetch.is_empty());
        assert!(!count.distinct);
    }

    #[test]
    fn explicit_hints_keep_named_to_one_only() {
        let hints = vec![
            "mentor".to_owned(),
            "friends".to_owned(),
            "nope".to_owned(),
            "mentor".to_owned(),
        ];
        let predicate = FilterCompiler::new()
            .compile(&person(), &params(&[]), Some(&hints))
            .unwrap();
        assert_eq!(predicate.fetch(), ["mentor".to_owned()]);
        assert!(predicate.is_distinct());
    }

    #[test]
    fn to_many_never_fetched_by_default() {
        let team = MetadataCache::new().get_or_resolve::<Team>().unwrap();
        let predicate = FilterCompiler::new()
            .compile(&team, &params(&[]), None)
            .unwrap();
        assert!(predicate.fetch().is_empty());
    }

    #[test]
    fn compile_field_errors() {
        let compiler = FilterCompiler::new();
        let meta = person();
        let err = compiler
            .compile_field(&meta, "nope", &params(&[]))
            .unwrap_err();
        assert!(err.is_unknown_field());
        let err = compiler
            .compile_field(&meta, "secret", &params(&[]))
            .unwrap_err();
        assert!(err.is_not_filterable());
        let expr = compiler
            .compile_field(&meta, "age", &params(&[("age_gte", "21")]))
            .unwrap();
        assert_eq!(expr, Expr::ge("age", 21_i32));
    }

    #[test]
    fn slice_params() {
        let pairs: &[(&str, &str)] = &[("age_in", "1,2")];
        let predicate = FilterCompiler::new()
            .compile(&person(), pairs, None)
            .unwrap();
        assert_eq!(
            predicate.filter(),
            &Expr::in_list("age", vec![Value::I32(1), Value::I32(2)])
        );
    }

    #[test]
    fn compiled_predicate_filters_records() {
        let predicate = compile(&[("name_like", "ann"), ("age_gte", "18"), ("age_lte", "65")]);
        let row = |name: &str, age: Option<i32>| -> WireMap {
            [
                ("name".to_owned(), Value::from(name)),
                ("age".to_owned(), Value::from(age)),
            ]
            .into_iter()
            .collect()
        };
        assert!(predicate.matches(&row("Joanna", Some(30))));
        assert!(predicate.matches(&row("ANN", Some(18))));
        assert!(!predicate.matches(&row("Bob", Some(30))));
        assert!(!predicate.matches(&row("Ann", Some(70))));
        assert!(!predicate.matches(&row("Ann", None)));
    }

    #[test]
    fn in_memory_entities() {
        let cache = MetadataCache::new();
        let meta = cache.get_or_resolve::<Person>().unwrap();
        let predicate = FilterCompiler::new()
            .compile(&meta, &params(&[("team", "4"), ("age_in", "30,40")]), None)
            .unwrap();
        let member = Person {
            age: Some(30),
            team: Ref::id(4_i64),
            ..Person::default()
        };
        let outsider = Person {
            age: Some(30),
            team: Ref::id(5_i64),
            ..Person::default()
        };
        assert!(predicate.matches(&crate::filter::EntityRecord::new(&cache, &meta, &member)));
        assert!(!predicate.matches(&crate::filter::EntityRecord::new(&cache, &meta, &outsider)));
    }
}
