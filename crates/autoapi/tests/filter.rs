// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query parameters compiled against derived entities.

mod model;

use std::collections::HashMap;

use autoapi::{
    Engine, Expr, FilterError, Value, WireMap,
    filter::{EntityRecord, QueryKind}
};
use model::{Person, Team, ann};
use pretty_assertions::assert_eq;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

#[test]
fn person_search() {
    let engine = Engine::default();
    let predicate = engine
        .compile::<Person, _>(
            &params(&[("name_like", "ANN"), ("age_gte", "18"), ("age_lte", "65")]),
            None
        )
        .unwrap();
    assert_eq!(
        predicate.filter(),
        &Expr::all([
            Expr::like_ignore_case("name", "%ann%"),
            Expr::ge("age", 18_i32),
            Expr::le("age", 65_i32),
        ])
    );
    assert_eq!(predicate.fetch(), ["team".to_owned()]);
}

#[test]
fn slice_parameters() {
    let engine = Engine::default();
    let predicate = engine
        .compile::<Person, _>(&[("age_between", "18,65"), ("email_null", "TRUE")][..], None)
        .unwrap();
    assert_eq!(
        predicate.filter(),
        &Expr::all([
            Expr::between("age", 18_i32, 65_i32),
            Expr::is_null("email"),
        ])
    );
}

#[test]
fn relation_filter_uses_target_identity() {
    let engine = Engine::default();
    let predicate = engine
        .compile::<Person, _>(&params(&[("team", "4"), ("active", "false")]), None)
        .unwrap();
    assert_eq!(
        predicate.filter(),
        &Expr::all([Expr::eq("active", false), Expr::eq("team", 4_i64)])
    );
}

#[test]
fn unknown_parameters_are_ignored() {
    let engine = Engine::default();
    let predicate = engine
        .compile::<Person, _>(
            &params(&[("password_hash", "x"), ("page", "2"), ("age_gt", "3")]),
            None
        )
        .unwrap();
    assert!(predicate.filter().is_true());
}

#[test]
fn fetch_hints() {
    let engine = Engine::default();
    let hints = vec!["mentor".to_owned(), "friends".to_owned()];
    let predicate = engine.compile::<Person, _>(&params(&[]), Some(&hints)).unwrap();
    assert_eq!(predicate.fetch(), ["mentor".to_owned()]);

    let team = engine.compile::<Team, _>(&params(&[]), None).unwrap();
    assert!(team.fetch().is_empty());
    assert!(team.is_distinct());

    let count = predicate.plan(QueryKind::Count);
    assert!(count.fetch.is_empty());
}

#[test]
fn compile_field_errors() {
    let engine = Engine::default();
    let metadata = engine.metadata::<Person>().unwrap();
    let compiler = engine.compiler();

    let err = compiler
        .compile_field(&metadata, "salary", &params(&[("salary", "1")]))
        .unwrap_err();
    assert!(matches!(err, FilterError::UnknownField { .. }));

    let err = compiler
        .compile_field(&metadata, "friends", &params(&[("friends", "1")]))
        .unwrap_err();
    assert!(matches!(err, FilterError::NotFilterable { .. }));

    let expr = compiler
        .compile_field(&metadata, "name", &params(&[("name", "Ann")]))
        .unwrap();
    assert_eq!(expr, Expr::eq_ignore_case("name", "Ann"));
}

#[test]
fn predicate_matches_wire_rows() {
    let engine = Engine::default();
    let predicate = engine
        .compile::<Person, _>(&params(&[("name", "ann"), ("age_in", "30,34")]), None)
        .unwrap();

    let row: WireMap = [
        ("name".to_owned(), Value::from("Ann")),
        ("age".to_owned(), Value::I32(34)),
    ]
    .into_iter()
    .collect();
    assert!(predicate.matches(&row));

    let other: WireMap = [
        ("name".to_owned(), Value::from("Bob")),
        ("age".to_owned(), Value::I32(34)),
    ]
    .into_iter()
    .collect();
    assert!(!predicate.matches(&other));
}

#[test]
fn predicate_matches_entities() {
    let engine = Engine::default();
    let metadata = engine.metadata::<Person>().unwrap();
    let predicate = engine
        .compile::<Person, _>(&params(&[("team", "4"), ("age_gte", "18")]), None)
        .unwrap();

    let person = ann();
    let record = EntityRecord::new(engine.metadata_cache(), &metadata, &person);
    assert!(predicate.matches(&record));

    let young = Person {
        age: Some(12),
        ..ann()
    };
    let record = EntityRecord::new(engine.metadata_cache(), &metadata, &young);
    assert!(!predicate.matches(&record));
}
