// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-registered entities shared by unit tests.

use crate::{
    descriptor::{
        ApiConfig, Constraint, Entity, EntityDescriptor, FieldAnnotation, FieldDescriptor,
        GenerationType, TypeAnnotation
    },
    filter::{FilterConfig, FilterOp},
    relation::Ref,
    value::{Scalar, ScalarType, Value}
};

#[derive(Debug, Default)]
pub struct Person {
    pub id:      i64,
    pub name:    String,
    pub age:     Option<i32>,
    pub email:   Option<String>,
    pub secret:  String,
    pub active:  bool,
    pub team:    Ref<Team>,
    pub mentor:  Ref<Person>,
    pub friends: Vec<Ref<Person>>
}

impl Entity for Person {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::of::<Self>()
            .annotate(TypeAnnotation::AutoApi(ApiConfig::new()))
            .field(
                FieldDescriptor::scalar::<Self, i64>("id", |p| &p.id, |p| &mut p.id)
                    .annotate(FieldAnnotation::Id)
                    .annotate(FieldAnnotation::Generated(GenerationType::Identity))
            )
            .field(
                FieldDescriptor::scalar::<Self, String>("name", |p| &p.name, |p| &mut p.name)
                    .annotate(FieldAnnotation::Constraint(Constraint::NotBlank))
                    .annotate(FieldAnnotation::Filterable(
                        FilterConfig::new(vec![FilterOp::Equals, FilterOp::Like])
                            .case_sensitive(false)
                    ))
            )
            .field(
                FieldDescriptor::scalar::<Self, Option<i32>>("age", |p| &p.age, |p| &mut p.age)
                    .annotate(FieldAnnotation::Filterable(FilterConfig::new(vec![
                        FilterOp::Range,
                        FilterOp::Between,
                        FilterOp::In,
                    ])))
            )
            .field(
                FieldDescriptor::scalar::<Self, Option<String>>(
                    "email",
                    |p| &p.email,
                    |p| &mut p.email
                )
                .annotate(FieldAnnotation::Constraint(Constraint::Email))
                .annotate(FieldAnnotation::Filterable(FilterConfig::new(vec![
                    FilterOp::IsNull,
                ])))
            )
            .field(
                FieldDescriptor::scalar::<Self, String>("secret", |p| &p.secret, |p| &mut p.secret)
                    .annotate(FieldAnnotation::Hidden)
            )
            .field(
                FieldDescriptor::scalar::<Self, bool>("active", |p| &p.active, |p| &mut p.active)
                    .annotate(FieldAnnotation::Filterable(FilterConfig::default()))
            )
            .field(
                FieldDescriptor::to_one::<Self, Team>("team", |p| &p.team, |p| &mut p.team)
                    .annotate(FieldAnnotation::ManyToOne)
                    .annotate(FieldAnnotation::Filterable(FilterConfig::default()))
            )
            .field(
                FieldDescriptor::to_one::<Self, Person>("mentor", |p| &p.mentor, |p| &mut p.mentor)
                    .annotate(FieldAnnotation::Hidden)
            )
            .field(
                FieldDescriptor::to_many::<Self, Person>(
                    "friends",
                    |p| &p.friends,
                    |p| &mut p.friends
                )
                .annotate(FieldAnnotation::ManyToMany {
                    mapped_by: None
                })
            )
    }
}

#[derive(Debug, Default)]
pub struct Team {
    pub id:      i64,
    pub name:    String,
    pub members: Vec<Ref<Person>>
}

impl Entity for Team {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::of::<Self>()
            .annotate(TypeAnnotation::AutoApi(ApiConfig::new().path("/squads")))
            .annotate(TypeAnnotation::Table("teams".into()))
            .field(
                FieldDescriptor::scalar::<Self, i64>("id", |t| &t.id, |t| &mut t.id)
                    .annotate(FieldAnnotation::Id)
            )
            .field(FieldDescriptor::scalar::<Self, String>(
                "name",
                |t| &t.name,
                |t| &mut t.name
            ))
            .field(
                FieldDescriptor::to_many::<Self, Person>(
                    "members",
                    |t| &t.members,
                    |t| &mut t.members
                )
                .annotate(FieldAnnotation::OneToMany {
                    mapped_by: Some("team".into())
                })
            )
    }
}

#[derive(Debug, Default)]
pub struct Author {
    pub id:    i64,
    pub name:  String,
    pub books: Vec<Ref<Book>>
}

impl Entity for Author {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::of::<Self>()
            .annotate(TypeAnnotation::AutoApi(ApiConfig::new()))
            .field(
                FieldDescriptor::scalar::<Self, i64>("id", |a| &a.id, |a| &mut a.id)
                    .annotate(FieldAnnotation::Id)
            )
            .field(FieldDescriptor::scalar::<Self, String>(
                "name",
                |a| &a.name,
                |a| &mut a.name
            ))
            .field(FieldDescriptor::to_many::<Self, Book>(
                "books",
                |a| &a.books,
                |a| &mut a.books
            ))
    }
}

#[derive(Debug, Default)]
pub struct Book {
    pub id:     i64,
    pub title:  String,
    pub author: Ref<Author>
}

impl Entity for Book {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::of::<Self>()
            .annotate(TypeAnnotation::AutoApi(ApiConfig::new()))
            .field(
                FieldDescriptor::scalar::<Self, i64>("id", |b| &b.id, |b| &mut b.id)
                    .annotate(FieldAnnotation::Id)
            )
            .field(FieldDescriptor::scalar::<Self, String>(
                "title",
                |b| &b.title,
                |b| &mut b.title
            ))
            .field(FieldDescriptor::to_one::<Self, Author>(
                "author",
                |b| &b.author,
                |b| &mut b.author
            ))
    }
}

#[derive(Debug, Default)]
pub struct Stamp {
    pub created_by: Option<String>,
    pub version:    i64
}

impl Entity for Stamp {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::of::<Self>()
            .annotate(TypeAnnotation::SharedBase)
            .field(FieldDescriptor::scalar::<Self, Option<String>>(
                "created_by",
                |s| &s.created_by,
                |s| &mut s.created_by
            ))
            .field(
                FieldDescriptor::scalar::<Self, i64>("version", |s| &s.version, |s| &mut s.version)
                    .annotate(FieldAnnotation::Version)
            )
    }
}

#[derive(Debug, Default)]
pub struct Invoice {
    pub number: String,
    pub stamp:  Stamp
}

impl Entity for Invoice {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::of::<Self>()
            .annotate(TypeAnnotation::AutoApi(ApiConfig::new()))
            .field(
                FieldDescriptor::scalar::<Self, String>(
                    "number",
                    |i| &i.number,
                    |i| &mut i.number
                )
                .annotate(FieldAnnotation::Id)
            )
            .field(FieldDescriptor::embedded::<Self, Stamp>(
                "stamp",
                |i| &i.stamp,
                |i| &mut i.stamp
            ))
            .field(FieldDescriptor::transient("cached_total"))
    }
}

/// Custom scalar stored as its rank.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    #[default]
    Low,
    High
}

impl Priority {
    /// Parse the textual form registered with a `Converter`.
    pub fn parse(raw: &str) -> Option<Value> {
        match raw.trim() {
            "low" => Some(Value::I32(1)),
            "high" => Some(Value::I32(3)),
            _ => None
        }
    }
}

impl Scalar for Priority {
    const TYPE: ScalarType = ScalarType::Custom("Priority");

    fn to_value(&self) -> Value {
        Value::I32(match self {
            Self::Low => 1,
            Self::High => 3
        })
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::I32(1) => Ok(Self::Low),
            Value::I32(3) => Ok(Self::High),
            other => Err(other)
        }
    }
}

#[derive(Debug, Default)]
pub struct Ticket {
    pub id:       i64,
    pub title:    String,
    pub priority: Priority
}

impl Entity for Ticket {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::of::<Self>()
            .annotate(TypeAnnotation::AutoApi(ApiConfig::new()))
            .field(
                FieldDescriptor::scalar::<Self, i64>("id", |t| &t.id, |t| &mut t.id)
                    .annotate(FieldAnnotation::Id)
            )
            .field(FieldDescriptor::scalar::<Self, String>(
                "title",
                |t| &t.title,
                |t| &mut t.title
            ))
            .field(
                FieldDescriptor::scalar::<Self, Priority>(
                    "priority",
                    |t| &t.priority,
                    |t| &mut t.priority
                )
                .annotate(FieldAnnotation::Filterable(FilterConfig::default()))
            )
    }
}

/// Not an exposed entity.
#[derive(Debug, Default)]
pub struct Scratch {
    pub note: String
}

impl Entity for Scratch {
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::of::<Self>().field(FieldDescriptor::scalar::<Self, String>(
            "note",
            |s| &s.note,
            |s| &mut s.note
        ))
    }
}

/// Route engine logs to the test harness; `RUST_LOG=autoapi_core=trace`
/// shows mapping decisions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
