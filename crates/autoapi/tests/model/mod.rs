// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Derived entities shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use autoapi::{Entity, Ref};
use chrono::{DateTime, Utc};

/// Bookkeeping fields shared by entities.
#[derive(Debug, Default, Entity)]
#[entity(shared_base)]
pub struct Stamp {
    #[read_only]
    pub created_at: Option<DateTime<Utc>>,

    #[version]
    pub revision: i64
}

/// A person in the directory.
#[derive(Debug, Default, Entity)]
#[auto_api(path = "/people", tags("directory"))]
#[entity(table = "people")]
#[soft_delete]
pub struct Person {
    #[id]
    #[generated(identity)]
    pub id: i64,

    /// Display name.
    #[validate(not_blank, length(max = 80))]
    #[filter(eq, like, case_sensitive = false)]
    pub name: String,

    #[filter(range, between, in_list)]
    pub age: Option<i32>,

    #[validate(email)]
    #[filter(is_null)]
    pub email: Option<String>,

    #[hidden]
    pub password_hash: String,

    #[filter]
    pub active: bool,

    #[many_to_one]
    #[filter]
    pub team: Ref<Team>,

    #[many_to_one]
    #[hidden]
    pub mentor: Ref<Person>,

    #[many_to_many]
    pub friends: Vec<Ref<Person>>,

    #[transient]
    pub cache: Vec<u8>,

    #[base]
    pub stamp: Stamp
}

/// A team of people.
#[derive(Debug, Default, Entity)]
#[auto_api(path = "/squads", expose = "read_only")]
pub struct Team {
    #[id]
    pub id: i64,

    #[filter(like)]
    pub name: String,

    #[one_to_many(mapped_by = "team")]
    pub members: Vec<Ref<Person>>
}

#[derive(Debug, Default, Entity)]
#[auto_api]
pub struct Author {
    #[id]
    pub id: i64,

    pub name: String,

    #[one_to_many(mapped_by = "author")]
    pub books: Vec<Ref<Book>>
}

#[derive(Debug, Default, Entity)]
#[auto_api]
pub struct Book {
    #[id]
    pub id: i64,

    pub title: String,

    #[many_to_one]
    pub author: Ref<Author>
}

/// Derived but not exposed.
#[derive(Debug, Default, Entity)]
pub struct Draft {
    pub body: String
}

/// Author 1 with books 10 and 11, each pointing back at the author.
pub fn library() -> Arc<Author> {
    Arc::new_cyclic(|me| Author {
        id:    1,
        name:  "Ursula".to_owned(),
        books: vec![
            Ref::loaded(Book {
                id:     10,
                title:  "The Dispossessed".to_owned(),
                author: Ref::Inverse(me.clone())
            }),
            Ref::loaded(Book {
                id:     11,
                title:  "The Lathe of Heaven".to_owned(),
                author: Ref::Inverse(me.clone())
            }),
        ]
    })
}

pub fn ann() -> Person {
    Person {
        id: 7,
        name: "Ann".to_owned(),
        age: Some(34),
        password_hash: "x".to_owned(),
        active: true,
        team: Ref::id(4_i64),
        ..Person::default()
    }
}
