// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use autoapi::{Engine, Entity, Ref};

#[derive(Debug, Default, Entity)]
#[auto_api]
pub struct Team {
    #[id]
    pub id: i64,
    pub name: String,
    #[one_to_many(mapped_by = "team")]
    pub members: Vec<Ref<Member>>
}

#[derive(Debug, Default, Entity)]
#[auto_api]
pub struct Member {
    #[id]
    pub id: i64,
    #[filter(eq, like)]
    pub name: String,
    #[many_to_one]
    pub team: Ref<Team>
}

fn main() {
    let engine = Engine::default();
    let metadata = engine.metadata::<Member>().unwrap();
    assert_eq!(metadata.fields().len(), 3);
    let wire = engine
        .to_wire(&Member {
            id:   1,
            name: "Ann".to_owned(),
            team: Ref::id(2_i64)
        })
        .unwrap();
    assert_eq!(wire.len(), 3);
}
