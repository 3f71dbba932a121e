// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use autoapi::{Engine, Entity, Value};

#[derive(Debug, Default, Entity)]
#[auto_api]
pub struct Item {
    #[id]
    pub id: i64,
    #[filter]
    pub r#type: String
}

fn main() {
    let engine = Engine::default();
    let wire = engine
        .to_wire(&Item {
            id:     1,
            r#type: "tool".to_owned()
        })
        .unwrap();
    assert_eq!(wire.get("type"), Some(&Value::from("tool")));
}
