// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use autoapi::{Engine, Entity, Scalar, Value};

#[derive(Debug, Default, Entity)]
#[auto_api]
pub struct Setting<T>
where
    T: Scalar + Default
{
    #[id]
    pub id: i64,
    #[filter]
    pub value: T
}

fn main() {
    let engine = Engine::default();
    let wire = engine
        .to_wire(&Setting {
            id:    1,
            value: true
        })
        .unwrap();
    assert_eq!(wire.get("value"), Some(&Value::Bool(true)));

    let wire = engine
        .to_wire(&Setting {
            id:    2,
            value: 5_i32
        })
        .unwrap();
    assert_eq!(wire.get("value"), Some(&Value::I32(5)));
    assert_eq!(engine.metadata_cache().len(), 2);
}
