// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Bounded conversion between entity instances and wire maps.
//!
//! # Output
//!
//! Every field that is not hidden is emitted under its name, in declaration
//! order. Relations are emitted either as nested maps or as the related
//! identity:
//!
//! | Situation | Emitted |
//! |-----------|---------|
//! | `Ref::Id(v)` | `v` |
//! | depth below `max_depth`, target not on the active path | nested map |
//! | depth reached | target identity |
//! | target already on the active path | target identity |
//! | empty slot | null |
//!
//! Depth counts relation hops from the root; scalar fields never count.
//! Null fields are omitted unless the config includes them; the identity
//! field is always emitted.
//!
//! # Input
//!
//! Only writable fields (not identity, hidden or read-only) are applied,
//! and only when their key is present. Values are coerced towards the
//! field type first (see `coerce.rs`), with string conversions delegated to
//! the mapper's [`Converter`]. An update either applies every present key
//! or leaves the instance untouched.
//!
//! # Module Structure
//!
//! ```text
//! mapper/
//! ├── config.rs   # MappingConfig
//! ├── context.rs  # MappingContext, identity_of
//! ├── compiled.rs # EntityMapper, MapperCache
//! └── coerce.rs   # wire value coercion
//! ```

mod coerce;
mod compiled;
mod config;
mod context;

use std::{any::Any, sync::Arc};

pub use compiled::{EntityMapper, MapperCache};
pub use config::MappingConfig;
pub use context::{MappingContext, identity_of};
use tracing::trace;

use crate::{
    access::{FieldValue, Link},
    convert::Converter,
    descriptor::{Entity, simple_name},
    error::{AccessError, MappingError},
    metadata::{EntityMetadata, FieldMetadata, MetadataCache},
    value::{Value, WireMap}
};

/// Converts entity instances to and from [`WireMap`]s.
///
/// # Example
///
/// ```rust,ignore
/// let mapper = Mapper::new(Arc::new(MetadataCache::new()));
/// let wire = mapper.to_wire_entity(&book, &MappingConfig::STANDARD)?;
/// let copy: Book = mapper.from_wire_entity(&wire)?;
/// ```
#[derive(Debug)]
pub struct Mapper {
    metadata:  Arc<MetadataCache>,
    mappers:   MapperCache,
    converter: Converter
}

impl Mapper {
    /// Mapper resolving related types through `metadata`.
    #[must_use]
    pub fn new(metadata: Arc<MetadataCache>) -> Self {
        Self::with_mapper_cache(metadata, MapperCache::new())
    }

    /// Mapper using an explicitly sized plan cache.
    #[must_use]
    pub fn with_mapper_cache(metadata: Arc<MetadataCache>, mappers: MapperCache) -> Self {
        Self {
            metadata,
            mappers,
            converter: Converter::new()
        }
    }

    /// Use `converter` for string input, including registered custom types.
    #[must_use]
    pub fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    /// Metadata cache used for related types.
    #[must_use]
    pub const fn metadata_cache(&self) -> &Arc<MetadataCache> {
        &self.metadata
    }

    /// Compiled plan cache.
    #[must_use]
    pub const fn mapper_cache(&self) -> &MapperCache {
        &self.mappers
    }

    /// Converter applied to string input.
    #[must_use]
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Convert `instance` to a wire map. `None` maps to `None`.
    ///
    /// # Errors
    ///
    /// - [`MappingError::FieldAccess`] if `instance` does not match
    ///   `metadata` or a related instance does not match its relation
    /// - [`MappingError::Resolve`] if a related type cannot be resolved
    pub fn to_wire(
        &self,
        metadata: &EntityMetadata,
        instance: Option<&dyn Any>,
        config: &MappingConfig
    ) -> Result<Option<WireMap>, MappingError> {
        let Some(instance) = instance else {
            return Ok(None);
        };
        let mapper = self.compiled(metadata);
        let mut context = MappingContext::new(*config);
        self.write_entity(&mapper, instance, 0, &mut context).map(Some)
    }

    /// Convert a typed entity to a wire map.
    ///
    /// # Errors
    ///
    /// See [`Mapper::to_wire`]; also fails if `T` cannot be resolved.
    pub fn to_wire_entity<T: Entity>(
        &self,
        entity: &T,
        config: &MappingConfig
    ) -> Result<WireMap, MappingError> {
        let metadata = self.metadata.get_or_resolve::<T>()?;
        let mapper = self.mappers.get_or_compile(&metadata);
        let mut context = MappingContext::new(*config);
        self.write_entity(&mapper, entity, 0, &mut context)
    }

    /// Convert each entity independently.
    ///
    /// # Errors
    ///
    /// Stops at the first entity that fails; see [`Mapper::to_wire`].
    pub fn to_wire_list<'a, T: Entity>(
        &self,
        entities: impl IntoIterator<Item = &'a T>,
        config: &MappingConfig
    ) -> Result<Vec<WireMap>, MappingError> {
        let metadata = self.metadata.get_or_resolve::<T>()?;
        let mapper = self.mappers.get_or_compile(&metadata);
        entities
            .into_iter()
            .map(|entity| {
                let mut context = MappingContext::new(*config);
                self.write_entity(&mapper, entity, 0, &mut context)
            })
            .collect()
    }

    /// Build a new instance from `wire`.
    ///
    /// # Errors
    ///
    /// [`MappingError::FieldAccess`] if a field rejects its value.
    pub fn from_wire(
        &self,
        metadata: &EntityMetadata,
        wire: &WireMap
    ) -> Result<Box<dyn Any + Send + Sync>, MappingError> {
        let mapper = self.compiled(metadata);
        let mut instance = metadata.new_instance();
        apply(metadata, instance.as_mut(), self.inputs(&mapper, wire))?;
        Ok(instance)
    }

    /// Build a typed entity from `wire`.
    ///
    /// # Errors
    ///
    /// - see [`Mapper::from_wire`]
    /// - [`MappingError::TypeMismatch`] if the registered constructor of
    ///   `T` builds another type
    pub fn from_wire_entity<T: Entity>(&self, wire: &WireMap) -> Result<T, MappingError> {
        let metadata = self.metadata.get_or_resolve::<T>()?;
        self.from_wire(&metadata, wire)?
            .downcast::<T>()
            .map(|entity| *entity)
            .map_err(|_| MappingError::TypeMismatch {
                expected: simple_name::<T>().to_owned()
            })
    }

    /// Apply `wire` to an existing instance.
    ///
    /// Absent keys leave fields untouched; a present null clears the field.
    ///
    /// # Errors
    ///
    /// [`MappingError::FieldAccess`] if `instance` does not match `metadata`
    /// or a field rejects its value. The instance is left untouched on
    /// error.
    pub fn update_in_place(
        &self,
        metadata: &EntityMetadata,
        instance: &mut dyn Any,
        wire: &WireMap
    ) -> Result<(), MappingError> {
        let mapper = self.compiled(metadata);
        let inputs = self.inputs(&mapper, wire);
        if inputs.is_empty() {
            return Ok(());
        }
        let mut staged = metadata.new_instance();
        apply(metadata, staged.as_mut(), inputs.clone())?;
        // Every value was accepted above, so only a foreign instance can
        // fail here, and it fails on the first write.
        apply(metadata, instance, inputs)
    }

    /// Apply `wire` to a typed entity.
    ///
    /// # Errors
    ///
    /// See [`Mapper::update_in_place`].
    pub fn update_entity<T: Entity>(&self, entity: &mut T, wire: &WireMap) -> Result<(), MappingError> {
        let metadata = self.metadata.get_or_resolve::<T>()?;
        self.update_in_place(&metadata, entity, wire)
    }

    /// Coerced values for every input field present in `wire`.
    fn inputs<'m>(
        &self,
        mapper: &'m EntityMapper,
        wire: &WireMap
    ) -> Vec<(&'m FieldMetadata, FieldValue)> {
        mapper
            .input_fields()
            .filter_map(|field| {
                wire.get(field.name())
                    .map(|value| (field, coerce::coerce(&self.converter, field, value.clone())))
            })
            .collect()
    }

    /// Plan for `metadata`, sharing the cached metadata when there is one.
    fn compiled(&self, metadata: &EntityMetadata) -> Arc<EntityMapper> {
        if let Some(mapper) = self.mappers.get(metadata.type_id()) {
            return mapper;
        }
        let shared = self
            .metadata
            .get(metadata.type_id())
            .unwrap_or_else(|| Arc::new(metadata.clone()));
        self.mappers.get_or_compile(&shared)
    }

    fn write_entity(
        &self,
        mapper: &EntityMapper,
        instance: &dyn Any,
        depth: u32,
        context: &mut MappingContext
    ) -> Result<WireMap, MappingError> {
        let address = identity_of(instance);
        let entered = context.enter(address);
        let result = self.write_fields(mapper, instance, depth, context);
        if entered {
            context.exit(address);
        }
        result
    }

    fn write_fields(
        &self,
        mapper: &EntityMapper,
        instance: &dyn Any,
        depth: u32,
        context: &mut MappingContext
    ) -> Result<WireMap, MappingError> {
        let metadata = mapper.metadata();
        let mut wire = WireMap::new();
        for field in mapper.output_fields() {
            let read = field
                .accessor()
                .read(instance)
                .map_err(|source| field_access(metadata, field, source))?;
            let value = match read {
                FieldValue::Scalar(value) => value,
                FieldValue::One(None) => Value::Null,
                FieldValue::One(Some(link)) => {
                    self.reference_or_expand(metadata, field, link, depth, context)?
                }
                FieldValue::Many(links) => Value::List(
                    links
                        .into_iter()
                        .map(|link| self.reference_or_expand(metadata, field, link, depth, context))
                        .collect::<Result<_, _>>()?
                )
            };
            if value.is_null() && !field.is_id() && !context.config().includes_null_fields() {
                continue;
            }
            wire.insert(field.name().to_owned(), value);
        }
        Ok(wire)
    }

    /// Nested map of the related instance, or its identity when the depth
    /// limit is reached or the instance is already being mapped.
    fn reference_or_expand(
        &self,
        owner: &EntityMetadata,
        field: &FieldMetadata,
        link: Link,
        depth: u32,
        context: &mut MappingContext
    ) -> Result<Value, MappingError> {
        let related = match link {
            Link::Id(identity) => return Ok(identity),
            Link::Instance(related) => related
        };
        let relation = field.relation().ok_or_else(|| {
            field_access(
                owner,
                field,
                AccessError::ShapeMismatch {
                    expected: "scalar",
                    found:    "relation"
                }
            )
        })?;
        let target = self.metadata.resolve_handle(relation.target())?;
        let address = identity_of(&*related);

        if context.may_expand(depth, address) {
            let mapper = self.mappers.get_or_compile(&target);
            return self
                .write_entity(&mapper, &*related, depth + 1, context)
                .map(Value::Map);
        }

        trace!(
            entity = owner.type_name(),
            field = field.name(),
            depth,
            cycle = context.is_being_mapped(address),
            "emitting identity instead of nested map"
        );
        target
            .identity_of(&*related)
            .map_err(|source| field_access(owner, field, source))
    }
}

fn apply(
    metadata: &EntityMetadata,
    instance: &mut dyn Any,
    inputs: Vec<(&FieldMetadata, FieldValue)>
) -> Result<(), MappingError> {
    for (field, value) in inputs {
        field
            .accessor()
            .write(instance, value)
            .map_err(|source| field_access(metadata, field, source))?;
    }
    Ok(())
}

fn field_access(metadata: &EntityMetadata, field: &FieldMetadata, source: AccessError) -> MappingError {
    MappingError::FieldAccess {
        entity: metadata.type_name().to_owned(),
        field: field.name().to_owned(),
        source
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Weak};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        fixtures::{Author, Book, Invoice, Person, Stamp, Team, init_tracing},
        relation::Ref
    };

    fn mapper() -> Mapper {
        Mapper::new(Arc::new(MetadataCache::new()))
    }

    fn wire(pairs: impl IntoIterator<Item = (&'static str, Value)>) -> WireMap {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect()
    }

    fn library() -> Arc<Author> {
        Arc::new_cyclic(|author: &Weak<Author>| Author {
            id:    1,
            name:  "Le Guin".into(),
            books: vec![Ref::loaded(Book {
                id:     10,
                title:  "The Dispossessed".into(),
                author: Ref::Inverse(author.clone())
            })]
        })
    }

    #[test]
    fn none_maps_to_none() {
        let mapper = mapper();
        let meta = mapper.metadata_cache().get_or_resolve::<Person>().unwrap();
        let wire = mapper.to_wire(&meta, None, &MappingConfig::DEEP).unwrap();
        assert!(wire.is_none());
    }

    #[test]
    fn hidden_fields_and_nulls_are_omitted() {
        let person = Person {
            id: 7,
            name: "Ann".into(),
            secret: "hunter2".into(),
            ..Person::default()
        };
        let wire = mapper()
            .to_wire_entity(&person, &MappingConfig::STANDARD)
            .unwrap();
        assert_eq!(
            wire,
            self::wire([
                ("id", Value::I64(7)),
                ("name", Value::from("Ann")),
                ("active", Value::Bool(false)),
                ("friends", Value::List(Vec::new())),
            ])
        );
    }

    #[test]
    fn include_null_fields() {
        let config = MappingConfig::SHALLOW.include_null_fields(true);
        let wire = mapper().to_wire_entity(&Person::default(), &config).unwrap();
        assert_eq!(wire.get("age"), Some(&Value::Null));
        assert_eq!(wire.get("team"), Some(&Value::Null));
        assert!(!wire.contains_key("secret"));
        assert!(!wire.contains_key("mentor"));
    }

    #[test]
    fn depth_zero_emits_identities() {
        let team = Arc::new(Team {
            id: 4,
            name: "Core".into(),
            ..Team::default()
        });
        let person = Person {
            id: 1,
            team: Ref::shared(&team),
            friends: vec![Ref::id(2_i64)],
            ..Person::default()
        };
        let wire = mapper()
            .to_wire_entity(&person, &MappingConfig::SHALLOW)
            .unwrap();
        assert_eq!(wire.get("team"), Some(&Value::I64(4)));
        assert_eq!(wire.get("friends"), Some(&Value::List(vec![Value::I64(2)])));
    }

    #[test]
    fn depth_one_expands_once() {
        let team = Arc::new(Team {
            id: 4,
            name: "Core".into(),
            members: vec![Ref::id(1_i64)]
        });
        let person = Person {
            id: 1,
            team: Ref::shared(&team),
            ..Person::default()
        };
        let wire = mapper()
            .to_wire_entity(&person, &MappingConfig::STANDARD)
            .unwrap();
        assert_eq!(
            wire.get("team"),
            Some(&Value::Map(self::wire([
                ("id", Value::I64(4)),
                ("name", Value::from("Core")),
                ("members", Value::List(vec![Value::I64(1)])),
            ])))
        );
    }

    #[test]
    fn cycles_are_truncated_to_identities() {
        init_tracing();
        let author = library();
        let wire = mapper()
            .to_wire_entity(&*author, &MappingConfig::DEEP)
            .unwrap();
        assert_eq!(
            wire,
            self::wire([
                ("id", Value::I64(1)),
                ("name", Value::from("Le Guin")),
                (
                    "books",
                    Value::List(vec![Value::Map(self::wire([
                        ("id", Value::I64(10)),
                        ("title", Value::from("The Dispossessed")),
                        ("author", Value::I64(1)),
                    ]))])
                ),
            ])
        );
    }

    #[test]
    fn without_cycle_detection_depth_still_bounds() {
        let author = library();
        let config = MappingConfig::new(2, false, false);
        let wire = mapper().to_wire_entity(&*author, &config).unwrap();
        let Some(Value::List(books)) = wire.get("books") else {
            panic!("books missing");
        };
        let Value::Map(book) = &books[0] else {
            panic!("book not expanded");
        };
        let Some(Value::Map(again)) = book.get("author") else {
            panic!("author not expanded");
        };
        assert_eq!(again.get("books"), Some(&Value::List(vec![Value::I64(10)])));
    }

    #[test]
    fn self_referencing_tree() {
        let leaf = Arc::new(Person {
            id: 3,
            ..Person::default()
        });
        let middle = Arc::new(Person {
            id: 2,
            friends: vec![Ref::shared(&leaf)],
            ..Person::default()
        });
        let root = Person {
            id: 1,
            friends: vec![Ref::shared(&middle), Ref::shared(&leaf)],
            ..Person::default()
        };
        let wire = mapper()
            .to_wire_entity(&root, &MappingConfig::STANDARD)
            .unwrap();
        let Some(Value::List(friends)) = wire.get("friends") else {
            panic!("friends missing");
        };
        let Value::Map(first) = &friends[0] else {
            panic!("friend not expanded");
        };
        assert_eq!(first.get("friends"), Some(&Value::List(vec![Value::I64(3)])));
        assert!(matches!(&friends[1], Value::Map(_)));
    }

    #[test]
    fn list_entries_map_independently() {
        let people = [
            Person {
                id: 1,
                ..Person::default()
            },
            Person {
                id: 2,
                ..Person::default()
            },
        ];
        let wires = mapper()
            .to_wire_list(&people, &MappingConfig::SHALLOW)
            .unwrap();
        assert_eq!(wires.len(), 2);
        assert_eq!(wires[1].get("id"), Some(&Value::I64(2)));
    }

    #[test]
    fn from_wire_skips_protected_fields() {
        let person: Person = mapper()
            .from_wire_entity(&wire([
                ("id", Value::I64(99)),
                ("name", Value::from("Ann")),
                ("age", Value::from("31")),
                ("secret", Value::from("leak")),
                ("active", Value::from("TRUE")),
                ("team", Value::I32(4)),
                ("friends", Value::List(vec![Value::I64(2), Value::Map(WireMap::new())])),
            ]))
            .unwrap();
        assert_eq!(person.id, 0);
        assert_eq!(person.name, "Ann");
        assert_eq!(person.age, Some(31));
        assert!(person.secret.is_empty());
        assert!(person.active);
        assert_eq!(person.team.identity(), Some(&Value::I64(4)));
        assert_eq!(person.friends.len(), 1);
    }

    #[test]
    fn update_in_place_leaves_absent_keys() {
        let mapper = mapper();
        let mut person = Person {
            id: 5,
            name: "Ann".into(),
            age: Some(40),
            email: Some("ann@example.com".into()),
            ..Person::default()
        };
        mapper
            .update_entity(
                &mut person,
                &wire([("age", Value::I64(41)), ("email", Value::Null)])
            )
            .unwrap();
        assert_eq!(person.id, 5);
        assert_eq!(person.name, "Ann");
        assert_eq!(person.age, Some(41));
        assert_eq!(person.email, None);
    }

    #[test]
    fn rejected_values_abort() {
        let mut person = Person::default();
        let err = mapper()
            .update_entity(&mut person, &wire([("name", Value::Null)]))
            .unwrap_err();
        assert!(err.is_field_access());
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn failed_update_leaves_instance_untouched() {
        let mut person = Person {
            name: "Ann".into(),
            age: Some(40),
            ..Person::default()
        };
        let err = mapper()
            .update_entity(
                &mut person,
                &wire([("name", Value::from("Bob")), ("age", Value::from("forty"))])
            )
            .unwrap_err();
        assert_eq!(err.field(), Some("age"));
        assert_eq!(person.name, "Ann");
        assert_eq!(person.age, Some(40));
    }

    #[test]
    fn update_of_foreign_instance_fails_before_writing() {
        let mapper = mapper();
        let meta = mapper.metadata_cache().get_or_resolve::<Person>().unwrap();
        let mut team = Team {
            name: "Core".into(),
            ..Team::default()
        };
        let err = mapper
            .update_in_place(&meta, &mut team, &wire([("name", Value::from("Bob"))]))
            .unwrap_err();
        assert!(err.is_field_access());
        assert_eq!(team.name, "Core");
    }

    #[test]
    fn mismatched_instance_is_a_field_access_error() {
        let mapper = mapper();
        let meta = mapper.metadata_cache().get_or_resolve::<Person>().unwrap();
        let err = mapper
            .to_wire(&meta, Some(&Team::default()), &MappingConfig::SHALLOW)
            .unwrap_err();
        assert!(err.is_field_access());
    }

    #[test]
    fn embedded_base_fields_round_trip() {
        let mapper = mapper();
        let invoice = Invoice {
            number: "INV-1".into(),
            stamp:  Stamp {
                created_by: Some("ops".into()),
                version:    3
            }
        };
        let wire = mapper
            .to_wire_entity(&invoice, &MappingConfig::SHALLOW)
            .unwrap();
        assert_eq!(
            wire,
            self::wire([
                ("number", Value::from("INV-1")),
                ("created_by", Value::from("ops")),
                ("version", Value::I64(3)),
            ])
        );

        let copy: Invoice = mapper
            .from_wire_entity(&self::wire([
                ("created_by", Value::from("api")),
                ("version", Value::I32(4)),
            ]))
            .unwrap();
        assert_eq!(copy.stamp.created_by.as_deref(), Some("api"));
        assert_eq!(copy.stamp.version, 4);
    }

    #[test]
    fn scalar_round_trip() {
        let mapper = mapper();
        let person = Person {
            id: 9,
            name: "Ann".into(),
            age: Some(30),
            email: Some("ann@example.com".into()),
            active: true,
            ..Person::default()
        };
        let wire = mapper
            .to_wire_entity(&person, &MappingConfig::SHALLOW)
            .unwrap();
        let copy: Person = mapper.from_wire_entity(&wire).unwrap();
        assert_eq!(copy.name, person.name);
        assert_eq!(copy.age, person.age);
        assert_eq!(copy.email, person.email);
        assert_eq!(copy.active, person.active);
    }

    #[test]
    fn plans_are_cached() {
        let mapper = mapper();
        mapper
            .to_wire_entity(&Person::default(), &MappingConfig::SHALLOW)
            .unwrap();
        mapper
            .to_wire_entity(&Person::default(), &MappingConfig::SHALLOW)
            .unwrap();
        assert_eq!(mapper.mapper_cache().len(), 1);
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mapper>();
        assert_send_sync::<MapperCache>();
    }
}
