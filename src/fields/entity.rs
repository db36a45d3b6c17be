//! The protocol nested entities implement so entity fields can compose.

use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use super::WireData;
use crate::types::id::Id;

/// A type that converts to and from a wire map.
pub trait Entity: Sized {
    /// Name used by entity references and the deferred registry.
    const NAME: &'static str;

    /// Whether [`to_data_with`](Self::to_data_with) honours
    /// `include_internals`.
    ///
    /// Entity putters read this once when they are constructed to pick their
    /// [`InternalsMode`].
    const INCLUDES_INTERNALS: bool = false;

    /// Parse the entity from wire data.
    fn from_data(data: &WireData) -> Self;

    /// Serialize the entity.
    ///
    /// `defaults` also writes fields equal to their default value.
    /// `include_internals` additionally writes fields that Discord only sends
    /// and never accepts back (ids of owners, nested users, and so on).
    fn to_data_with(&self, defaults: bool, include_internals: bool) -> WireData;

    /// Serialize the entity without internals.
    fn to_data(&self, defaults: bool) -> WireData {
        self.to_data_with(defaults, false)
    }
}

/// An entity with a snowflake ID.
pub trait Identified: Entity {
    /// Marker of the entity's ID.
    type Marker;

    /// The entity's ID.
    fn id(&self) -> Id<Self::Marker>;
}

/// How an entity putter forwards `include_internals`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InternalsMode {
    /// The nested type has no internals.
    Never,
    /// Forward the caller's flag.
    Passthrough,
    /// Always include internals.
    Always,
}

impl InternalsMode {
    /// Pick the mode for an entity type.
    pub const fn of(includes_internals: bool, force: bool) -> Self {
        match (includes_internals, force) {
            (false, _) => Self::Never,
            (true, false) => Self::Passthrough,
            (true, true) => Self::Always,
        }
    }

    /// The flag to pass to `to_data_with` given the caller's flag.
    pub const fn resolve(self, include_internals: bool) -> bool {
        match self {
            Self::Never => false,
            Self::Passthrough => include_internals,
            Self::Always => true,
        }
    }
}

/// Type-erased access to an entity type.
///
/// This is what deferred references resolve to: a field can be declared
/// against an `Arc<dyn EntityCodec<E>>` that only becomes available once
/// the owning module registers it.
pub trait EntityCodec<E>: Send + Sync {
    /// See [`Entity::from_data`].
    fn from_data(&self, data: &WireData) -> E;

    /// See [`Entity::to_data_with`].
    fn to_data_with(&self, entity: &E, defaults: bool, include_internals: bool) -> WireData;

    /// See [`Entity::INCLUDES_INTERNALS`].
    fn includes_internals(&self) -> bool;
}

/// The [`EntityCodec`] of a concrete [`Entity`].
pub struct EntityType<E> {
    phantom: PhantomData<fn(E) -> E>,
}

impl<E: Entity + 'static> EntityType<E> {
    /// Create the codec.
    pub const fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }

    /// Shared, type-erased codec, ready to be declared in a registry.
    pub fn codec() -> Arc<dyn EntityCodec<E>> {
        Arc::new(Self::new())
    }
}

impl<E: Entity + 'static> Default for EntityType<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Debug for EntityType<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityType")
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E: Entity> EntityCodec<E> for EntityType<E> {
    fn from_data(&self, data: &WireData) -> E {
        E::from_data(data)
    }

    fn to_data_with(&self, entity: &E, defaults: bool, include_internals: bool) -> WireData {
        entity.to_data_with(defaults, include_internals)
    }

    fn includes_internals(&self) -> bool {
        E::INCLUDES_INTERNALS
    }
}

/// Implement `serde` for entities through their wire map, so that serde
/// output matches [`Entity::to_data`] without defaults.
macro_rules! impl_entity_serde {
    ($($ty:ty),* $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serde::Serialize::serialize(
                        &$crate::fields::Entity::to_data(self, false),
                        serializer,
                    )
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    <$crate::fields::WireData as serde::Deserialize<'de>>::deserialize(deserializer)
                        .map(|data| <$ty as $crate::fields::Entity>::from_data(&data))
                }
            }
        )*
    };
}

#[cfg_attr(not(feature = "models"), allow(unused_imports))]
pub(crate) use impl_entity_serde;

#[cfg(test)]
pub(crate) mod tests {
    //! Small entities shared by the framework tests.

    use super::{Entity, EntityType, Identified, InternalsMode};
    use crate::fields::{
        parsers::{EntityIdParser, NullableStringParser},
        putters::{EntityIdPutter, NullableStringPutter},
        FieldParser, FieldPutter, WireData,
    };
    use crate::types::id::{marker::GenericMarker, Id};
    use serde_json::{json, Value};
    use static_assertions::assert_impl_all;

    assert_impl_all!(EntityType<Item>: Send, Sync);

    const PARSE_ID: EntityIdParser<GenericMarker> = EntityIdParser::new("id");
    const PUT_ID_INTO: EntityIdPutter<GenericMarker> = EntityIdPutter::new("id");
    const PARSE_NAME: NullableStringParser = NullableStringParser::new("name");
    const PUT_NAME_INTO: NullableStringPutter = NullableStringPutter::new("name");

    /// An identified entity without internals.
    #[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
    pub(crate) struct Item {
        pub(crate) id: Id<GenericMarker>,
        pub(crate) name: Option<String>,
    }

    impl Item {
        pub(crate) fn new(id: u64, name: &str) -> Self {
            Self {
                id: Id::new(id),
                name: Some(name.to_owned()),
            }
        }
    }

    impl Entity for Item {
        const NAME: &'static str = "Item";

        fn from_data(data: &WireData) -> Self {
            Self {
                id: PARSE_ID.parse(data),
                name: PARSE_NAME.parse(data),
            }
        }

        fn to_data_with(&self, defaults: bool, _include_internals: bool) -> WireData {
            let mut data = WireData::new();
            PUT_ID_INTO.put(&self.id, &mut data, defaults);
            PUT_NAME_INTO.put(&self.name, &mut data, defaults);
            data
        }
    }

    impl Identified for Item {
        type Marker = GenericMarker;

        fn id(&self) -> Id<GenericMarker> {
            self.id
        }
    }

    /// An entity whose `secret` is only written with internals.
    #[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
    pub(crate) struct Secretive {
        pub(crate) name: Option<String>,
        pub(crate) secret: Option<String>,
    }

    impl Secretive {
        pub(crate) fn new(name: &str, secret: &str) -> Self {
            Self {
                name: Some(name.to_owned()),
                secret: Some(secret.to_owned()),
            }
        }
    }

    impl Entity for Secretive {
        const NAME: &'static str = "Secretive";
        const INCLUDES_INTERNALS: bool = true;

        fn from_data(data: &WireData) -> Self {
            Self {
                name: PARSE_NAME.parse(data),
                secret: NullableStringParser::new("secret").parse(data),
            }
        }

        fn to_data_with(&self, defaults: bool, include_internals: bool) -> WireData {
            let mut data = WireData::new();
            PUT_NAME_INTO.put(&self.name, &mut data, defaults);
            if include_internals {
                NullableStringPutter::new("secret").put(&self.secret, &mut data, defaults);
            }
            data
        }
    }

    pub(crate) fn wire(value: Value) -> WireData {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn internals_mode() {
        assert_eq!(InternalsMode::of(false, true), InternalsMode::Never);
        assert_eq!(InternalsMode::of(true, false), InternalsMode::Passthrough);
        assert_eq!(InternalsMode::of(true, true), InternalsMode::Always);

        assert!(!InternalsMode::Never.resolve(true));
        assert!(InternalsMode::Passthrough.resolve(true));
        assert!(!InternalsMode::Passthrough.resolve(false));
        assert!(InternalsMode::Always.resolve(false));
    }

    #[test]
    fn codec_delegates() {
        let codec = EntityType::<Secretive>::codec();
        assert!(codec.includes_internals());

        let entity = codec.from_data(&wire(json!({"name": "a", "secret": "b"})));
        assert_eq!(entity, Secretive::new("a", "b"));
        assert_eq!(
            Value::Object(codec.to_data_with(&entity, false, false)),
            json!({"name": "a"})
        );
        assert_eq!(
            Value::Object(codec.to_data_with(&entity, false, true)),
            json!({"name": "a", "secret": "b"})
        );
    }

    #[test]
    fn to_data_skips_internals() {
        let entity = Secretive::new("a", "b");
        assert_eq!(Value::Object(entity.to_data(false)), json!({"name": "a"}));
    }
}
