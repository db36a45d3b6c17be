//! Field putters: value → wire.
//!
//! Putters come in two flavours. *Forced* putters always write their key.
//! *Optional* putters leave the key out when the value equals the field
//! default, unless the caller asks for `defaults`, in which case they write
//! the wire form of the default (usually `null`).

use bitflags::Flags;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{marker::PhantomData, sync::Arc};
use tracing::warn;

use super::{
    parsers::EntityDefault, should_put, Deferred, Entity, EntityCodec, FieldPutter,
    InternalsMode, ResolveError, WireData, WirePrimitive,
};
use crate::types::{
    id::Id,
    preinstanced::{Preinstanced, PreinstancedValue},
    util::datetime::datetime_to_timestamp,
};

fn id_to_wire<M>(id: Id<M>) -> Value {
    if id.is_none() {
        Value::Null
    } else {
        Value::String(id.to_string())
    }
}

fn ids_to_wire<M>(ids: Option<&Vec<Id<M>>>) -> Value {
    Value::Array(
        ids.into_iter()
            .flatten()
            .map(|id| Value::String(id.to_string()))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Writes a scalar unless it equals `default`.
#[derive(Clone, Debug)]
pub struct ValuePutter<T> {
    key: &'static str,
    default: T,
}

impl<T> ValuePutter<T> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str, default: T) -> Self {
        Self { key, default }
    }
}

impl<T: WirePrimitive + PartialEq> FieldPutter for ValuePutter<T> {
    type Value = T;

    fn put<'d>(&self, value: &T, data: &'d mut WireData, defaults: bool) -> &'d mut WireData {
        if should_put(*value == self.default, defaults) {
            data.insert(self.key.to_owned(), value.to_wire());
        }
        data
    }
}

/// Writes a boolean unless it equals the default.
pub type BoolPutter = ValuePutter<bool>;

/// Writes an integer unless it equals the default.
pub type IntPutter = ValuePutter<i64>;

/// Writes a float unless it equals the default.
pub type FloatPutter = ValuePutter<f64>;

/// Writes a scalar unconditionally.
#[derive(Clone, Copy, Debug)]
pub struct ForceValuePutter<T> {
    key: &'static str,
    phantom: PhantomData<fn(T)>,
}

impl<T> ForceValuePutter<T> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<T: WirePrimitive> FieldPutter for ForceValuePutter<T> {
    type Value = T;

    fn put<'d>(&self, value: &T, data: &'d mut WireData, _defaults: bool) -> &'d mut WireData {
        data.insert(self.key.to_owned(), value.to_wire());
        data
    }
}

/// Writes a scalar that may be absent. `None` is left out unless `defaults`
/// is set, in which case it's written as `null`.
#[derive(Clone, Copy, Debug)]
pub struct NullableValuePutter<T> {
    key: &'static str,
    phantom: PhantomData<fn(T)>,
}

impl<T> NullableValuePutter<T> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<T: WirePrimitive> FieldPutter for NullableValuePutter<T> {
    type Value = Option<T>;

    fn put<'d>(
        &self,
        value: &Option<T>,
        data: &'d mut WireData,
        defaults: bool,
    ) -> &'d mut WireData {
        match value {
            Some(value) => {
                data.insert(self.key.to_owned(), value.to_wire());
            }
            None if defaults => {
                data.insert(self.key.to_owned(), Value::Null);
            }
            None => {}
        }
        data
    }
}

/// Writes an optional string; `None` is left out unless `defaults` is set.
#[derive(Clone, Copy, Debug)]
pub struct NullableStringPutter {
    key: &'static str,
}

impl NullableStringPutter {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldPutter for NullableStringPutter {
    type Value = Option<String>;

    fn put<'d>(
        &self,
        value: &Option<String>,
        data: &'d mut WireData,
        defaults: bool,
    ) -> &'d mut WireData {
        NullableValuePutter::<String>::new(self.key).put(value, data, defaults)
    }
}

/// Writes a string unconditionally.
#[derive(Clone, Copy, Debug)]
pub struct ForceStringPutter {
    key: &'static str,
}

impl ForceStringPutter {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldPutter for ForceStringPutter {
    type Value = str;

    fn put<'d>(&self, value: &str, data: &'d mut WireData, _defaults: bool) -> &'d mut WireData {
        data.insert(self.key.to_owned(), Value::String(value.to_owned()));
        data
    }
}

// ---------------------------------------------------------------------------
// Entity IDs
// ---------------------------------------------------------------------------

/// Writes a snowflake unconditionally; [`Id::NONE`] is written as `null`.
#[derive(Clone, Copy, Debug)]
pub struct EntityIdPutter<M> {
    key: &'static str,
    phantom: PhantomData<fn(M)>,
}

impl<M> EntityIdPutter<M> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<M> FieldPutter for EntityIdPutter<M> {
    type Value = Id<M>;

    fn put<'d>(&self, value: &Id<M>, data: &'d mut WireData, _defaults: bool) -> &'d mut WireData {
        data.insert(self.key.to_owned(), id_to_wire(*value));
        data
    }
}

/// Writes a snowflake; [`Id::NONE`] is left out unless `defaults` is set.
#[derive(Clone, Copy, Debug)]
pub struct EntityIdOptionalPutter<M> {
    key: &'static str,
    phantom: PhantomData<fn(M)>,
}

impl<M> EntityIdOptionalPutter<M> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<M> FieldPutter for EntityIdOptionalPutter<M> {
    type Value = Id<M>;

    fn put<'d>(&self, value: &Id<M>, data: &'d mut WireData, defaults: bool) -> &'d mut WireData {
        if should_put(value.is_none(), defaults) {
            data.insert(self.key.to_owned(), id_to_wire(*value));
        }
        data
    }
}

/// Writes snowflakes as a list of strings, `None` as `[]`.
#[derive(Clone, Copy, Debug)]
pub struct EntityIdArrayPutter<M> {
    key: &'static str,
    phantom: PhantomData<fn(M)>,
}

impl<M> EntityIdArrayPutter<M> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<M> FieldPutter for EntityIdArrayPutter<M> {
    type Value = Option<Vec<Id<M>>>;

    fn put<'d>(
        &self,
        value: &Option<Vec<Id<M>>>,
        data: &'d mut WireData,
        _defaults: bool,
    ) -> &'d mut WireData {
        data.insert(self.key.to_owned(), ids_to_wire(value.as_ref()));
        data
    }
}

/// Writes snowflakes as a list of strings; `None` is left out unless
/// `defaults` is set.
#[derive(Clone, Copy, Debug)]
pub struct EntityIdArrayOptionalPutter<M> {
    key: &'static str,
    phantom: PhantomData<fn(M)>,
}

impl<M> EntityIdArrayOptionalPutter<M> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<M> FieldPutter for EntityIdArrayOptionalPutter<M> {
    type Value = Option<Vec<Id<M>>>;

    fn put<'d>(
        &self,
        value: &Option<Vec<Id<M>>>,
        data: &'d mut WireData,
        defaults: bool,
    ) -> &'d mut WireData {
        if should_put(value.is_none(), defaults) {
            data.insert(self.key.to_owned(), ids_to_wire(value.as_ref()));
        }
        data
    }
}

// ---------------------------------------------------------------------------
// Preinstanced enums and flags
// ---------------------------------------------------------------------------

/// Writes a preinstanced member's value unless it equals `default`.
#[derive(Clone, Debug)]
pub struct PreinstancedPutter<P> {
    key: &'static str,
    default: P,
}

impl<P> PreinstancedPutter<P> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str, default: P) -> Self {
        Self { key, default }
    }
}

impl<P: Preinstanced> FieldPutter for PreinstancedPutter<P> {
    type Value = P;

    fn put<'d>(&self, value: &P, data: &'d mut WireData, defaults: bool) -> &'d mut WireData {
        if should_put(*value == self.default, defaults) {
            data.insert(self.key.to_owned(), value.value().to_wire());
        }
        data
    }
}

/// Writes preinstanced members as a list of values, `None` as `[]`.
#[derive(Clone, Copy, Debug)]
pub struct PreinstancedArrayPutter<P> {
    key: &'static str,
    phantom: PhantomData<fn(P)>,
}

impl<P> PreinstancedArrayPutter<P> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<P: Preinstanced> FieldPutter for PreinstancedArrayPutter<P> {
    type Value = Option<Vec<P>>;

    fn put<'d>(
        &self,
        value: &Option<Vec<P>>,
        data: &'d mut WireData,
        _defaults: bool,
    ) -> &'d mut WireData {
        let values = value
            .iter()
            .flatten()
            .map(|member| member.value().to_wire())
            .collect();
        data.insert(self.key.to_owned(), Value::Array(values));
        data
    }
}

/// Writes a flag value's bits unless it equals `default`.
#[derive(Clone, Copy, Debug)]
pub struct FlagPutter<F> {
    key: &'static str,
    default: F,
}

impl<F> FlagPutter<F> {
    /// Create a putter for `key`; `default` is usually `F::empty()`.
    pub const fn new(key: &'static str, default: F) -> Self {
        Self { key, default }
    }
}

impl<F: Flags<Bits = u64> + PartialEq> FieldPutter for FlagPutter<F> {
    type Value = F;

    fn put<'d>(&self, value: &F, data: &'d mut WireData, defaults: bool) -> &'d mut WireData {
        if should_put(*value == self.default, defaults) {
            data.insert(self.key.to_owned(), Value::from(value.bits()));
        }
        data
    }
}

// ---------------------------------------------------------------------------
// Date-times
// ---------------------------------------------------------------------------

/// Writes a date-time as ISO 8601 unconditionally, `None` as `null`.
#[derive(Clone, Copy, Debug)]
pub struct NullableDateTimePutter {
    key: &'static str,
}

impl NullableDateTimePutter {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldPutter for NullableDateTimePutter {
    type Value = Option<DateTime<Utc>>;

    fn put<'d>(
        &self,
        value: &Option<DateTime<Utc>>,
        data: &'d mut WireData,
        _defaults: bool,
    ) -> &'d mut WireData {
        let wire = value
            .as_ref()
            .map_or(Value::Null, |value| Value::String(datetime_to_timestamp(value)));
        data.insert(self.key.to_owned(), wire);
        data
    }
}

/// Writes a date-time as ISO 8601; `None` is left out unless `defaults` is
/// set.
#[derive(Clone, Copy, Debug)]
pub struct NullableDateTimeOptionalPutter {
    key: &'static str,
}

impl NullableDateTimeOptionalPutter {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldPutter for NullableDateTimeOptionalPutter {
    type Value = Option<DateTime<Utc>>;

    fn put<'d>(
        &self,
        value: &Option<DateTime<Utc>>,
        data: &'d mut WireData,
        defaults: bool,
    ) -> &'d mut WireData {
        if should_put(value.is_none(), defaults) {
            NullableDateTimePutter::new(self.key).put(value, data, defaults);
        }
        data
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Writes a nested entity unconditionally, `None` as `null`.
#[derive(Clone, Copy, Debug)]
pub struct NullableEntityPutter<E> {
    key: &'static str,
    mode: InternalsMode,
    phantom: PhantomData<fn(E)>,
}

impl<E: Entity> NullableEntityPutter<E> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            mode: InternalsMode::of(E::INCLUDES_INTERNALS, false),
            phantom: PhantomData,
        }
    }

    /// Always serialize the nested entity with its internals.
    pub const fn force_include_internals(self) -> Self {
        Self {
            key: self.key,
            mode: InternalsMode::of(E::INCLUDES_INTERNALS, true),
            phantom: PhantomData,
        }
    }

    /// How `include_internals` is forwarded.
    pub const fn mode(&self) -> InternalsMode {
        self.mode
    }
}

impl<E: Entity> FieldPutter for NullableEntityPutter<E> {
    type Value = Option<E>;

    fn put<'d>(
        &self,
        value: &Option<E>,
        data: &'d mut WireData,
        defaults: bool,
    ) -> &'d mut WireData {
        self.put_with_internals(value, data, defaults, false)
    }

    fn put_with_internals<'d>(
        &self,
        value: &Option<E>,
        data: &'d mut WireData,
        defaults: bool,
        include_internals: bool,
    ) -> &'d mut WireData {
        let include_internals = self.mode.resolve(include_internals);
        let wire = value.as_ref().map_or(Value::Null, |entity| {
            Value::Object(entity.to_data_with(defaults, include_internals))
        });
        data.insert(self.key.to_owned(), wire);
        data
    }
}

/// Writes a nested entity unless it equals the field default.
#[derive(Clone, Debug)]
pub struct DefaultEntityPutter<E> {
    key: &'static str,
    default: EntityDefault<E>,
    mode: InternalsMode,
}

impl<E: Entity> DefaultEntityPutter<E> {
    /// Create a putter for `key` whose default is `default`.
    pub const fn new(key: &'static str, default: E) -> Self {
        Self {
            key,
            default: EntityDefault::Value(default),
            mode: InternalsMode::of(E::INCLUDES_INTERNALS, false),
        }
    }

    /// Create a putter for `key` whose default is a fresh `factory()`.
    pub const fn with_factory(key: &'static str, factory: fn() -> E) -> Self {
        Self {
            key,
            default: EntityDefault::Factory(factory),
            mode: InternalsMode::of(E::INCLUDES_INTERNALS, false),
        }
    }

    /// Always serialize the nested entity with its internals.
    pub fn force_include_internals(mut self) -> Self {
        self.mode = InternalsMode::of(E::INCLUDES_INTERNALS, true);
        self
    }

    /// How `include_internals` is forwarded.
    pub const fn mode(&self) -> InternalsMode {
        self.mode
    }
}

impl<E: Entity + Clone + PartialEq> FieldPutter for DefaultEntityPutter<E> {
    type Value = E;

    fn put<'d>(&self, value: &E, data: &'d mut WireData, defaults: bool) -> &'d mut WireData {
        self.put_with_internals(value, data, defaults, false)
    }

    fn put_with_internals<'d>(
        &self,
        value: &E,
        data: &'d mut WireData,
        defaults: bool,
        include_internals: bool,
    ) -> &'d mut WireData {
        if should_put(self.default.is_default(value), defaults) {
            let include_internals = self.mode.resolve(include_internals);
            data.insert(
                self.key.to_owned(),
                Value::Object(value.to_data_with(defaults, include_internals)),
            );
        }
        data
    }
}

/// Writes nested entities as a list, `None` as `[]`.
#[derive(Clone, Copy, Debug)]
pub struct NullableEntityArrayPutter<E> {
    key: &'static str,
    mode: InternalsMode,
    phantom: PhantomData<fn(E)>,
}

impl<E: Entity> NullableEntityArrayPutter<E> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            mode: InternalsMode::of(E::INCLUDES_INTERNALS, false),
            phantom: PhantomData,
        }
    }

    /// Always serialize the nested entities with their internals.
    pub const fn force_include_internals(self) -> Self {
        Self {
            key: self.key,
            mode: InternalsMode::of(E::INCLUDES_INTERNALS, true),
            phantom: PhantomData,
        }
    }

    /// How `include_internals` is forwarded.
    pub const fn mode(&self) -> InternalsMode {
        self.mode
    }
}

impl<E: Entity> FieldPutter for NullableEntityArrayPutter<E> {
    type Value = Option<Vec<E>>;

    fn put<'d>(
        &self,
        value: &Option<Vec<E>>,
        data: &'d mut WireData,
        defaults: bool,
    ) -> &'d mut WireData {
        self.put_with_internals(value, data, defaults, false)
    }

    fn put_with_internals<'d>(
        &self,
        value: &Option<Vec<E>>,
        data: &'d mut WireData,
        defaults: bool,
        include_internals: bool,
    ) -> &'d mut WireData {
        let include_internals = self.mode.resolve(include_internals);
        let entities = value
            .iter()
            .flatten()
            .map(|entity| Value::Object(entity.to_data_with(defaults, include_internals)))
            .collect();
        data.insert(self.key.to_owned(), Value::Array(entities));
        data
    }
}

/// Writes a nested entity through a deferred codec, `None` as `null`.
///
/// The internals mode is picked from the codec once it resolves.
/// [`FieldPutter::put`] can't report an unresolved codec and skips the key
/// with a warning; use [`try_put`](Self::try_put) to observe it.
#[derive(Clone, Debug)]
pub struct DeferredEntityPutter<E> {
    key: &'static str,
    codec: Deferred<Arc<dyn EntityCodec<E>>>,
    force_internals: bool,
}

impl<E> DeferredEntityPutter<E> {
    /// Create a putter for `key`.
    pub fn new(key: &'static str, codec: Deferred<Arc<dyn EntityCodec<E>>>) -> Self {
        Self {
            key,
            codec,
            force_internals: false,
        }
    }

    /// Always serialize the nested entity with its internals.
    pub fn force_include_internals(mut self) -> Self {
        self.force_internals = true;
        self
    }

    /// How `include_internals` is forwarded.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Unresolved`] if the codec isn't declared yet.
    pub fn mode(&self) -> Result<InternalsMode, ResolveError> {
        let codec = self.codec.get()?;
        Ok(InternalsMode::of(
            codec.includes_internals(),
            self.force_internals,
        ))
    }

    /// Write `value`, failing if the codec isn't declared yet.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Unresolved`] if the codec isn't declared yet.
    pub fn try_put<'d>(
        &self,
        value: &Option<E>,
        data: &'d mut WireData,
        defaults: bool,
        include_internals: bool,
    ) -> Result<&'d mut WireData, ResolveError> {
        let codec = self.codec.get()?;
        self.write(codec.as_ref(), value, data, defaults, include_internals);
        Ok(data)
    }

    fn write(
        &self,
        codec: &dyn EntityCodec<E>,
        value: &Option<E>,
        data: &mut WireData,
        defaults: bool,
        include_internals: bool,
    ) {
        let include_internals = InternalsMode::of(codec.includes_internals(), self.force_internals)
            .resolve(include_internals);

        let wire = value.as_ref().map_or(Value::Null, |entity| {
            Value::Object(codec.to_data_with(entity, defaults, include_internals))
        });
        data.insert(self.key.to_owned(), wire);
    }
}

impl<E> FieldPutter for DeferredEntityPutter<E> {
    type Value = Option<E>;

    fn put<'d>(
        &self,
        value: &Option<E>,
        data: &'d mut WireData,
        defaults: bool,
    ) -> &'d mut WireData {
        self.put_with_internals(value, data, defaults, false)
    }

    fn put_with_internals<'d>(
        &self,
        value: &Option<E>,
        data: &'d mut WireData,
        defaults: bool,
        include_internals: bool,
    ) -> &'d mut WireData {
        match self.codec.get() {
            Ok(codec) => self.write(codec.as_ref(), value, data, defaults, include_internals),
            Err(error) => warn!(key = self.key, %error, "skipping field with unresolved codec"),
        }
        data
    }
}

// ---------------------------------------------------------------------------
// Functional
// ---------------------------------------------------------------------------

/// Writes `function(value)` unconditionally.
#[derive(Clone, Copy, Debug)]
pub struct FunctionalPutter<T> {
    key: &'static str,
    function: fn(&T) -> Value,
}

impl<T> FunctionalPutter<T> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str, function: fn(&T) -> Value) -> Self {
        Self { key, function }
    }
}

impl<T> FieldPutter for FunctionalPutter<T> {
    type Value = T;

    fn put<'d>(&self, value: &T, data: &'d mut WireData, _defaults: bool) -> &'d mut WireData {
        data.insert(self.key.to_owned(), (self.function)(value));
        data
    }
}

/// Writes `function(value)` unless `value` equals `default`.
#[derive(Clone, Copy, Debug)]
pub struct FunctionalOptionalPutter<T> {
    key: &'static str,
    default: T,
    function: fn(&T) -> Value,
}

impl<T> FunctionalOptionalPutter<T> {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str, default: T, function: fn(&T) -> Value) -> Self {
        Self {
            key,
            default,
            function,
        }
    }
}

impl<T: PartialEq> FieldPutter for FunctionalOptionalPutter<T> {
    type Value = T;

    fn put<'d>(&self, value: &T, data: &'d mut WireData, defaults: bool) -> &'d mut WireData {
        if should_put(*value == self.default, defaults) {
            data.insert(self.key.to_owned(), (self.function)(value));
        }
        data
    }
}
