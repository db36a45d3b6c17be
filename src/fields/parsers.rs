//! Field parsers: wire → value.
//!
//! Each parser is total. A missing key or JSON `null` yields the documented
//! absent value, and so does a value of the wrong JSON type, which is logged
//! at `debug` level since Discord occasionally changes field types.

use bitflags::Flags;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{marker::PhantomData, sync::Arc};
use tracing::{debug, warn};

use super::{Deferred, Entity, EntityCodec, FieldParser, ResolveError, WireData, WirePrimitive};
use crate::types::{
    id::Id,
    preinstanced::{Preinstanced, PreinstancedValue},
    util::datetime::timestamp_to_datetime,
};

/// The raw value of `key`, treating JSON `null` like a missing key.
pub(crate) fn raw<'d>(data: &'d WireData, key: &str) -> Option<&'d Value> {
    data.get(key).filter(|value| !value.is_null())
}

/// Read a snowflake from its string (or, leniently, integer) form.
pub(crate) fn snowflake_from_wire(key: &str, value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::String(raw) => raw.parse().ok(),
        Value::Number(number) => number.as_u64(),
        _ => None,
    };

    if parsed.is_none() {
        warn!(key, %value, "malformed snowflake");
    }

    parsed
}

fn unexpected(key: &str, value: &Value) {
    debug!(key, %value, "unexpected wire type, using default");
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Parses a scalar, passing it through unchanged. Absent → `default`.
#[derive(Clone, Debug)]
pub struct ValueParser<T> {
    key: &'static str,
    default: T,
}

impl<T> ValueParser<T> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str, default: T) -> Self {
        Self { key, default }
    }
}

impl<T: WirePrimitive + Clone> FieldParser for ValueParser<T> {
    type Output = T;

    fn parse(&self, data: &WireData) -> T {
        match raw(data, self.key) {
            None => self.default.clone(),
            Some(value) => T::from_wire(value).unwrap_or_else(|| {
                unexpected(self.key, value);
                self.default.clone()
            }),
        }
    }
}

/// Parses a boolean.
pub type BoolParser = ValueParser<bool>;

/// Parses an integer.
pub type IntParser = ValueParser<i64>;

/// Parses a float.
pub type FloatParser = ValueParser<f64>;

/// Parses a scalar that may be absent.
#[derive(Clone, Debug)]
pub struct NullableValueParser<T> {
    key: &'static str,
    phantom: PhantomData<fn() -> T>,
}

impl<T> NullableValueParser<T> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<T: WirePrimitive> FieldParser for NullableValueParser<T> {
    type Output = Option<T>;

    fn parse(&self, data: &WireData) -> Option<T> {
        let value = raw(data, self.key)?;
        let parsed = T::from_wire(value);
        if parsed.is_none() {
            unexpected(self.key, value);
        }
        parsed
    }
}

/// Parses a string that collapses to `None` when absent or empty.
#[derive(Clone, Copy, Debug)]
pub struct NullableStringParser {
    key: &'static str,
}

impl NullableStringParser {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldParser for NullableStringParser {
    type Output = Option<String>;

    fn parse(&self, data: &WireData) -> Option<String> {
        match raw(data, self.key)? {
            Value::String(value) if value.is_empty() => None,
            Value::String(value) => Some(value.clone()),
            other => {
                unexpected(self.key, other);
                None
            }
        }
    }
}

/// Parses a string that is always present, `""` when absent.
#[derive(Clone, Copy, Debug)]
pub struct ForceStringParser {
    key: &'static str,
}

impl ForceStringParser {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldParser for ForceStringParser {
    type Output = String;

    fn parse(&self, data: &WireData) -> String {
        NullableStringParser::new(self.key)
            .parse(data)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Entity IDs
// ---------------------------------------------------------------------------

/// Parses a snowflake. Absent → [`Id::NONE`].
#[derive(Clone, Copy, Debug)]
pub struct EntityIdParser<M> {
    key: &'static str,
    phantom: PhantomData<fn() -> M>,
}

impl<M> EntityIdParser<M> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<M> FieldParser for EntityIdParser<M> {
    type Output = Id<M>;

    fn parse(&self, data: &WireData) -> Id<M> {
        raw(data, self.key)
            .and_then(|value| snowflake_from_wire(self.key, value))
            .map_or(Id::NONE, Id::new)
    }
}

/// Parses an array of snowflakes into an ascending `Vec`.
///
/// Absent or empty → `None`.
#[derive(Clone, Copy, Debug)]
pub struct EntityIdArrayParser<M> {
    key: &'static str,
    phantom: PhantomData<fn() -> M>,
}

impl<M> EntityIdArrayParser<M> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<M> FieldParser for EntityIdArrayParser<M> {
    type Output = Option<Vec<Id<M>>>;

    fn parse(&self, data: &WireData) -> Option<Vec<Id<M>>> {
        let Some(Value::Array(values)) = raw(data, self.key) else {
            return None;
        };

        let mut ids: Vec<Id<M>> = values
            .iter()
            .filter_map(|value| snowflake_from_wire(self.key, value))
            .map(Id::new)
            .collect();

        if ids.is_empty() {
            return None;
        }

        ids.sort_unstable();
        Some(ids)
    }
}

// ---------------------------------------------------------------------------
// Preinstanced enums and flags
// ---------------------------------------------------------------------------

/// Parses a preinstanced enum member. Absent → `default`.
///
/// Lookup goes through [`Preinstanced::get`], so unknown values become the
/// `Unknown` member rather than falling back.
#[derive(Clone, Debug)]
pub struct PreinstancedParser<P> {
    key: &'static str,
    default: P,
}

impl<P> PreinstancedParser<P> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str, default: P) -> Self {
        Self { key, default }
    }
}

impl<P: Preinstanced> FieldParser for PreinstancedParser<P> {
    type Output = P;

    fn parse(&self, data: &WireData) -> P {
        match raw(data, self.key) {
            None => self.default.clone(),
            Some(value) => match P::Value::from_wire(value) {
                Some(raw) => P::get(raw),
                None => {
                    unexpected(self.key, value);
                    self.default.clone()
                }
            },
        }
    }
}

/// Parses an array of preinstanced members into a sorted `Vec`.
///
/// Absent or empty → `None`.
#[derive(Clone, Copy, Debug)]
pub struct PreinstancedArrayParser<P> {
    key: &'static str,
    phantom: PhantomData<fn() -> P>,
}

impl<P> PreinstancedArrayParser<P> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<P: Preinstanced> FieldParser for PreinstancedArrayParser<P> {
    type Output = Option<Vec<P>>;

    fn parse(&self, data: &WireData) -> Option<Vec<P>> {
        let Some(Value::Array(values)) = raw(data, self.key) else {
            return None;
        };

        let mut members: Vec<P> = values
            .iter()
            .filter_map(P::Value::from_wire)
            .map(P::get)
            .collect();

        if members.is_empty() {
            return None;
        }

        members.sort();
        Some(members)
    }
}

/// Parses a bitmask into a flag type. Absent → `default`.
#[derive(Clone, Copy, Debug)]
pub struct FlagParser<F> {
    key: &'static str,
    default: F,
}

impl<F> FlagParser<F> {
    /// Create a parser for `key`; `default` is usually `F::empty()`.
    pub const fn new(key: &'static str, default: F) -> Self {
        Self { key, default }
    }
}

impl<F: Flags<Bits = u64> + Clone> FieldParser for FlagParser<F> {
    type Output = F;

    fn parse(&self, data: &WireData) -> F {
        match raw(data, self.key) {
            None => self.default.clone(),
            Some(value) => match value.as_u64() {
                Some(bits) => F::from_bits_retain(bits),
                None => {
                    unexpected(self.key, value);
                    self.default.clone()
                }
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Date-times
// ---------------------------------------------------------------------------

/// Parses an ISO 8601 string or unix seconds. Absent or malformed → `None`.
#[derive(Clone, Copy, Debug)]
pub struct NullableDateTimeParser {
    key: &'static str,
}

impl NullableDateTimeParser {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldParser for NullableDateTimeParser {
    type Output = Option<DateTime<Utc>>;

    fn parse(&self, data: &WireData) -> Option<DateTime<Utc>> {
        let value = raw(data, self.key)?;
        let parsed = timestamp_to_datetime(value);
        if parsed.is_none() {
            unexpected(self.key, value);
        }
        parsed
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Default of an entity field: a value, or a function producing a fresh one.
#[derive(Clone, Debug)]
pub enum EntityDefault<E> {
    /// Clone this value.
    Value(E),
    /// Call this function.
    Factory(fn() -> E),
}

impl<E: Clone> EntityDefault<E> {
    /// Produce the default.
    pub fn get(&self) -> E {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }
}

impl<E: Clone + PartialEq> EntityDefault<E> {
    /// Whether `value` equals the default.
    pub fn is_default(&self, value: &E) -> bool {
        match self {
            Self::Value(default) => default == value,
            Self::Factory(factory) => &factory() == value,
        }
    }
}

/// Parses a nested entity. Absent → `None`.
#[derive(Clone, Copy, Debug)]
pub struct NullableEntityParser<E> {
    key: &'static str,
    phantom: PhantomData<fn() -> E>,
}

impl<E> NullableEntityParser<E> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<E: Entity> FieldParser for NullableEntityParser<E> {
    type Output = Option<E>;

    fn parse(&self, data: &WireData) -> Option<E> {
        match raw(data, self.key)? {
            Value::Object(nested) => Some(E::from_data(nested)),
            other => {
                unexpected(self.key, other);
                None
            }
        }
    }
}

/// Parses a nested entity that always has a value.
#[derive(Clone, Debug)]
pub struct DefaultEntityParser<E> {
    key: &'static str,
    default: EntityDefault<E>,
}

impl<E> DefaultEntityParser<E> {
    /// Create a parser for `key` falling back to a clone of `default`.
    pub const fn new(key: &'static str, default: E) -> Self {
        Self {
            key,
            default: EntityDefault::Value(default),
        }
    }

    /// Create a parser for `key` falling back to a fresh `factory()`.
    pub const fn with_factory(key: &'static str, factory: fn() -> E) -> Self {
        Self {
            key,
            default: EntityDefault::Factory(factory),
        }
    }
}

impl<E: Entity + Clone> FieldParser for DefaultEntityParser<E> {
    type Output = E;

    fn parse(&self, data: &WireData) -> E {
        match raw(data, self.key) {
            Some(Value::Object(nested)) => E::from_data(nested),
            Some(other) => {
                unexpected(self.key, other);
                self.default.get()
            }
            None => self.default.get(),
        }
    }
}

/// Parses an array of nested entities into a sorted `Vec`.
///
/// Absent or empty → `None`.
#[derive(Clone, Copy, Debug)]
pub struct NullableEntityArrayParser<E> {
    key: &'static str,
    phantom: PhantomData<fn() -> E>,
}

impl<E> NullableEntityArrayParser<E> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            phantom: PhantomData,
        }
    }
}

impl<E: Entity + Ord> FieldParser for NullableEntityArrayParser<E> {
    type Output = Option<Vec<E>>;

    fn parse(&self, data: &WireData) -> Option<Vec<E>> {
        let Some(Value::Array(values)) = raw(data, self.key) else {
            return None;
        };

        let mut entities: Vec<E> = values
            .iter()
            .filter_map(|value| match value {
                Value::Object(nested) => Some(E::from_data(nested)),
                other => {
                    unexpected(self.key, other);
                    None
                }
            })
            .collect();

        if entities.is_empty() {
            return None;
        }

        entities.sort();
        Some(entities)
    }
}

/// Parses a nested entity through a deferred codec.
///
/// Absent → `Ok(None)`; used before the codec is declared →
/// [`ResolveError::Unresolved`].
#[derive(Clone, Debug)]
pub struct DeferredEntityParser<E> {
    key: &'static str,
    codec: Deferred<Arc<dyn EntityCodec<E>>>,
}

impl<E> DeferredEntityParser<E> {
    /// Create a parser for `key`.
    pub fn new(key: &'static str, codec: Deferred<Arc<dyn EntityCodec<E>>>) -> Self {
        Self { key, codec }
    }
}

impl<E> FieldParser for DeferredEntityParser<E> {
    type Output = Result<Option<E>, ResolveError>;

    fn parse(&self, data: &WireData) -> Result<Option<E>, ResolveError> {
        let codec = self.codec.get()?;

        Ok(match raw(data, self.key) {
            Some(Value::Object(nested)) => Some(codec.from_data(nested)),
            Some(other) => {
                unexpected(self.key, other);
                None
            }
            None => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Functional
// ---------------------------------------------------------------------------

/// Applies `function` to the raw value, which is `None` when absent.
#[derive(Clone, Copy, Debug)]
pub struct FunctionalParser<T> {
    key: &'static str,
    function: fn(Option<&Value>) -> T,
}

impl<T> FunctionalParser<T> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str, function: fn(Option<&Value>) -> T) -> Self {
        Self { key, function }
    }
}

impl<T> FieldParser for FunctionalParser<T> {
    type Output = T;

    fn parse(&self, data: &WireData) -> T {
        (self.function)(raw(data, self.key))
    }
}

/// Applies `function` to the raw value, skipping the call when absent.
#[derive(Clone, Copy, Debug)]
pub struct NullableFunctionalParser<T> {
    key: &'static str,
    function: fn(&Value) -> T,
}

impl<T> NullableFunctionalParser<T> {
    /// Create a parser for `key`.
    pub const fn new(key: &'static str, function: fn(&Value) -> T) -> Self {
        Self { key, function }
    }
}

impl<T> FieldParser for NullableFunctionalParser<T> {
    type Output = Option<T>;

    fn parse(&self, data: &WireData) -> Option<T> {
        raw(data, self.key).map(self.function)
    }
}
