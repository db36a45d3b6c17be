//! The field-conversion framework.
//!
//! Every entity field is described by up to three small, immutable
//! descriptors, each declared once as a `const` item next to the entity:
//!
//! - a [`FieldParser`] reads the field out of a wire map (wire → value),
//! - a [`FieldPutter`] writes it back (value → wire),
//! - a [`FieldValidator`] turns caller input into the canonical value.
//!
//! ```
//! use discord_fields::fields::{
//!     parsers::EntityIdParser, putters::EntityIdPutter, FieldParser, FieldPutter, WireData,
//! };
//! use discord_fields::types::id::{marker::UserMarker, Id};
//! use serde_json::json;
//!
//! const PARSE_ID: EntityIdParser<UserMarker> = EntityIdParser::new("id");
//! const PUT_ID_INTO: EntityIdPutter<UserMarker> = EntityIdPutter::new("id");
//!
//! let data: WireData = serde_json::from_value(json!({"id": "202304110031"})).unwrap();
//! let id = PARSE_ID.parse(&data);
//! assert_eq!(id, Id::new(202304110031));
//!
//! let mut out = WireData::new();
//! PUT_ID_INTO.put(&id, &mut out, false);
//! assert_eq!(out, data);
//! ```
//!
//! Parsers and putters never fail: inbound data is trusted on a best-effort
//! basis and malformed values fall back to the field default. Validators are
//! strict and return a [`ValidationError`].

pub mod deferred;
pub mod entity;
pub mod error;
pub mod input;
pub mod parsers;
pub mod putters;
pub mod validators;

mod primitive;

pub use self::{
    deferred::{Deferred, Registry},
    entity::{Entity, EntityCodec, EntityType, Identified, InternalsMode},
    error::{ResolveError, ValidationError},
    input::Input,
    primitive::WirePrimitive,
};

use serde_json::{Map, Value};

/// A wire-format JSON object, as sent and received by Discord.
pub type WireData = Map<String, Value>;

/// Reads one field out of a wire map.
pub trait FieldParser {
    /// The in-memory value produced.
    type Output;

    /// Extract and normalize the field.
    fn parse(&self, data: &WireData) -> Self::Output;
}

/// Writes one field into a wire map.
pub trait FieldPutter {
    /// The in-memory value consumed.
    type Value: ?Sized;

    /// Write `value` into `data`, returning `data` for chaining.
    ///
    /// With `defaults` set, fields equal to their default are written too,
    /// producing a complete payload instead of a minimal one.
    fn put<'d>(&self, value: &Self::Value, data: &'d mut WireData, defaults: bool)
        -> &'d mut WireData;

    /// Like [`put`](Self::put), also forwarding `include_internals` to nested
    /// entities. Putters that don't write entities ignore the flag.
    fn put_with_internals<'d>(
        &self,
        value: &Self::Value,
        data: &'d mut WireData,
        defaults: bool,
        include_internals: bool,
    ) -> &'d mut WireData {
        let _ = include_internals;
        self.put(value, data, defaults)
    }
}

/// Converts caller input into a canonical in-memory value.
pub trait FieldValidator {
    /// The canonical value produced.
    type Output;

    /// Validate and normalize `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Type`] if the input has the wrong type and
    /// [`ValidationError::Value`] if it is of the right type but out of
    /// range, too long or malformed.
    fn validate(&self, value: Input) -> Result<Self::Output, ValidationError>;
}

/// Whether a putter with a default should write `is_default` values.
pub(crate) const fn should_put(is_default: bool, defaults: bool) -> bool {
    defaults || !is_default
}
