//! Field validators: caller input → canonical value.
//!
//! Unlike parsers, validators are strict. Input of the wrong kind is a
//! [`ValidationError::Type`], input of the right kind with an unacceptable
//! value is a [`ValidationError::Value`]. Empty input (null, `""`, `[]`)
//! collapses to the field's absent value wherever the field has one.

use bitflags::Flags;
use chrono::{DateTime, Utc};
use std::{
    collections::{BTreeSet, HashSet},
    marker::PhantomData,
};

use super::{input::EntityRef, FieldValidator, Input, ValidationError};
use crate::types::{
    id::Id,
    preinstanced::{Preinstanced, PreinstancedValue, RawValueError},
    util::{datetime::TimestampParseError, is_url, maybe_snowflake, Timestamp},
};

const EXPECTED_BOOL: &str = "`bool`";
const EXPECTED_INT: &str = "`int`";
const EXPECTED_FLOAT: &str = "`float` or `int`";
const EXPECTED_STR: &str = "`str`";
const EXPECTED_ID: &str = "an entity, `int` or digit `str`";
const EXPECTED_DATETIME: &str = "a date-time, ISO 8601 `str` or unix seconds";

/// Replace the first `{}` of `message` with `value`.
fn interpolate(message: &str, value: impl ToString) -> String {
    message.replacen("{}", &value.to_string(), 1)
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length < min || length > max {
        return Err(ValidationError::value_error(
            field,
            format!("length must be in range [{min}:{max}], got {length}; {value:?}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Accepts a boolean; null becomes `default`.
#[derive(Clone, Copy, Debug)]
pub struct BoolValidator {
    field: &'static str,
    default: bool,
}

impl BoolValidator {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str, default: bool) -> Self {
        Self { field, default }
    }
}

impl FieldValidator for BoolValidator {
    type Output = bool;

    fn validate(&self, value: Input) -> Result<bool, ValidationError> {
        match value {
            Input::Null => Ok(self.default),
            Input::Bool(value) => Ok(value),
            other => Err(ValidationError::type_error(self.field, EXPECTED_BOOL, &other)),
        }
    }
}

/// Accepts an integer passing `check`; null becomes `default`.
///
/// `message` is reported on failure, with its first `{}` replaced by the
/// rejected value.
#[derive(Clone, Copy, Debug)]
pub struct IntConditionalValidator<T> {
    field: &'static str,
    default: T,
    check: fn(i128) -> bool,
    message: &'static str,
}

impl<T> IntConditionalValidator<T> {
    /// Create a validator for `field`.
    pub const fn new(
        field: &'static str,
        default: T,
        check: fn(i128) -> bool,
        message: &'static str,
    ) -> Self {
        Self {
            field,
            default,
            check,
            message,
        }
    }
}

impl<T: TryFrom<i128> + Copy> FieldValidator for IntConditionalValidator<T> {
    type Output = T;

    fn validate(&self, value: Input) -> Result<T, ValidationError> {
        let value = match value {
            Input::Null => return Ok(self.default),
            Input::Int(value) => value,
            other => return Err(ValidationError::type_error(self.field, EXPECTED_INT, &other)),
        };

        if !(self.check)(value) {
            return Err(ValidationError::value_error(
                self.field,
                interpolate(self.message, value),
            ));
        }

        T::try_from(value).map_err(|_| {
            ValidationError::value_error(self.field, format!("is out of range, got {value}"))
        })
    }
}

/// Accepts a number passing `check`; null becomes `default`.
#[derive(Clone, Copy, Debug)]
pub struct FloatConditionalValidator {
    field: &'static str,
    default: f64,
    check: fn(f64) -> bool,
    message: &'static str,
}

impl FloatConditionalValidator {
    /// Create a validator for `field`.
    pub const fn new(
        field: &'static str,
        default: f64,
        check: fn(f64) -> bool,
        message: &'static str,
    ) -> Self {
        Self {
            field,
            default,
            check,
            message,
        }
    }
}

impl FieldValidator for FloatConditionalValidator {
    type Output = f64;

    fn validate(&self, value: Input) -> Result<f64, ValidationError> {
        #[allow(clippy::cast_precision_loss)]
        let value = match value {
            Input::Null => return Ok(self.default),
            Input::Float(value) => value,
            Input::Int(value) => value as f64,
            other => return Err(ValidationError::type_error(self.field, EXPECTED_FLOAT, &other)),
        };

        if !(self.check)(value) {
            return Err(ValidationError::value_error(
                self.field,
                interpolate(self.message, value),
            ));
        }

        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Accepts anything displayable as a string within `min..=max` characters.
/// Null becomes `""`.
#[derive(Clone, Copy, Debug)]
pub struct ForceStringValidator {
    field: &'static str,
    min: usize,
    max: usize,
}

impl ForceStringValidator {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str, min: usize, max: usize) -> Self {
        Self { field, min, max }
    }
}

impl FieldValidator for ForceStringValidator {
    type Output = String;

    fn validate(&self, value: Input) -> Result<String, ValidationError> {
        let value = match value {
            Input::Null => return Ok(String::new()),
            Input::Str(value) => value,
            other => other.to_string(),
        };

        check_length(self.field, &value, self.min, self.max)?;
        Ok(value)
    }
}

/// Accepts a string within `min..=max` characters. Null and `""` become
/// `None`.
#[derive(Clone, Copy, Debug)]
pub struct NullableStringValidator {
    field: &'static str,
    min: usize,
    max: usize,
}

impl NullableStringValidator {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str, min: usize, max: usize) -> Self {
        Self { field, min, max }
    }
}

impl FieldValidator for NullableStringValidator {
    type Output = Option<String>;

    fn validate(&self, value: Input) -> Result<Option<String>, ValidationError> {
        match value {
            Input::Null => Ok(None),
            Input::Str(value) if value.is_empty() => Ok(None),
            Input::Str(value) => {
                check_length(self.field, &value, self.min, self.max)?;
                Ok(Some(value))
            }
            other => Err(ValidationError::type_error(self.field, EXPECTED_STR, &other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Entity IDs
// ---------------------------------------------------------------------------

/// Accepts a snowflake, or an entity of kind `kind` standing in for its ID.
/// Null becomes [`Id::NONE`].
#[derive(Clone, Copy, Debug)]
pub struct EntityIdValidator<M> {
    field: &'static str,
    kind: Option<&'static str>,
    phantom: PhantomData<fn() -> M>,
}

impl<M> EntityIdValidator<M> {
    /// Create a validator for `field` accepting entities of `kind`, an
    /// [`Entity::NAME`](super::Entity::NAME).
    pub const fn new(field: &'static str, kind: Option<&'static str>) -> Self {
        Self {
            field,
            kind,
            phantom: PhantomData,
        }
    }

    fn single(&self, value: &Input) -> Result<Option<Id<M>>, ValidationError> {
        match value {
            Input::Null => return Ok(Some(Id::NONE)),
            Input::Entity(EntityRef { kind, id }) if self.kind == Some(*kind) => {
                return Ok(Some(Id::new(*id)));
            }
            Input::Entity(_) => {
                return Err(ValidationError::type_error(self.field, EXPECTED_ID, value));
            }
            _ => {}
        }

        maybe_snowflake(value)
            .map(|id| id.map(Id::new))
            .map_err(|error| ValidationError::value_error(self.field, error.to_string()))
    }

    /// Validate a single ID or a list of them.
    fn many(&self, value: Input) -> Result<Vec<Id<M>>, ValidationError> {
        let values = match value {
            Input::Null => return Ok(Vec::new()),
            Input::List(values) => values,
            single => vec![single],
        };

        let mut ids = Vec::with_capacity(values.len());
        for value in &values {
            match self.single(value)? {
                Some(id) if id.is_none() => {}
                Some(id) => ids.push(id),
                None => {
                    return Err(ValidationError::type_error(self.field, EXPECTED_ID, value));
                }
            }
        }

        Ok(ids)
    }
}

impl<M> FieldValidator for EntityIdValidator<M> {
    type Output = Id<M>;

    fn validate(&self, value: Input) -> Result<Id<M>, ValidationError> {
        self.single(&value)?
            .ok_or_else(|| ValidationError::type_error(self.field, EXPECTED_ID, &value))
    }
}

/// Accepts one or many snowflakes, deduplicated into an ascending `Vec`.
/// Null and empty input become `None`.
#[derive(Clone, Copy, Debug)]
pub struct EntityIdArrayValidator<M> {
    inner: EntityIdValidator<M>,
}

impl<M> EntityIdArrayValidator<M> {
    /// Create a validator for `field`, see [`EntityIdValidator::new`].
    pub const fn new(field: &'static str, kind: Option<&'static str>) -> Self {
        Self {
            inner: EntityIdValidator::new(field, kind),
        }
    }
}

impl<M> FieldValidator for EntityIdArrayValidator<M> {
    type Output = Option<Vec<Id<M>>>;

    fn validate(&self, value: Input) -> Result<Option<Vec<Id<M>>>, ValidationError> {
        let ids: BTreeSet<Id<M>> = self.inner.many(value)?.into_iter().collect();

        if ids.is_empty() {
            return Ok(None);
        }

        Ok(Some(ids.into_iter().collect()))
    }
}

/// Accepts one or many snowflakes, collected into a set. Null and empty
/// input become `None`.
#[derive(Clone, Copy, Debug)]
pub struct EntityIdSetValidator<M> {
    inner: EntityIdValidator<M>,
}

impl<M> EntityIdSetValidator<M> {
    /// Create a validator for `field`, see [`EntityIdValidator::new`].
    pub const fn new(field: &'static str, kind: Option<&'static str>) -> Self {
        Self {
            inner: EntityIdValidator::new(field, kind),
        }
    }
}

impl<M> FieldValidator for EntityIdSetValidator<M> {
    type Output = Option<HashSet<Id<M>>>;

    fn validate(&self, value: Input) -> Result<Option<HashSet<Id<M>>>, ValidationError> {
        let ids: HashSet<Id<M>> = self.inner.many(value)?.into_iter().collect();

        if ids.is_empty() {
            return Ok(None);
        }

        Ok(Some(ids))
    }
}

// ---------------------------------------------------------------------------
// Preinstanced enums and flags
// ---------------------------------------------------------------------------

fn preinstanced_member<P: Preinstanced>(
    field: &'static str,
    value: &Input,
) -> Result<P, ValidationError> {
    let raw = match value {
        Input::Member(member) if member.kind == P::NAME => &*member.value,
        Input::Member(_) => return Err(ValidationError::type_error(field, P::NAME, value)),
        raw => raw,
    };

    match P::Value::from_input(raw) {
        Ok(raw) => Ok(P::get(raw)),
        Err(RawValueError::Kind) => Err(ValidationError::type_error(field, P::NAME, value)),
        Err(RawValueError::Range { min, max }) => Err(ValidationError::value_error(
            field,
            format!("must be in range [{min}:{max}], got {raw}"),
        )),
    }
}

/// Accepts a member of `P` or its raw value; null becomes `default`.
#[derive(Clone, Debug)]
pub struct PreinstancedValidator<P> {
    field: &'static str,
    default: P,
}

impl<P> PreinstancedValidator<P> {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str, default: P) -> Self {
        Self { field, default }
    }
}

impl<P: Preinstanced> FieldValidator for PreinstancedValidator<P> {
    type Output = P;

    fn validate(&self, value: Input) -> Result<P, ValidationError> {
        if value.is_null() {
            return Ok(self.default.clone());
        }

        preinstanced_member(self.field, &value)
    }
}

/// Accepts a list of members of `P` or their raw values, deduplicated and
/// sorted. Null and `[]` become `None`.
#[derive(Clone, Copy, Debug)]
pub struct PreinstancedArrayValidator<P> {
    field: &'static str,
    phantom: PhantomData<fn() -> P>,
}

impl<P> PreinstancedArrayValidator<P> {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            phantom: PhantomData,
        }
    }
}

impl<P: Preinstanced> FieldValidator for PreinstancedArrayValidator<P> {
    type Output = Option<Vec<P>>;

    fn validate(&self, value: Input) -> Result<Option<Vec<P>>, ValidationError> {
        let values = match value {
            Input::Null => return Ok(None),
            Input::List(values) => values,
            other => return Err(ValidationError::type_error(self.field, P::NAME, &other)),
        };

        let mut members = BTreeSet::new();
        for value in &values {
            members.insert(preinstanced_member::<P>(self.field, value)?);
        }

        if members.is_empty() {
            return Ok(None);
        }

        Ok(Some(members.into_iter().collect()))
    }
}

/// Accepts a bitmask; null becomes the empty flag value.
#[derive(Clone, Copy, Debug)]
pub struct FlagValidator<F> {
    field: &'static str,
    phantom: PhantomData<fn() -> F>,
}

impl<F> FlagValidator<F> {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            phantom: PhantomData,
        }
    }
}

impl<F: Flags<Bits = u64>> FieldValidator for FlagValidator<F> {
    type Output = F;

    fn validate(&self, value: Input) -> Result<F, ValidationError> {
        match value {
            Input::Null => Ok(F::empty()),
            Input::Int(bits) => u64::try_from(bits).map(F::from_bits_retain).map_err(|_| {
                ValidationError::value_error(
                    self.field,
                    format!("must be in range [0:{}], got {bits}", u64::MAX),
                )
            }),
            other => Err(ValidationError::type_error(self.field, EXPECTED_INT, &other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Date-times
// ---------------------------------------------------------------------------

/// Accepts a date-time, an ISO 8601 string or unix seconds. Null becomes
/// `None`.
#[derive(Clone, Copy, Debug)]
pub struct NullableDateTimeValidator {
    field: &'static str,
}

impl NullableDateTimeValidator {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl FieldValidator for NullableDateTimeValidator {
    type Output = Option<DateTime<Utc>>;

    fn validate(&self, value: Input) -> Result<Option<DateTime<Utc>>, ValidationError> {
        let timestamp = match &value {
            Input::Null => return Ok(None),
            Input::DateTime(value) => return Ok(Some(Timestamp::from(*value).as_datetime())),
            Input::Str(raw) => Timestamp::parse(raw),
            Input::Int(secs) => match i64::try_from(*secs) {
                Ok(secs) => Timestamp::from_secs(secs),
                Err(_) => Err(TimestampParseError::RANGE),
            },
            Input::Float(secs) => Timestamp::from_secs_f64(*secs),
            other => {
                return Err(ValidationError::type_error(self.field, EXPECTED_DATETIME, other));
            }
        };

        timestamp
            .map(|timestamp| Some(timestamp.as_datetime()))
            .map_err(|error| {
                ValidationError::value_error(self.field, format!("{error}, got {value}"))
            })
    }
}

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

fn url(field: &'static str, value: String) -> Result<String, ValidationError> {
    if is_url(&value) {
        Ok(value)
    } else {
        Err(ValidationError::value_error(
            field,
            format!("must be an url, got {value:?}"),
        ))
    }
}

/// Accepts a well-formed URL; null and `""` are rejected.
#[derive(Clone, Copy, Debug)]
pub struct UrlRequiredValidator {
    field: &'static str,
}

impl UrlRequiredValidator {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl FieldValidator for UrlRequiredValidator {
    type Output = String;

    fn validate(&self, value: Input) -> Result<String, ValidationError> {
        match value {
            Input::Null => Err(ValidationError::value_error(self.field, "is required")),
            Input::Str(value) if value.is_empty() => {
                Err(ValidationError::value_error(self.field, "is required"))
            }
            Input::Str(value) => url(self.field, value),
            other => Err(ValidationError::type_error(self.field, EXPECTED_STR, &other)),
        }
    }
}

/// Accepts a well-formed URL; null and `""` become `None`.
#[derive(Clone, Copy, Debug)]
pub struct UrlOptionalValidator {
    field: &'static str,
}

impl UrlOptionalValidator {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl FieldValidator for UrlOptionalValidator {
    type Output = Option<String>;

    fn validate(&self, value: Input) -> Result<Option<String>, ValidationError> {
        match value {
            Input::Null => Ok(None),
            Input::Str(value) if value.is_empty() => Ok(None),
            Input::Str(value) => url(self.field, value).map(Some),
            other => Err(ValidationError::type_error(self.field, EXPECTED_STR, &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BoolValidator, EntityIdArrayValidator, EntityIdSetValidator, EntityIdValidator,
        FlagValidator, FloatConditionalValidator, ForceStringValidator, IntConditionalValidator,
        NullableDateTimeValidator, NullableStringValidator, PreinstancedArrayValidator,
        PreinstancedValidator, UrlOptionalValidator, UrlRequiredValidator,
    };
    use crate::fields::{
        entity::tests::Item,
        input::{EntityRef, MemberRef},
        parsers::NullableDateTimeParser,
        putters::NullableDateTimePutter,
        FieldParser, FieldPutter, FieldValidator, Input, ValidationError, WireData,
    };
    use crate::types::id::{marker::GenericMarker, Id};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    crate::preinstanced! {
        pub enum Shape: u8 {
            Circle = 1,
            Square = 2,
        }
    }

    crate::preinstanced! {
        pub enum Colour: u8 {
            Red = 1,
        }
    }

    bitflags::bitflags! {
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        pub struct Switches: u64 {
            const A = 1;
            const B = 1 << 1;
        }
    }

    const VALIDATE_SLOWMODE: IntConditionalValidator<u32> = IntConditionalValidator::new(
        "slowmode",
        0,
        |value| (0..=21600).contains(&value),
        "must be in range [0:21600], got {}",
    );

    const VALIDATE_ID: EntityIdValidator<GenericMarker> =
        EntityIdValidator::new("id", Some("Item"));

    #[test]
    fn int_conditional() {
        let err = VALIDATE_SLOWMODE.validate(Input::from(-1)).unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.to_string(), "`slowmode` must be in range [0:21600], got -1");

        assert!(VALIDATE_SLOWMODE.validate(Input::from("")).unwrap_err().is_type());
        assert_eq!(VALIDATE_SLOWMODE.validate(Input::from(0)), Ok(0));
        assert_eq!(VALIDATE_SLOWMODE.validate(Input::Null), Ok(0));
        assert_eq!(VALIDATE_SLOWMODE.validate(Input::from(21600)), Ok(21600));
        assert!(VALIDATE_SLOWMODE.validate(Input::from(21601)).unwrap_err().is_value());
        assert!(VALIDATE_SLOWMODE.validate(Input::from(true)).unwrap_err().is_type());
    }

    #[test]
    fn float_conditional() {
        const VALIDATE: FloatConditionalValidator = FloatConditionalValidator::new(
            "ratio",
            1.0,
            |value| (0.0..=1.0).contains(&value),
            "must be in range [0:1], got {}",
        );

        assert_eq!(VALIDATE.validate(Input::from(0.5)), Ok(0.5));
        assert_eq!(VALIDATE.validate(Input::from(0)), Ok(0.0));
        assert_eq!(VALIDATE.validate(Input::Null), Ok(1.0));
        assert!(VALIDATE.validate(Input::from(1.5)).unwrap_err().is_value());
        assert!(VALIDATE.validate(Input::from("0.5")).unwrap_err().is_type());
    }

    #[test]
    fn bools() {
        const VALIDATE: BoolValidator = BoolValidator::new("nsfw", false);

        assert_eq!(VALIDATE.validate(Input::Null), Ok(false));
        assert_eq!(VALIDATE.validate(Input::from(true)), Ok(true));
        assert!(VALIDATE.validate(Input::from(1)).unwrap_err().is_type());
    }

    #[test]
    fn strings() {
        const FORCE: ForceStringValidator = ForceStringValidator::new("name", 2, 4);
        const NULLABLE: NullableStringValidator = NullableStringValidator::new("topic", 1, 3);

        assert_eq!(FORCE.validate(Input::Null), Ok(String::new()));
        assert_eq!(FORCE.validate(Input::from("abc")), Ok("abc".to_owned()));
        assert_eq!(FORCE.validate(Input::from(12)), Ok("12".to_owned()));
        assert!(FORCE.validate(Input::from("abcde")).unwrap_err().is_value());

        assert_eq!(NULLABLE.validate(Input::from("")), Ok(None));
        assert_eq!(NULLABLE.validate(Input::Null), Ok(None));
        assert_eq!(NULLABLE.validate(Input::from("ab")), Ok(Some("ab".to_owned())));
        assert!(NULLABLE.validate(Input::from(12)).unwrap_err().is_type());
        assert!(NULLABLE.validate(Input::from("abcd")).unwrap_err().is_value());
    }

    #[test]
    fn entity_ids() {
        assert_eq!(VALIDATE_ID.validate(Input::Null), Ok(Id::NONE));
        assert_eq!(VALIDATE_ID.validate(Input::from(12)), Ok(Id::new(12)));
        assert_eq!(VALIDATE_ID.validate(Input::from("12")), Ok(Id::new(12)));
        assert_eq!(
            VALIDATE_ID.validate(Input::entity(&Item::new(5, "e"))),
            Ok(Id::new(5))
        );

        let other_kind = Input::Entity(EntityRef { kind: "Other", id: 5 });
        assert!(VALIDATE_ID.validate(other_kind).unwrap_err().is_type());
        assert!(VALIDATE_ID.validate(Input::from("a")).unwrap_err().is_type());
        assert!(VALIDATE_ID.validate(Input::from(1.5)).unwrap_err().is_type());
        assert!(VALIDATE_ID.validate(Input::from(-1)).unwrap_err().is_value());
        assert!(VALIDATE_ID
            .validate(Input::from("99999999999999999999999"))
            .unwrap_err()
            .is_value());
    }

    #[test]
    fn entity_id_collections() {
        const ARRAY: EntityIdArrayValidator<GenericMarker> =
            EntityIdArrayValidator::new("ids", Some("Item"));
        const SET: EntityIdSetValidator<GenericMarker> = EntityIdSetValidator::new("ids", None);

        assert_eq!(ARRAY.validate(Input::Null), Ok(None));
        assert_eq!(ARRAY.validate(Input::List(Vec::new())), Ok(None));
        assert_eq!(ARRAY.validate(Input::from(3)), Ok(Some(vec![Id::new(3)])));
        assert_eq!(
            ARRAY.validate(Input::List(vec![
                Input::from("3"),
                Input::entity(&Item::new(1, "a")),
                Input::from(3),
            ])),
            Ok(Some(vec![Id::new(1), Id::new(3)]))
        );
        assert!(ARRAY.validate(Input::from(vec!["a"])).unwrap_err().is_type());

        assert_eq!(
            SET.validate(Input::from(vec![2, 1, 2])),
            Ok(Some(HashSet::from([Id::new(1), Id::new(2)])))
        );
        assert!(SET
            .validate(Input::entity(&Item::new(1, "a")))
            .unwrap_err()
            .is_type());
    }

    #[test]
    fn entity_id_arrays_sort_the_same_for_any_order() {
        const ARRAY: EntityIdArrayValidator<GenericMarker> =
            EntityIdArrayValidator::new("ids", Some("Item"));

        let ids = [
            Input::from("30"),
            Input::from(4),
            Input::entity(&Item::new(200, "a")),
            Input::from(4),
            Input::from("1"),
        ];
        let expected = Some(vec![Id::new(1), Id::new(4), Id::new(30), Id::new(200)]);

        for rotation in 0..ids.len() {
            let mut order = ids.to_vec();
            order.rotate_left(rotation);
            assert_eq!(ARRAY.validate(Input::List(order.clone())), Ok(expected.clone()));

            order.reverse();
            assert_eq!(ARRAY.validate(Input::List(order)), Ok(expected.clone()));
        }
    }

    #[test]
    fn preinstanced() {
        const VALIDATE: PreinstancedValidator<Shape> =
            PreinstancedValidator::new("shape", Shape::Circle);
        const VALIDATE_ALL: PreinstancedArrayValidator<Shape> =
            PreinstancedArrayValidator::new("shapes");

        assert_eq!(VALIDATE.validate(Input::Null), Ok(Shape::Circle));
        assert_eq!(VALIDATE.validate(Input::from(Shape::Square)), Ok(Shape::Square));
        assert_eq!(VALIDATE.validate(Input::from(2)), Ok(Shape::Square));
        assert_eq!(VALIDATE.validate(Input::from(7)), Ok(Shape::Unknown(7)));
        assert!(VALIDATE.validate(Input::from(Colour::Red)).unwrap_err().is_type());
        assert!(VALIDATE.validate(Input::from("2")).unwrap_err().is_type());

        assert_eq!(VALIDATE_ALL.validate(Input::Null), Ok(None));
        assert_eq!(VALIDATE_ALL.validate(Input::List(Vec::new())), Ok(None));
        assert_eq!(
            VALIDATE_ALL.validate(Input::List(vec![
                Input::from(Shape::Square),
                Input::from(1),
                Input::from(2),
            ])),
            Ok(Some(vec![Shape::Circle, Shape::Square]))
        );
        assert_eq!(
            VALIDATE_ALL.validate(Input::from(12.6)),
            Err(ValidationError::Type {
                field: "shapes",
                expected: "Shape",
                found: "float 12.6".to_owned(),
            })
        );

        let wrong_member = Input::List(vec![Input::Member(MemberRef {
            kind: "Colour",
            value: Box::new(Input::from(1)),
        })]);
        assert!(VALIDATE_ALL.validate(wrong_member).unwrap_err().is_type());
    }

    #[test]
    fn preinstanced_out_of_range() {
        const VALIDATE: PreinstancedValidator<Shape> =
            PreinstancedValidator::new("shape", Shape::Circle);
        const VALIDATE_ALL: PreinstancedArrayValidator<Shape> =
            PreinstancedArrayValidator::new("shapes");

        assert_eq!(
            VALIDATE.validate(Input::from(300)),
            Err(ValidationError::Value {
                field: "shape",
                message: "must be in range [0:255], got 300".to_owned(),
            })
        );
        assert!(VALIDATE.validate(Input::from(-1)).unwrap_err().is_value());
        assert_eq!(VALIDATE.validate(Input::from(255)), Ok(Shape::Unknown(255)));
        assert!(VALIDATE.validate(Input::from(12.6)).unwrap_err().is_type());

        let err = VALIDATE_ALL
            .validate(Input::from(vec![1, 256]))
            .unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.field(), "shapes");
    }

    #[test]
    fn flags() {
        const VALIDATE: FlagValidator<Switches> = FlagValidator::new("flags");

        assert_eq!(VALIDATE.validate(Input::Null), Ok(Switches::empty()));
        assert_eq!(VALIDATE.validate(Input::from(3)), Ok(Switches::A | Switches::B));
        assert!(VALIDATE.validate(Input::from(-1)).unwrap_err().is_value());
        assert!(VALIDATE.validate(Input::from("3")).unwrap_err().is_type());
    }

    #[test]
    fn date_times() {
        const VALIDATE: NullableDateTimeValidator = NullableDateTimeValidator::new("at");
        let at = Utc.with_ymd_and_hms(2023, 4, 11, 0, 31, 0).unwrap();

        assert_eq!(VALIDATE.validate(Input::Null), Ok(None));
        assert_eq!(VALIDATE.validate(Input::from(at)), Ok(Some(at)));
        assert_eq!(
            VALIDATE.validate(Input::from("2023-04-11T00:31:00+00:00")),
            Ok(Some(at))
        );
        assert_eq!(VALIDATE.validate(Input::from(1681173060)), Ok(Some(at)));
        assert!(VALIDATE.validate(Input::from("tomorrow")).unwrap_err().is_value());
        assert!(VALIDATE.validate(Input::from(true)).unwrap_err().is_type());
    }

    #[test]
    fn date_times_are_canonical_on_the_wire() {
        const VALIDATE: NullableDateTimeValidator = NullableDateTimeValidator::new("at");
        const PARSE: NullableDateTimeParser = NullableDateTimeParser::new("at");
        const PUT: NullableDateTimePutter = NullableDateTimePutter::new("at");

        let precise = Utc.timestamp_opt(1_681_173_060, 123_456_789).unwrap();
        let canonical = VALIDATE.validate(Input::from(precise)).unwrap();
        assert_eq!(canonical, Some(Utc.timestamp_opt(1_681_173_060, 123_456_000).unwrap()));

        let mut data = WireData::new();
        PUT.put(&canonical, &mut data, false);
        assert_eq!(PARSE.parse(&data), canonical);

        assert_eq!(
            VALIDATE.validate(Input::from("2023-04-11T00:31:00.123456789+00:00")),
            Ok(canonical)
        );
    }

    #[test]
    fn urls() {
        const REQUIRED: UrlRequiredValidator = UrlRequiredValidator::new("url");
        const OPTIONAL: UrlOptionalValidator = UrlOptionalValidator::new("url");

        assert_eq!(
            REQUIRED.validate(Input::from("https://discord.com")),
            Ok("https://discord.com".to_owned())
        );
        assert!(REQUIRED.validate(Input::Null).unwrap_err().is_value());
        assert!(REQUIRED.validate(Input::from("")).unwrap_err().is_value());
        assert!(REQUIRED.validate(Input::from("discord")).unwrap_err().is_value());
        assert!(REQUIRED.validate(Input::from(1)).unwrap_err().is_type());

        assert_eq!(OPTIONAL.validate(Input::from("")), Ok(None));
        assert_eq!(
            OPTIONAL.validate(Input::from("attachment://a.png")),
            Ok(Some("attachment://a.png".to_owned()))
        );
    }
}
