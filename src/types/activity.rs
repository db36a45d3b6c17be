//! Rich presence activity parts.
//!
//! Discord packs a party's current and maximum size into one
//! `"size": [size, max]` array, so [`ActivityParty`] carries a putter and a
//! validator of its own for that pair.

use serde_json::Value;

use crate::fields::{
    entity::impl_entity_serde,
    parsers::{FunctionalParser, NullableStringParser},
    putters::NullableStringPutter,
    validators::NullableStringValidator,
    Entity, FieldParser, FieldPutter, FieldValidator, Input, ValidationError, WireData,
};

const PARSE_ID: NullableStringParser = NullableStringParser::new("id");
const PUT_ID_INTO: NullableStringPutter = NullableStringPutter::new("id");
const PARSE_SIZE_AND_MAX: FunctionalParser<(u32, u32)> =
    FunctionalParser::new("size", parse_size_and_max);
const PUT_SIZE_AND_MAX_INTO: SizeAndMaxPutter = SizeAndMaxPutter::new("size");

pub(crate) const VALIDATE_ID: NullableStringValidator = NullableStringValidator::new("id", 1, 128);
pub(crate) const VALIDATE_SIZE_AND_MAX: SizeAndMaxValidator =
    SizeAndMaxValidator::new("size_and_max");

/// `[size, max]`, anything else reads as `(0, 0)`.
fn parse_size_and_max(value: Option<&Value>) -> (u32, u32) {
    let pair = value.and_then(Value::as_array).and_then(|pair| match pair.as_slice() {
        [size, max] => Some((size.as_u64()?, max.as_u64()?)),
        _ => None,
    });

    match pair {
        Some((size, max)) => (
            u32::try_from(size).unwrap_or(u32::MAX),
            u32::try_from(max).unwrap_or(u32::MAX),
        ),
        None => (0, 0),
    }
}

/// Writes a party's size as `[size, max]`, leaving out `(0, 0)` unless
/// `defaults` is set.
#[derive(Clone, Copy, Debug)]
pub struct SizeAndMaxPutter {
    key: &'static str,
}

impl SizeAndMaxPutter {
    /// Create a putter for `key`.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldPutter for SizeAndMaxPutter {
    type Value = (u32, u32);

    fn put<'d>(
        &self,
        value: &(u32, u32),
        data: &'d mut WireData,
        defaults: bool,
    ) -> &'d mut WireData {
        if *value != (0, 0) || defaults {
            let (size, max) = *value;
            data.insert(
                self.key.to_owned(),
                Value::Array(vec![Value::from(size), Value::from(max)]),
            );
        }
        data
    }
}

/// Accepts a `[size, max]` pair of non-negative integers with
/// `size <= max`; null becomes `(0, 0)`.
#[derive(Clone, Copy, Debug)]
pub struct SizeAndMaxValidator {
    field: &'static str,
}

impl SizeAndMaxValidator {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl FieldValidator for SizeAndMaxValidator {
    type Output = (u32, u32);

    fn validate(&self, value: Input) -> Result<(u32, u32), ValidationError> {
        const EXPECTED: &str = "a pair of `int`";

        let (size, max) = match &value {
            Input::Null => return Ok((0, 0)),
            Input::List(pair) => match pair.as_slice() {
                [Input::Int(size), Input::Int(max)] => (*size, *max),
                _ => return Err(ValidationError::type_error(self.field, EXPECTED, &value)),
            },
            _ => return Err(ValidationError::type_error(self.field, EXPECTED, &value)),
        };

        let in_range = |part: &str, value: i128| {
            u32::try_from(value).map_err(|_| {
                ValidationError::value_error(
                    self.field,
                    format!("{part} must be in range [0:{}], got {value}", u32::MAX),
                )
            })
        };
        let size = in_range("size", size)?;
        let max = in_range("max", max)?;

        if size > max {
            return Err(ValidationError::value_error(
                self.field,
                format!("size must not exceed max, got {size} > {max}"),
            ));
        }

        Ok((size, max))
    }
}

/// The party of a rich presence activity.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ActivityParty {
    /// The party's ID.
    pub id: Option<String>,
    /// Current and maximum size.
    pub size_and_max: (u32, u32),
}

impl ActivityParty {
    /// Current size of the party.
    pub const fn current_size(&self) -> u32 {
        self.size_and_max.0
    }

    /// Maximum size of the party.
    pub const fn max_size(&self) -> u32 {
        self.size_and_max.1
    }
}

impl Entity for ActivityParty {
    const NAME: &'static str = "ActivityParty";

    fn from_data(data: &WireData) -> Self {
        Self {
            id: PARSE_ID.parse(data),
            size_and_max: PARSE_SIZE_AND_MAX.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, _include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_ID_INTO.put(&self.id, &mut data, defaults);
        PUT_SIZE_AND_MAX_INTO.put(&self.size_and_max, &mut data, defaults);
        data
    }
}

impl_entity_serde!(ActivityParty);

#[cfg(test)]
mod tests {
    use super::{ActivityParty, PUT_SIZE_AND_MAX_INTO, VALIDATE_SIZE_AND_MAX};
    use crate::fields::{
        entity::tests::wire, Entity, FieldPutter, FieldValidator, Input, WireData,
    };
    use serde_json::{json, Value};

    #[test]
    fn size_and_max_putter() {
        let mut data = WireData::new();
        PUT_SIZE_AND_MAX_INTO.put(&(0, 0), &mut data, false);
        assert!(data.is_empty());

        PUT_SIZE_AND_MAX_INTO.put(&(10, 20), &mut data, false);
        assert_eq!(Value::Object(data), json!({"size": [10, 20]}));

        let mut data = WireData::new();
        PUT_SIZE_AND_MAX_INTO.put(&(0, 0), &mut data, true);
        assert_eq!(Value::Object(data), json!({"size": [0, 0]}));
    }

    #[test]
    fn from_data() {
        let party = ActivityParty::from_data(&wire(json!({"id": "party", "size": [2, 4]})));

        assert_eq!(party.id.as_deref(), Some("party"));
        assert_eq!((party.current_size(), party.max_size()), (2, 4));
        assert_eq!(
            Value::Object(party.to_data(false)),
            json!({"id": "party", "size": [2, 4]})
        );
    }

    #[test]
    fn malformed_size_reads_as_empty() {
        for size in [json!(null), json!([1]), json!(["1", "2"]), json!(3)] {
            let party = ActivityParty::from_data(&wire(json!({"size": size})));
            assert_eq!(party.size_and_max, (0, 0));
        }
    }

    #[test]
    fn size_and_max_validator() {
        assert_eq!(VALIDATE_SIZE_AND_MAX.validate(Input::Null), Ok((0, 0)));
        assert_eq!(VALIDATE_SIZE_AND_MAX.validate(Input::from([3, 5])), Ok((3, 5)));
        assert!(VALIDATE_SIZE_AND_MAX
            .validate(Input::from([6, 5]))
            .unwrap_err()
            .is_value());
        assert!(VALIDATE_SIZE_AND_MAX
            .validate(Input::from([-1, 5]))
            .unwrap_err()
            .is_value());
        assert!(VALIDATE_SIZE_AND_MAX
            .validate(Input::from("3/5"))
            .unwrap_err()
            .is_type());
    }
}
