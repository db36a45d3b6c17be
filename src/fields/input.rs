//! Loosely typed caller input for validators.
//!
//! Entity builders accept "anything that could be a value for this field" so
//! that a wrong type is reported as a [`ValidationError::Type`] and a wrong
//! value as a [`ValidationError::Value`]. [`Input`] is that "anything": most
//! primitive Rust types, `serde_json::Value`, date-times, IDs, preinstanced
//! enum members and references to identified entities convert into it.
//!
//! [`ValidationError::Type`]: super::ValidationError::Type
//! [`ValidationError::Value`]: super::ValidationError::Value

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::Identified;
use crate::types::{id::Id, util::Timestamp};

/// A value supplied by a caller, before validation.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// No value, `None` or JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// Any integer; wide enough for every signed and unsigned 64-bit value.
    Int(i128),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A sequence of values.
    List(Vec<Input>),
    /// Reference to an identified entity.
    Entity(EntityRef),
    /// A preinstanced enum member.
    Member(MemberRef),
    /// A date-time.
    DateTime(DateTime<Utc>),
}

/// Identity of an entity passed where its ID is expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityRef {
    /// [`Entity::NAME`](super::Entity::NAME) of the referenced type.
    pub kind: &'static str,
    /// The entity's ID.
    pub id: u64,
}

/// A preinstanced enum member passed as input.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberRef {
    /// [`Preinstanced::NAME`](crate::types::preinstanced::Preinstanced::NAME)
    /// of the enum.
    pub kind: &'static str,
    /// The member's wire value, as input.
    pub value: Box<Input>,
}

impl Input {
    /// Reference an identified entity.
    pub fn entity<E: Identified>(entity: &E) -> Self {
        Self::Entity(EntityRef {
            kind: E::NAME,
            id: entity.id().get(),
        })
    }

    /// Whether this is [`Input::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this counts as "absent": null, an empty string or an empty
    /// list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(value) => value.is_empty(),
            Self::List(values) => values.is_empty(),
            _ => false,
        }
    }

    /// Short description used in type errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Bool(value) => format!("bool {value}"),
            Self::Int(value) => format!("int {value}"),
            Self::Float(value) => format!("float {value}"),
            Self::Str(value) => format!("string {value:?}"),
            Self::List(values) => format!("list of {} items", values.len()),
            Self::Entity(entity) => format!("`{}` entity", entity.kind),
            Self::Member(member) => format!("`{}` member", member.kind),
            Self::DateTime(value) => format!("date-time {value}"),
        }
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => Display::fmt(value, f),
            Self::Int(value) => Display::fmt(value, f),
            Self::Float(value) => Display::fmt(value, f),
            Self::Str(value) => f.write_str(value),
            Self::List(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }
                    Display::fmt(value, f)?;
                }
                f.write_str("]")
            }
            Self::Entity(entity) => Display::fmt(&entity.id, f),
            Self::Member(member) => Display::fmt(&member.value, f),
            Self::DateTime(value) => Display::fmt(&Timestamp::from(*value), f),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Input {
                fn from(value: $ty) -> Self {
                    Self::Int(i128::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<usize> for Input {
    fn from(value: usize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<isize> for Input {
    fn from(value: isize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<bool> for Input {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Input {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Input {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Input>> From<Vec<T>> for Input {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Input>, const N: usize> From<[T; N]> for Input {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Id<T>> for Input {
    fn from(id: Id<T>) -> Self {
        Self::Int(i128::from(id.get()))
    }
}

impl From<DateTime<Utc>> for Input {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Timestamp> for Input {
    fn from(value: Timestamp) -> Self {
        Self::DateTime(value.as_datetime())
    }
}

impl From<EntityRef> for Input {
    fn from(value: EntityRef) -> Self {
        Self::Entity(value)
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Self::Int(i128::from(value))
                } else if let Some(value) = number.as_u64() {
                    Self::Int(i128::from(value))
                } else {
                    Self::Float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(value) => Self::Str(value),
            Value::Array(values) => Self::List(values.into_iter().map(Self::from).collect()),
            // Objects have no meaning as field input, keep them as their JSON text.
            Value::Object(map) => Self::Str(Value::Object(map).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Input;
    use crate::types::id::{marker::UserMarker, Id};
    use serde_json::json;

    #[test]
    fn conversions() {
        assert_eq!(Input::from(12u8), Input::Int(12));
        assert_eq!(Input::from(u64::MAX), Input::Int(i128::from(u64::MAX)));
        assert_eq!(Input::from(-1i64), Input::Int(-1));
        assert_eq!(Input::from("a"), Input::Str("a".to_owned()));
        assert_eq!(Input::from(None::<i64>), Input::Null);
        assert_eq!(Input::from(Some(true)), Input::Bool(true));
        assert_eq!(
            Input::from(vec![1, 2]),
            Input::List(vec![Input::Int(1), Input::Int(2)])
        );
        assert_eq!(Input::from(Id::<UserMarker>::new(5)), Input::Int(5));
    }

    #[test]
    fn from_json() {
        assert_eq!(
            Input::from(json!([null, 1, 12.5, "x"])),
            Input::List(vec![
                Input::Null,
                Input::Int(1),
                Input::Float(12.5),
                Input::Str("x".to_owned()),
            ])
        );
    }

    #[test]
    fn emptiness() {
        assert!(Input::Null.is_empty());
        assert!(Input::from("").is_empty());
        assert!(Input::List(Vec::new()).is_empty());
        assert!(!Input::from(0).is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Input::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Input::from(12.5).to_string(), "12.5");
        assert_eq!(Input::from("x").to_string(), "x");
    }
}
