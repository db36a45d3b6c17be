//! Closed enums with an escape hatch for values Discord adds later.
//!
//! Discord grows its enums without notice, so every enum here is declared
//! with [`preinstanced!`](crate::preinstanced), which adds an `Unknown(raw)`
//! variant and makes lookup total: [`Preinstanced::get`] never fails, and
//! an unknown raw value round-trips unchanged.
//!
//! ```
//! use discord_fields::{preinstanced, types::preinstanced::Preinstanced};
//!
//! preinstanced! {
//!     /// Example.
//!     pub enum Fruit: u8 {
//!         Apple = 1,
//!         Pear = 2,
//!     }
//! }
//!
//! assert_eq!(Fruit::get(2), Fruit::Pear);
//! assert_eq!(Fruit::get(9), Fruit::Unknown(9));
//! assert_eq!(Fruit::get(9).value(), 9);
//! assert_eq!(Fruit::Pear.name(), "Pear");
//! ```

use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, hash::Hash};

use crate::fields::{Input, WirePrimitive};

/// Wire representation of a preinstanced enum.
pub trait PreinstancedValue:
    WirePrimitive
    + Clone
    + Ord
    + Hash
    + Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Type of the literals the enum is declared with.
    type Literal: Copy;

    /// Convert a declared literal.
    fn from_literal(literal: Self::Literal) -> Self;

    /// Read the value from caller input.
    fn from_input(input: &Input) -> Result<Self, RawValueError>;

    /// The value as caller input.
    fn into_input(self) -> Input;
}

/// Why caller input isn't a raw value of a preinstanced enum.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RawValueError {
    /// The input has another type, such as a string for an integer enum.
    Kind,
    /// An integer outside `min..=max` of the enum's value type.
    Range {
        /// Smallest accepted value.
        min: i128,
        /// Largest accepted value.
        max: i128,
    },
}

macro_rules! impl_preinstanced_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PreinstancedValue for $ty {
                type Literal = $ty;

                fn from_literal(literal: $ty) -> Self {
                    literal
                }

                fn from_input(input: &Input) -> Result<Self, RawValueError> {
                    match input {
                        Input::Int(value) => {
                            <$ty>::try_from(*value).map_err(|_| RawValueError::Range {
                                min: i128::from(<$ty>::MIN),
                                max: i128::from(<$ty>::MAX),
                            })
                        }
                        _ => Err(RawValueError::Kind),
                    }
                }

                fn into_input(self) -> Input {
                    Input::from(self)
                }
            }
        )*
    };
}

impl_preinstanced_integer!(u8, u16, u32, i32, i64);

impl PreinstancedValue for String {
    type Literal = &'static str;

    fn from_literal(literal: &'static str) -> Self {
        literal.to_owned()
    }

    fn from_input(input: &Input) -> Result<Self, RawValueError> {
        match input {
            Input::Str(value) => Ok(value.clone()),
            _ => Err(RawValueError::Kind),
        }
    }

    fn into_input(self) -> Input {
        Input::Str(self)
    }
}

/// An enum with a fixed set of known members.
///
/// Equality, ordering and hashing follow [`value`](Self::value), so
/// `Unknown(1)` equals the known member whose value is `1`.
pub trait Preinstanced: Clone + Debug + Ord + Hash + Send + Sync + 'static {
    /// The wire representation.
    type Value: PreinstancedValue;

    /// Name of the enum, used in validation errors and [`Input::Member`].
    const NAME: &'static str;

    /// Every known member, in declaration order.
    const INSTANCES: &'static [Self];

    /// The member for `value`, `Unknown(value)` if there is none.
    fn get(value: Self::Value) -> Self;

    /// The wire value.
    fn value(&self) -> Self::Value;

    /// Display name of the member.
    fn name(&self) -> &'static str;

    /// Whether this is the `Unknown` member.
    fn is_unknown(&self) -> bool;
}

/// Declare a [`Preinstanced`] enum.
///
/// The value type is any [`PreinstancedValue`], which covers the integer
/// widths Discord uses and `String`.
#[macro_export]
macro_rules! preinstanced {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $ty:ty {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            /// A value unknown to this library.
            Unknown($ty),
        }

        impl $crate::types::preinstanced::Preinstanced for $name {
            type Value = $ty;

            const NAME: &'static str = ::core::stringify!($name);
            const INSTANCES: &'static [Self] = &[$(Self::$variant),*];

            fn get(value: $ty) -> Self {
                $(
                    if value == $value {
                        return Self::$variant;
                    }
                )*
                Self::Unknown(value)
            }

            fn value(&self) -> $ty {
                match self {
                    $(
                        Self::$variant => {
                            <$ty as $crate::types::preinstanced::PreinstancedValue>::from_literal(
                                $value,
                            )
                        }
                    )*
                    Self::Unknown(value) => ::core::clone::Clone::clone(value),
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => ::core::stringify!($variant),)*
                    Self::Unknown(_) => "Unknown",
                }
            }

            fn is_unknown(&self) -> bool {
                ::core::matches!(self, Self::Unknown(_))
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                use $crate::types::preinstanced::Preinstanced;
                self.value() == other.value()
            }
        }

        impl ::core::cmp::Eq for $name {}

        impl ::core::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some(::core::cmp::Ord::cmp(self, other))
            }
        }

        impl ::core::cmp::Ord for $name {
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                use $crate::types::preinstanced::Preinstanced;
                ::core::cmp::Ord::cmp(&self.value(), &other.value())
            }
        }

        impl ::core::hash::Hash for $name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                use $crate::types::preinstanced::Preinstanced;
                ::core::hash::Hash::hash(&self.value(), state);
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                use $crate::types::preinstanced::Preinstanced;
                f.write_str(self.name())
            }
        }

        impl ::core::convert::From<$ty> for $name {
            fn from(value: $ty) -> Self {
                <Self as $crate::types::preinstanced::Preinstanced>::get(value)
            }
        }

        impl ::core::convert::From<$name> for $crate::fields::Input {
            fn from(member: $name) -> Self {
                use $crate::types::preinstanced::{Preinstanced, PreinstancedValue};
                $crate::fields::Input::Member($crate::fields::input::MemberRef {
                    kind: <$name as Preinstanced>::NAME,
                    value: ::std::boxed::Box::new(member.value().into_input()),
                })
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                use $crate::types::preinstanced::Preinstanced;
                $crate::__private::serde::Serialize::serialize(&self.value(), serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                <$ty as $crate::__private::serde::Deserialize<'de>>::deserialize(deserializer)
                    .map(<Self as $crate::types::preinstanced::Preinstanced>::get)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::Preinstanced;
    use crate::fields::{input::MemberRef, Input};
    use serde_test::Token;
    use static_assertions::assert_impl_all;
    use std::collections::BTreeSet;

    crate::preinstanced! {
        /// Numbers.
        pub enum Level: u8 {
            /// One.
            Low = 1,
            /// Two.
            High = 2,
        }
    }

    crate::preinstanced! {
        /// Words.
        pub enum Word: String {
            Hello = "hello",
            World = "world",
        }
    }

    assert_impl_all!(Level: Clone, Send, Sync, Ord, std::hash::Hash);
    assert_impl_all!(Word: Clone, Send, Sync, Ord);

    #[test]
    fn lookup_is_total() {
        assert_eq!(Level::get(1), Level::Low);
        assert_eq!(Level::get(7), Level::Unknown(7));
        assert!(Level::get(7).is_unknown());
        assert_eq!(Level::get(7).value(), 7);
        assert_eq!(Word::get("world".to_owned()), Word::World);
        assert_eq!(Word::get("nope".to_owned()).name(), "Unknown");
    }

    #[test]
    fn equality_follows_value() {
        assert_eq!(Level::Unknown(2), Level::High);
        assert!(Level::Low < Level::High);
        assert!(Word::Hello < Word::World);

        let set: BTreeSet<Level> = [Level::High, Level::Unknown(2), Level::Low]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn instances() {
        assert_eq!(Level::INSTANCES, &[Level::Low, Level::High]);
        assert_eq!(Level::NAME, "Level");
        assert_eq!(Level::High.to_string(), "High");
    }

    #[test]
    fn into_input() {
        assert_eq!(
            Input::from(Word::Hello),
            Input::Member(MemberRef {
                kind: "Word",
                value: Box::new(Input::Str("hello".to_owned())),
            })
        );
    }

    #[test]
    fn serde() {
        serde_test::assert_tokens(&Level::High, &[Token::U8(2)]);
        serde_test::assert_tokens(&Level::Unknown(9), &[Token::U8(9)]);
        serde_test::assert_tokens(&Word::World, &[Token::Str("world")]);
    }
}
