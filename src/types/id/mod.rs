//! Type-safe snowflake IDs.
//!
//! Discord identifies every object by a 64-bit unsigned snowflake that is
//! transmitted as a decimal string. [`Id`] wraps the integer and tags it with
//! a marker type from [`marker`] so that a sticker ID can't be passed where a
//! user ID is expected.
//!
//! Unlike twilight, `0` is a valid value here: it is the canonical "absent"
//! ID ([`Id::NONE`]) that the field framework produces for missing or null
//! wire values.

pub mod marker;

use serde::{
    de::{Deserializer, Error as DeError, Visitor},
    ser::Serializer,
    Deserialize, Serialize,
};
use std::{
    any,
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01).
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// ID of a resource, such as the ID of a [channel] or [user].
///
/// [channel]: marker::ChannelMarker
/// [user]: marker::UserMarker
pub struct Id<T> {
    phantom: PhantomData<fn(T) -> T>,
    value: u64,
}

impl<T> Id<T> {
    /// The absent ID.
    pub const NONE: Self = Self::new(0);

    /// Create an ID from a raw integer.
    pub const fn new(value: u64) -> Self {
        Self {
            phantom: PhantomData,
            value,
        }
    }

    /// Return the inner primitive value.
    pub const fn get(self) -> u64 {
        self.value
    }

    /// Whether this is the absent ID.
    pub const fn is_none(self) -> bool {
        self.value == 0
    }

    /// Cast an ID from one type to another.
    ///
    /// ```
    /// use discord_fields::types::id::{
    ///     marker::{StickerMarker, UserMarker},
    ///     Id,
    /// };
    ///
    /// let sticker_id: Id<StickerMarker> = Id::new(123);
    /// let user_id: Id<UserMarker> = sticker_id.cast();
    /// assert_eq!(sticker_id.get(), user_id.get());
    /// ```
    pub const fn cast<New>(self) -> Id<New> {
        Id::new(self.value)
    }

    /// Unix-millisecond timestamp of when the ID was generated.
    ///
    /// Returns `0` for the absent ID.
    pub const fn timestamp_ms(self) -> u64 {
        if self.value == 0 {
            0
        } else {
            (self.value >> 22) + DISCORD_EPOCH_MS
        }
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::NONE
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Id")?;
        let type_name = any::type_name::<T>();

        // `any::type_name` returns the full path, only keep the marker name.
        if let Some(position) = type_name.rfind("::") {
            if let Some(slice) = type_name.get(position + 2..) {
                f.write_str("<")?;
                f.write_str(slice)?;
                f.write_str(">")?;
            }
        }

        f.write_str("(")?;
        Debug::fmt(&self.value, f)?;

        f.write_str(")")
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.value, f)
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> PartialEq<u64> for Id<T> {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for Id<T> {
    fn hash<U: Hasher>(&self, state: &mut U) {
        state.write_u64(self.value);
    }
}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for u64 {
    fn from(id: Id<T>) -> Self {
        id.get()
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::new)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor<T> {
            phantom: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for IdVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a discord snowflake")
            }

            fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Id::new(value))
            }

            fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map(Id::new)
                    .map_err(|_| DeError::custom("negative snowflake"))
            }

            fn visit_unit<E: DeError>(self) -> Result<Self::Value, E> {
                Ok(Id::NONE)
            }

            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map(Id::new).map_err(DeError::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor {
            phantom: PhantomData,
        })
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        marker::{ChannelMarker, StickerMarker, UserMarker},
        Id,
    };
    use serde_test::Token;
    use static_assertions::assert_impl_all;
    use std::{collections::HashSet, fmt::Debug, hash::Hash};

    assert_impl_all!(
        Id<UserMarker>: Clone, Copy, Debug, Eq, Hash, Ord, Send, Sync
    );

    #[test]
    fn none_is_zero() {
        assert_eq!(Id::<UserMarker>::NONE.get(), 0);
        assert!(Id::<UserMarker>::default().is_none());
        assert!(!Id::<UserMarker>::new(1).is_none());
    }

    #[test]
    fn debug_shows_marker() {
        let id = Id::<ChannelMarker>::new(114_941_315_417_899_012);
        assert_eq!(format!("{id:?}"), "Id<ChannelMarker>(114941315417899012)");
    }

    #[test]
    fn from_str() {
        assert_eq!(
            "202304110031".parse::<Id<StickerMarker>>().unwrap(),
            Id::new(202_304_110_031)
        );
        assert!("abc".parse::<Id<StickerMarker>>().is_err());
    }

    #[test]
    fn timestamp_ms() {
        let id = Id::<UserMarker>::new(175_928_847_299_117_063);
        assert_eq!(
            id.timestamp_ms(),
            (175_928_847_299_117_063u64 >> 22) + 1_420_070_400_000
        );
        assert_eq!(Id::<UserMarker>::NONE.timestamp_ms(), 0);
    }

    #[test]
    fn serde() {
        serde_test::assert_ser_tokens(
            &Id::<UserMarker>::new(114_941_315_417_899_012),
            &[Token::Str("114941315417899012")],
        );
        serde_test::assert_de_tokens(
            &Id::<UserMarker>::new(114_941_315_417_899_012),
            &[Token::Str("114941315417899012")],
        );
        serde_test::assert_de_tokens(
            &Id::<UserMarker>::new(114_941_315_417_899_012),
            &[Token::U64(114_941_315_417_899_012)],
        );
        serde_test::assert_de_tokens(&Id::<UserMarker>::NONE, &[Token::Unit]);
    }

    #[test]
    fn hash_set_dedupes() {
        let ids: HashSet<Id<UserMarker>> = [1, 2, 2, 3].into_iter().map(Id::new).collect();
        assert_eq!(ids.len(), 3);
    }
}
