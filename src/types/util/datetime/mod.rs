//! Utilities for parsing and formatting Discord timestamps.
//!
//! Discord sends most date-times as ISO 8601 strings
//! (`2021-01-01T01:01:01.010000+00:00`), but a handful of fields (OAuth2
//! expiry, activity timestamps) are plain unix seconds. [`Timestamp`] wraps a
//! [`chrono::DateTime<Utc>`] and accepts both, and always writes the ISO 8601
//! form with microseconds back out.

mod error;

pub use self::error::{TimestampParseError, TimestampParseErrorType};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Visitor},
    ser::{Serialize, Serializer},
};
use serde_json::Value;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Number of microseconds in a second.
const MICROSECONDS_PER_SECOND: i64 = 1_000_000;

/// Representation of a Discord timestamp.
///
/// Precision is microseconds, the finest Discord writes; anything finer is
/// truncated on construction.
///
/// # serde
///
/// Deserializes from an ISO 8601 string or a unix-seconds number, and
/// serializes as an ISO 8601 string with microseconds.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse a timestamp from an ISO 8601 datetime string emitted by Discord.
    ///
    /// Discord emits two ISO 8601 formats: with microseconds
    /// (`2021-01-01T01:01:01.010000+00:00`) and without
    /// (`2021-01-01T01:01:01+00:00`). Both are accepted, as is any other
    /// RFC 3339 offset. Digits past microseconds are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseErrorType::Format`] if the string doesn't look
    /// like a datetime at all, or [`TimestampParseErrorType::Parsing`] if
    /// chrono rejects it.
    pub fn parse(datetime: &str) -> Result<Self, TimestampParseError> {
        if !datetime.contains('T') {
            return Err(TimestampParseError::FORMAT);
        }

        DateTime::parse_from_rfc3339(datetime)
            .map(|parsed| Self::from(parsed.with_timezone(&Utc)))
            .map_err(TimestampParseError::parsing)
    }

    /// Create a timestamp from a Unix timestamp with seconds precision.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseErrorType::Range`] if the value can't be
    /// represented.
    pub fn from_secs(unix_seconds: i64) -> Result<Self, TimestampParseError> {
        DateTime::from_timestamp(unix_seconds, 0)
            .map(Self)
            .ok_or(TimestampParseError::RANGE)
    }

    /// Create a timestamp from a Unix timestamp with microseconds precision.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseErrorType::Range`] if the value can't be
    /// represented.
    pub fn from_micros(unix_microseconds: i64) -> Result<Self, TimestampParseError> {
        DateTime::from_timestamp_micros(unix_microseconds)
            .map(Self)
            .ok_or(TimestampParseError::RANGE)
    }

    /// Create a timestamp from a fractional Unix timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseErrorType::NonFinite`] for NaN or infinity, or
    /// [`TimestampParseErrorType::Range`] if the value can't be represented.
    pub fn from_secs_f64(unix_seconds: f64) -> Result<Self, TimestampParseError> {
        if !unix_seconds.is_finite() {
            return Err(TimestampParseError::NON_FINITE);
        }

        #[allow(clippy::cast_possible_truncation)]
        let micros = (unix_seconds * MICROSECONDS_PER_SECOND as f64).round() as i64;
        Self::from_micros(micros)
    }

    /// Total number of seconds within the timestamp.
    pub fn as_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Total number of microseconds within the timestamp.
    pub fn as_micros(&self) -> i64 {
        self.0.timestamp_micros()
    }

    /// The wrapped date-time.
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Create an ISO 8601 display formatter.
    pub const fn iso_8601(&self) -> TimestampIso8601Display {
        TimestampIso8601Display::new(*self)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.iso_8601(), f)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime.trunc_subsecs(6))
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl TryFrom<&'_ str> for Timestamp {
    type Error = TimestampParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("an ISO 8601 datetime string or unix seconds")
            }

            fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
                Timestamp::parse(v).map_err(DeError::custom)
            }

            fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
                Timestamp::from_secs(v).map_err(DeError::custom)
            }

            fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
                let secs = i64::try_from(v).map_err(DeError::custom)?;
                Timestamp::from_secs(secs).map_err(DeError::custom)
            }

            fn visit_f64<E: DeError>(self, v: f64) -> Result<Self::Value, E> {
                Timestamp::from_secs_f64(v).map_err(DeError::custom)
            }
        }

        deserializer.deserialize_any(TimestampVisitor)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.iso_8601())
    }
}

/// Display wrapper returned by [`Timestamp::iso_8601`].
///
/// Writes microseconds by default, matching what Discord sends.
#[derive(Debug)]
pub struct TimestampIso8601Display {
    inner: Timestamp,
    with_microseconds: bool,
}

impl TimestampIso8601Display {
    const fn new(timestamp: Timestamp) -> Self {
        Self {
            inner: timestamp,
            with_microseconds: true,
        }
    }

    /// Get the inner timestamp.
    pub const fn get(&self) -> Timestamp {
        self.inner
    }

    /// Whether to include microseconds in the output.
    #[must_use]
    pub const fn with_microseconds(mut self, with_microseconds: bool) -> Self {
        self.with_microseconds = with_microseconds;
        self
    }
}

impl Display for TimestampIso8601Display {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let precision = if self.with_microseconds {
            SecondsFormat::Micros
        } else {
            SecondsFormat::Secs
        };

        // `use_z = false` keeps Discord's `+00:00` offset.
        f.write_str(&self.inner.0.to_rfc3339_opts(precision, false))
    }
}

impl Serialize for TimestampIso8601Display {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Convert a raw wire value into a date-time.
///
/// Strings are parsed as ISO 8601, numbers are treated as unix seconds.
/// Anything else, or a value that fails to convert, yields `None`.
pub fn timestamp_to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    let timestamp = match value {
        Value::String(raw) => Timestamp::parse(raw).ok(),
        Value::Number(number) => match number.as_i64() {
            Some(secs) => Timestamp::from_secs(secs).ok(),
            None => number
                .as_f64()
                .and_then(|secs| Timestamp::from_secs_f64(secs).ok()),
        },
        _ => None,
    };

    timestamp.as_ref().map(Timestamp::as_datetime)
}

/// Convert a date-time into its ISO 8601 wire form.
pub fn datetime_to_timestamp(datetime: &DateTime<Utc>) -> String {
    Timestamp::from(*datetime).iso_8601().to_string()
}
