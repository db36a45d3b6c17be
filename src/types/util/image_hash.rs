//! Efficient parsing and storage of Discord image hashes.
//!
//! An image hash is 32 hexadecimal digits, prefixed with `a_` when the image
//! is animated. Storing it as 16 bytes and a flag instead of a `String`
//! keeps entities holding several hashes small and `Copy`.

use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Visitor},
    ser::{Serialize, Serializer},
};
use serde_json::Value;
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::fields::{FieldValidator, Input, ValidationError};

/// Prefix of animated image hashes.
const ANIMATED_PREFIX: &str = "a_";

/// Number of hexadecimal digits of a hash.
const HEX_DIGITS: usize = 32;

/// Reason that an image hash couldn't be parsed.
#[derive(Debug)]
pub struct ImageHashParseError {
    kind: ImageHashParseErrorType,
}

impl ImageHashParseError {
    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &ImageHashParseErrorType {
        &self.kind
    }
}

impl Display for ImageHashParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.kind {
            ImageHashParseErrorType::Format => {
                f.write_str("image hash is not 32 hexadecimal digits")
            }
            ImageHashParseErrorType::Range { nibble } => {
                f.write_str("image hash has an invalid character: ")?;
                Display::fmt(&nibble, f)
            }
        }
    }
}

impl Error for ImageHashParseError {}

/// Type of [`ImageHashParseError`] that occurred.
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ImageHashParseErrorType {
    /// The hash has the wrong length.
    Format,
    /// A character is not a hexadecimal digit.
    Range {
        /// The offending character.
        nibble: char,
    },
}

/// Hash of an avatar, banner, icon or other image.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ImageHash {
    animated: bool,
    bytes: [u8; 16],
}

impl ImageHash {
    /// Create an image hash from raw bytes.
    pub const fn new(bytes: [u8; 16], animated: bool) -> Self {
        Self { animated, bytes }
    }

    /// Parse an image hash in Discord's textual form.
    ///
    /// # Errors
    ///
    /// Returns [`ImageHashParseErrorType::Format`] if the value, without the
    /// animated prefix, isn't 32 characters long, and
    /// [`ImageHashParseErrorType::Range`] if it contains a non-hexadecimal
    /// character.
    pub fn parse(value: &str) -> Result<Self, ImageHashParseError> {
        let (animated, digits) = match value.strip_prefix(ANIMATED_PREFIX) {
            Some(digits) => (true, digits),
            None => (false, value),
        };

        if digits.len() != HEX_DIGITS {
            return Err(ImageHashParseError {
                kind: ImageHashParseErrorType::Format,
            });
        }

        let mut bytes = [0; 16];
        for (byte, pair) in bytes.iter_mut().zip(digits.as_bytes().chunks_exact(2)) {
            let high = nibble(pair[0])?;
            let low = nibble(pair[1])?;
            *byte = (high << 4) | low;
        }

        Ok(Self { animated, bytes })
    }

    /// Whether the image is animated, which makes GIF its natural format.
    pub const fn is_animated(self) -> bool {
        self.animated
    }

    /// The raw bytes.
    pub const fn bytes(self) -> [u8; 16] {
        self.bytes
    }
}

fn nibble(digit: u8) -> Result<u8, ImageHashParseError> {
    char::from(digit)
        .to_digit(16)
        .and_then(|value| u8::try_from(value).ok())
        .ok_or(ImageHashParseError {
            kind: ImageHashParseErrorType::Range {
                nibble: char::from(digit),
            },
        })
}

impl Display for ImageHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.animated {
            f.write_str(ANIMATED_PREFIX)?;
        }

        for byte in self.bytes {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl FromStr for ImageHash {
    type Err = ImageHashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for ImageHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ImageHashVisitor;

        impl Visitor<'_> for ImageHashVisitor {
            type Value = ImageHash;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("image hash")
            }

            fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
                ImageHash::parse(v).map_err(DeError::custom)
            }
        }

        deserializer.deserialize_str(ImageHashVisitor)
    }
}

impl Serialize for ImageHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Read an optional image hash field, for use with a
/// [`FunctionalParser`](crate::fields::parsers::FunctionalParser).
///
/// Malformed hashes are dropped.
pub fn parse_image_hash(value: Option<&Value>) -> Option<ImageHash> {
    value?.as_str().and_then(|raw| ImageHash::parse(raw).ok())
}

/// Write an optional image hash field, for use with a
/// [`FunctionalOptionalPutter`](crate::fields::putters::FunctionalOptionalPutter).
pub fn put_image_hash(value: &Option<ImageHash>) -> Value {
    value.map_or(Value::Null, |hash| Value::String(hash.to_string()))
}

/// Accepts an image hash or its textual form; null and `""` become `None`.
#[derive(Clone, Copy, Debug)]
pub struct ImageHashValidator {
    field: &'static str,
}

impl ImageHashValidator {
    /// Create a validator for `field`.
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl FieldValidator for ImageHashValidator {
    type Output = Option<ImageHash>;

    fn validate(&self, value: Input) -> Result<Option<ImageHash>, ValidationError> {
        match value {
            Input::Null => Ok(None),
            Input::Str(raw) if raw.is_empty() => Ok(None),
            Input::Str(raw) => ImageHash::parse(&raw).map(Some).map_err(|error| {
                ValidationError::value_error(self.field, format!("{error}, got {raw:?}"))
            }),
            other => Err(ValidationError::type_error(self.field, "`str`", &other)),
        }
    }
}

impl From<ImageHash> for Input {
    fn from(hash: ImageHash) -> Self {
        Self::Str(hash.to_string())
    }
}
