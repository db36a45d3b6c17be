//! Loose snowflake coercion used by ID validators.

use thiserror::Error;

use crate::fields::Input;

/// Maximum number of decimal digits of a `u64`.
const MAX_DIGITS: usize = 20;

/// An ID-like input that doesn't fit a snowflake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowflakeError {
    /// The value is negative.
    #[error("snowflake must be positive, got {0}")]
    Negative(i128),
    /// The value is larger than `u64::MAX`.
    #[error("snowflake must be at most {max}, got {0}", max = u64::MAX)]
    TooLarge(String),
}

/// Read a snowflake out of caller input.
///
/// Integers and strings made only of ASCII digits are ID-like. Anything else
/// returns `Ok(None)` so the caller can report a type error.
///
/// # Errors
///
/// Returns a [`SnowflakeError`] if the input is ID-like but out of range.
pub fn maybe_snowflake(input: &Input) -> Result<Option<u64>, SnowflakeError> {
    match input {
        Input::Int(value) => {
            if *value < 0 {
                return Err(SnowflakeError::Negative(*value));
            }

            u64::try_from(*value)
                .map(Some)
                .map_err(|_| SnowflakeError::TooLarge(value.to_string()))
        }
        Input::Str(value) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => {
            if value.len() > MAX_DIGITS {
                return Err(SnowflakeError::TooLarge(value.clone()));
            }

            value
                .parse()
                .map(Some)
                .map_err(|_| SnowflakeError::TooLarge(value.clone()))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{maybe_snowflake, SnowflakeError};
    use crate::fields::Input;

    #[test]
    fn id_like() {
        assert_eq!(maybe_snowflake(&Input::from(12)), Ok(Some(12)));
        assert_eq!(maybe_snowflake(&Input::from("202304110031")), Ok(Some(202304110031)));
        assert_eq!(maybe_snowflake(&Input::from(u64::MAX)), Ok(Some(u64::MAX)));
    }

    #[test]
    fn not_id_like() {
        assert_eq!(maybe_snowflake(&Input::from("12a")), Ok(None));
        assert_eq!(maybe_snowflake(&Input::from("")), Ok(None));
        assert_eq!(maybe_snowflake(&Input::from(1.5)), Ok(None));
        assert_eq!(maybe_snowflake(&Input::Null), Ok(None));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(maybe_snowflake(&Input::from(-1)), Err(SnowflakeError::Negative(-1)));
        assert!(matches!(
            maybe_snowflake(&Input::from("18446744073709551616")),
            Err(SnowflakeError::TooLarge(_))
        ));
        assert!(matches!(
            maybe_snowflake(&Input::from("123456789012345678901")),
            Err(SnowflakeError::TooLarge(_))
        ));
        assert_eq!(
            SnowflakeError::Negative(-1).to_string(),
            "snowflake must be positive, got -1"
        );
    }
}
