//! Error type of [`Timestamp`](super::Timestamp) construction.

use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// A wire or caller value that isn't a usable timestamp.
#[derive(Debug)]
pub struct TimestampParseError {
    kind: TimestampParseErrorType,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl TimestampParseError {
    pub(crate) const FORMAT: Self = Self::new(TimestampParseErrorType::Format);
    pub(crate) const RANGE: Self = Self::new(TimestampParseErrorType::Range);
    pub(crate) const NON_FINITE: Self = Self::new(TimestampParseErrorType::NonFinite);

    const fn new(kind: TimestampParseErrorType) -> Self {
        Self { kind, source: None }
    }

    /// chrono rejected a string that looked like an ISO 8601 date-time.
    pub(crate) fn parsing(source: impl Error + Send + Sync + 'static) -> Self {
        Self {
            kind: TimestampParseErrorType::Parsing,
            source: Some(Box::new(source)),
        }
    }

    /// What went wrong.
    pub const fn kind(&self) -> TimestampParseErrorType {
        self.kind
    }
}

impl Display for TimestampParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self.kind {
            TimestampParseErrorType::Format => "is not an ISO 8601 date-time",
            TimestampParseErrorType::Parsing => "is not a valid date-time",
            TimestampParseErrorType::Range => "is outside the supported date range",
            TimestampParseErrorType::NonFinite => "is not a finite number of seconds",
        })
    }
}

impl Error for TimestampParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

/// Kind of [`TimestampParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum TimestampParseErrorType {
    /// The string doesn't have the shape of a date-time.
    Format,
    /// The string has the shape but names an impossible date or time.
    Parsing,
    /// Unix time too far from the epoch for chrono.
    Range,
    /// Fractional unix seconds were NaN or infinite.
    NonFinite,
}
