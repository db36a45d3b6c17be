//! Error types of the field framework.

use thiserror::Error;

use super::Input;

/// Caller input rejected by a [`FieldValidator`](super::FieldValidator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input has the wrong type.
    #[error("`{field}` can be {expected}, got {found}")]
    Type {
        /// Name of the validated field.
        field: &'static str,
        /// Human readable description of the accepted types.
        expected: &'static str,
        /// Description of the rejected input.
        found: String,
    },

    /// The input has the right type but an unacceptable value.
    #[error("`{field}` {message}")]
    Value {
        /// Name of the validated field.
        field: &'static str,
        /// What is wrong with the value.
        message: String,
    },
}

impl ValidationError {
    pub(crate) fn type_error(field: &'static str, expected: &'static str, found: &Input) -> Self {
        Self::Type {
            field,
            expected,
            found: found.describe(),
        }
    }

    pub(crate) fn value_error(field: &'static str, message: impl Into<String>) -> Self {
        Self::Value {
            field,
            message: message.into(),
        }
    }

    /// Name of the field that failed validation.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Type { field, .. } | Self::Value { field, .. } => *field,
        }
    }

    /// Whether the input was of the wrong type.
    pub const fn is_type(&self) -> bool {
        matches!(self, Self::Type { .. })
    }

    /// Whether the input was of the right type but out of range.
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value { .. })
    }
}

/// Failure of the deferred-reference [`Registry`](super::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A deferred reference was used before its name was declared.
    #[error("deferred reference `{0}` used before it was declared")]
    Unresolved(String),

    /// A name was declared twice.
    #[error("`{0}` is already declared")]
    AlreadyDeclared(String),

    /// A name was included or declared with a different type than before.
    #[error("`{name}` is registered as `{expected}`, not `{found}`")]
    TypeMismatch {
        /// The registered name.
        name: String,
        /// Type the name was first registered with.
        expected: &'static str,
        /// Type of the conflicting registration.
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::{ResolveError, ValidationError};
    use crate::fields::Input;

    #[test]
    fn type_error_display() {
        let err = ValidationError::type_error("slowmode", "`int`", &Input::from(""));
        assert_eq!(err.to_string(), "`slowmode` can be `int`, got string \"\"");
        assert!(err.is_type());
        assert!(!err.is_value());
        assert_eq!(err.field(), "slowmode");
    }

    #[test]
    fn value_error_display() {
        let err = ValidationError::value_error("slowmode", "must be >= 0, got -1");
        assert_eq!(err.to_string(), "`slowmode` must be >= 0, got -1");
        assert!(err.is_value());
    }

    #[test]
    fn resolve_error_display() {
        assert_eq!(
            ResolveError::Unresolved("Sticker".to_owned()).to_string(),
            "deferred reference `Sticker` used before it was declared"
        );
    }
}
