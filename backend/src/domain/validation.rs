//! Shared validation helpers for plant catalog entities.

use std::fmt;

use super::slug::SlugValidationError;

/// Validation errors returned by entity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlantValidationError {
    /// A required field was empty after trimming.
    EmptyField {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// A numeric field was negative.
    NegativeValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i32,
    },
    /// The slug failed validation.
    Slug(SlugValidationError),
}

impl fmt::Display for PlantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::Slug(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for PlantValidationError {}

impl From<SlugValidationError> for PlantValidationError {
    fn from(value: SlugValidationError) -> Self {
        Self::Slug(value)
    }
}

/// Require a non-empty field, returning the value unchanged.
pub(crate) fn validate_non_empty_field(
    value: String,
    field: &'static str,
) -> Result<String, PlantValidationError> {
    if value.trim().is_empty() {
        return Err(PlantValidationError::EmptyField { field });
    }
    Ok(value)
}

/// Normalise an optional field: blank values become `None`.
pub(crate) fn normalise_optional_field(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Require a non-negative value.
pub(crate) fn ensure_non_negative(
    value: i32,
    field: &'static str,
) -> Result<(), PlantValidationError> {
    if value < 0 {
        return Err(PlantValidationError::NegativeValue { field, value });
    }
    Ok(())
}
