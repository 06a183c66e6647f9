//! Validation primitives shared by every entity constructor and setter.
//!
//! # Responsibility
//! - Define the single contract-violation error kind of the core.
//! - Provide required-text and numeric-range checks.
//!
//! # Invariants
//! - Validation never mutates state; callers validate before writing.
//! - Every failure is synchronous and returned, never logged-and-dropped.

use crate::model::ids::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Contract violation raised by entity construction, setters and
/// registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required string field is missing or blank.
    EmptyField { field: &'static str },
    /// Numeric field must be strictly positive.
    NotPositive { field: &'static str, value: i64 },
    /// Numeric field must not be negative.
    Negative { field: &'static str, value: i64 },
    /// Date-like input cannot be converted into a calendar date.
    InvalidDate { input: String },
    /// Identifier does not resolve to an entity of the expected kind.
    UnknownEntity { kind: EntityKind, id: Uuid },
    /// Identifier resolves to a deleted entity that cannot be linked again.
    DeletedEntity { kind: EntityKind, id: Uuid },
    /// Pre-built instance still carries links that this registry never saw.
    LinkedInstance { kind: EntityKind, id: Uuid },
    /// Supervisor assignment would close a loop in the reporting chain.
    SupervisorCycle { employee: Uuid, supervisor: Uuid },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "`{field}` must not be empty"),
            Self::NotPositive { field, value } => {
                write!(f, "`{field}` must be larger than 0, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "`{field}` must be larger or equal 0, got {value}")
            }
            Self::InvalidDate { input } => {
                write!(f, "`{input}` is not in a valid date format")
            }
            Self::UnknownEntity { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DeletedEntity { kind, id } => write!(f, "{kind} is deleted: {id}"),
            Self::LinkedInstance { kind, id } => {
                write!(f, "{kind} {id} is already linked to other entities")
            }
            Self::SupervisorCycle {
                employee,
                supervisor,
            } => write!(
                f,
                "supervisor {supervisor} would create a reporting cycle for employee {employee}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Checks that a required string is set.
///
/// Whitespace-only values count as empty. The value is returned as given
/// (not trimmed) so display output matches caller input.
pub fn require_text(field: &'static str, value: impl Into<String>) -> ValidationResult<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value)
}

/// Checks that a day count is strictly positive.
pub fn require_positive(field: &'static str, value: i64) -> ValidationResult<i64> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}

/// Checks that a day count is zero or positive.
pub fn require_non_negative(field: &'static str, value: i64) -> ValidationResult<i64> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{require_non_negative, require_positive, require_text, ValidationError};

    #[test]
    fn require_text_rejects_blank_values() {
        assert_eq!(
            require_text("name", "").unwrap_err(),
            ValidationError::EmptyField { field: "name" }
        );
        assert_eq!(
            require_text("name", " \t ").unwrap_err(),
            ValidationError::EmptyField { field: "name" }
        );
        assert_eq!(require_text("name", " a ").unwrap(), " a ");
    }

    #[test]
    fn numeric_range_checks() {
        assert!(require_positive("estimated_days", 0).is_err());
        assert!(require_positive("estimated_days", -1).is_err());
        assert_eq!(require_positive("estimated_days", 1).unwrap(), 1);

        assert_eq!(require_non_negative("slack_time", 0).unwrap(), 0);
        assert_eq!(
            require_non_negative("slack_time", -3).unwrap_err(),
            ValidationError::Negative {
                field: "slack_time",
                value: -3
            }
        );
    }

    #[test]
    fn display_names_the_field() {
        let err = require_positive("estimated_days", 0).unwrap_err();
        assert!(err.to_string().contains("estimated_days"));
    }
}
