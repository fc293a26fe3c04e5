//! # Error Types
//!
//! Domain-specific error types for avquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  avquote-core errors (this file)                                       │
//! │  ├── CoreError        - Project input problems, with room/line context │
//! │  └── ValidationError  - Single-field validation failures               │
//! │                                                                         │
//! │  avquote-rates errors (separate crate)                                 │
//! │  └── RatesError       - Exchange-rate lookup failures                  │
//! │                                                                         │
//! │  avquote-export errors (separate crate)                                │
//! │  └── ExportError      - Workbook build / save failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI) → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing functions themselves never fail; these errors come only from
//! the caller-side checks in [`crate::validation`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Problems found in a project before it is priced.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A room-level field is invalid.
    #[error("Room '{room}': {source}")]
    InvalidRoom {
        room: String,
        source: ValidationError,
    },

    /// A line item is invalid.
    ///
    /// ## User Workflow
    /// ```text
    /// project.json ──► validate_project()
    ///                        │
    ///                        ▼
    /// InvalidLineItem { room: "Board Room", line: 3, quantity must be ... }
    ///                        │
    ///                        ▼
    /// CLI prints: "Room 'Board Room', line 3: quantity must be between 0 and 99999"
    /// ```
    #[error("Room '{room}', line {line}: {source}")]
    InvalidLineItem {
        room: String,
        /// 1-based, as shown in the Sr. No column.
        line: usize,
        source: ValidationError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidLineItem {
            room: "Board Room".to_string(),
            line: 3,
            source: ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: 99_999,
            },
        };
        assert_eq!(
            err.to_string(),
            "Room 'Board Room', line 3: quantity must be between 0 and 99999"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "room name".to_string(),
        };
        assert_eq!(err.to_string(), "room name is required");

        let err = ValidationError::MustBePositive {
            field: "exchange rate".to_string(),
        };
        assert_eq!(err.to_string(), "exchange rate must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "currency".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
