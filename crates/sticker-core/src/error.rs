//! # Error Types
//!
//! Domain-specific error types for sticker-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sticker-core errors (this file)                                       │
//! │  ├── CoreError        - Table and coverage errors                      │
//! │  └── ValidationError  - Raw input validation failures                  │
//! │                                                                         │
//! │  quote boundary (quote.rs)                                             │
//! │  └── ApiError         - What the storefront sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Storefront             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine's computation path never produces an error. Everything here is
//! raised either while loading tables or while validating raw input before
//! the engine is called.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The loaded tables have no entry for a material, shape or size.
    ///
    /// ## When This Occurs
    /// - Alternate tables omit a material the storefront still offers
    /// - Strict coverage check at the quote boundary
    ///
    /// The engine itself never raises this; it prices missing keys at
    /// baseline.
    #[error("No {kind} entry for '{key}' in the pricing tables")]
    UnknownCoefficientKey { kind: String, key: String },

    /// Pricing tables violate an engine invariant.
    ///
    /// ## When This Occurs
    /// - Discount ladder is not ascending
    /// - A discount decreases as quantity grows
    /// - Base price map is empty
    #[error("Invalid pricing tables: {reason}")]
    InvalidTables { reason: String },

    /// Pricing tables could not be parsed.
    #[error("Malformed pricing tables: {0}")]
    TablesFormat(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn invalid_tables(reason: impl Into<String>) -> Self {
        CoreError::InvalidTables {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary before any price is computed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., "12.5" for a quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
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
        let err = CoreError::UnknownCoefficientKey {
            kind: "material".to_string(),
            key: "mirror-vinyl".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No material entry for 'mirror-vinyl' in the pricing tables"
        );

        let err = CoreError::invalid_tables("quantity tiers are empty");
        assert_eq!(
            err.to_string(),
            "Invalid pricing tables: quantity tiers are empty"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 5,
            max: 1000,
        };
        assert_eq!(err.to_string(), "quantity must be between 5 and 1000");
        assert_eq!(err.field(), "quantity");

        let err = ValidationError::Required {
            field: "shape".to_string(),
        };
        assert_eq!(err.to_string(), "shape is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
