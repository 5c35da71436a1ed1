//! # Error Types
//!
//! Domain-specific error types for vela-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vela-core errors (this file)                                           │
//! │  ├── CoreError        - Cart and business rule violations               │
//! │  └── ValidationError  - Form-level input failures                       │
//! │                                                                         │
//! │  vela-engine errors (separate crate)                                    │
//! │  └── GatewayError     - Remote call failures, detail-preserving         │
//! │                                                                         │
//! │  vela-client errors (separate crate)                                    │
//! │  └── ClientError      - Transport, decoding, session storage            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → surfaced as a notification.        │
//! │  Cart errors are reported BEFORE any network call is made.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, stock counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and business logic errors.
///
/// These represent rule violations caught locally, before the backend is
/// ever contacted. They should be caught and shown as transient
/// notifications; none of them is fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Product has zero stock and cannot enter the cart at all.
    #[error("Product {code} is out of stock")]
    OutOfStock { code: String },

    /// Requested quantity exceeds the stock frozen on the cart line.
    ///
    /// ## No Partial Fill
    /// When an increment would overshoot, the WHOLE increment is rejected
    /// and the line keeps its previous quantity. The UI tells the user how
    /// much is actually available.
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// Cart has exceeded the maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the absolute cap.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form-level input validation errors.
///
/// These occur when user input doesn't meet local constraints (cedula
/// shape, password length, ...). They block submission and never reach the
/// network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Invalid format (e.g., non-digit cedula, malformed e-mail).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
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
        let err = CoreError::InsufficientStock {
            code: "CAM-042".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for CAM-042: available 3, requested 5"
        );

        let err = CoreError::OutOfStock {
            code: "CAM-042".to_string(),
        };
        assert_eq!(err.to_string(), "Product CAM-042 is out of stock");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "cedula" };
        assert_eq!(err.to_string(), "cedula is required");

        let err = ValidationError::TooShort {
            field: "password",
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required { field: "cedula" };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
