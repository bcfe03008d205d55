//! # Error Types
//!
//! Domain-specific error types for clerk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  clerk-core errors (this file)                                         │
//! │  ├── CoreError        - Cart / domain rule violations                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  clerk-api errors (separate crate)                                     │
//! │  └── ApiError         - Transport / HTTP status / decode failures      │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── AppError         - What the cashier sees (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → prompt                 │
//! │                          ApiError ──┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (name, counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Client-side business rule violations.
///
/// Every one of these blocks the attempted mutation and leaves local state
/// unchanged; none of them is fatal.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product has zero stock and cannot enter the cart.
    ///
    /// ## When This Occurs
    /// - `add_product` on a product whose last-fetched `stock` is 0
    #[error("Out of stock: {name}")]
    OutOfStock { name: String },

    /// Requested quantity exceeds the product's last-known stock.
    ///
    /// ## When This Occurs
    /// - Incrementing a cart line past the stock snapshot
    ///
    /// ## User Workflow
    /// ```text
    /// Cart line: qty 3, stock snapshot 3
    ///      │
    ///      ▼ "+" pressed
    /// InsufficientStock { name: "Coca-Cola 330ml", available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// Shell shows: "Not enough stock for Coca-Cola 330ml: 3 available"
    /// ```
    #[error("Not enough stock for {name}: {available} available, {requested} requested")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// No cart line exists for the given product id.
    #[error("Product not in cart: {product_id}")]
    NotInCart { product_id: String },

    /// Checkout requires at least one cart line.
    #[error("Cart is empty")]
    EmptyCart,

    /// A checkout submission is already in flight.
    ///
    /// The cart is an explicit Idle/Submitting state machine; a second
    /// checkout trigger while one is outstanding is rejected instead of
    /// racing the first.
    #[error("A checkout is already in progress")]
    CheckoutInProgress,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before a request is ever issued.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
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
            name: "Coca-Cola 330ml".to_string(),
            available: 3,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for Coca-Cola 330ml: 3 available, 4 requested"
        );

        let err = CoreError::OutOfStock {
            name: "Noodles".to_string(),
        };
        assert_eq!(err.to_string(), "Out of stock: Noodles");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
