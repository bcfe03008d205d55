//! # App Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Clerk POS                              │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<(), AppError>                                                  │
//! │         │                                                               │
//! │         ├── CoreError (cart rules) ──────────┐                         │
//! │         ├── ApiError (HTTP/status/decode) ───┼──► AppError ──► prompt  │
//! │         └── Usage (bad arguments) ───────────┘                         │
//! │                                                                         │
//! │  Every failure prints one line and returns the shell to a usable       │
//! │  prompt. Unauthorized additionally means the session is already        │
//! │  cleared - the next protected command asks for login.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use clerk_api::ApiError;
use clerk_core::{CoreError, ValidationError};

/// API-style error surfaced at the prompt.
///
/// Carries both a machine-readable `code` (stable across message changes,
/// useful for scripted `--exec` runs) and a human-readable `message`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A protected command was used without a session
    NotLoggedIn,

    /// Login attempted while a session exists
    AlreadyLoggedIn,

    /// The server invalidated the session (401/403)
    Unauthorized,

    /// Input validation failed
    ValidationError,

    /// Cart rule violation (out of stock, empty cart, ...)
    CartError,

    /// The backend rejected the request or could not be reached
    ApiError,

    /// Entity not found locally (unknown id at the prompt)
    NotFound,

    /// Malformed command line
    Usage,

    /// Local I/O failed (config file, image file)
    Io,

    /// Anything unexpected
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a usage error (bad command line).
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Usage, message)
    }

    /// Creates a not-found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
    }

    /// Creates a not-logged-in error.
    pub fn not_logged_in() -> Self {
        AppError::new(ErrorCode::NotLoggedIn, "Please log in first (see `login`)")
    }

    /// Creates a local I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Io, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts cart/domain errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::Validation(_) => ErrorCode::ValidationError,
            _ => ErrorCode::CartError,
        };
        AppError::new(code, err.to_string())
    }
}

/// Converts API errors to app errors.
///
/// By the time `ApiError::Unauthorized` arrives here the session is already
/// cleared; the message tells the cashier to log in again.
impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let code = match &err {
            ApiError::Unauthorized => ErrorCode::Unauthorized,
            ApiError::Validation(_) => ErrorCode::ValidationError,
            _ => ErrorCode::ApiError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_its_own_code() {
        let app: AppError = ApiError::Unauthorized.into();
        assert_eq!(app.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_cart_errors_map_to_cart_code() {
        let app: AppError = CoreError::EmptyCart.into();
        assert_eq!(app.code, ErrorCode::CartError);
        assert_eq!(app.message, "Cart is empty");
    }

    #[test]
    fn test_validation_maps_through_core() {
        let app: AppError = CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(app.code, ErrorCode::ValidationError);
    }
}
