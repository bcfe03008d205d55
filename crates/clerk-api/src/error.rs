//! # API Error Types
//!
//! Error types for backend API operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Transport error (reqwest::Error)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (this module) ← categorizes and keeps the server's message   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (terminal app) ← code + message at the prompt                │
//! │                                                                         │
//! │  401/403 are special: the session is cleared BEFORE the error          │
//! │  surfaces, so by the time the caller sees Unauthorized the local       │
//! │  state is already logged out.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Backend API operation errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 401 or 403.
    ///
    /// ## When This Occurs
    /// - Expired or revoked token
    /// - No token at all on a protected endpoint
    ///
    /// The local session has already been cleared when this error is
    /// returned; this is the only mechanism that detects token expiry.
    #[error("Session expired or unauthorized - please log in again")]
    Unauthorized,

    /// Any other non-success status.
    ///
    /// `message` is the server-provided `{"message": ...}` body when
    /// present, otherwise a generic fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connection refused, DNS,
    /// timeout at the transport layer).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected schema.
    ///
    /// ## When This Occurs
    /// - Backend contract drift
    /// - A proxy answering with HTML instead of JSON
    #[error("Unexpected response from {context}: {detail}")]
    Decode { context: String, detail: String },

    /// The configured base URL could not be parsed or joined.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The session file could not be read or written.
    #[error("Session storage failed: {0}")]
    SessionStore(String),

    /// Client-side validation rejected the input before any request.
    #[error("Validation error: {0}")]
    Validation(#[from] clerk_core::ValidationError),
}

impl ApiError {
    /// Creates a decode error with endpoint context.
    pub fn decode(context: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            context: context.into(),
            detail: detail.to_string(),
        }
    }

    /// True when this error forced a logout.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_server_message() {
        let err = ApiError::Status {
            status: 400,
            message: "Not enough stock".to_string(),
        };
        assert_eq!(err.to_string(), "Not enough stock");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized_flag() {
        assert!(ApiError::Unauthorized.is_unauthorized());
    }

    #[test]
    fn test_validation_converts() {
        let err: ApiError = clerk_core::ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
