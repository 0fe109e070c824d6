//! Shared error type across paywire crates.

use thiserror::Error;

/// Stable error codes (used in logs and webhook error bodies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing, malformed or mismatched signature.
    Signature,
    /// Malformed envelope or correlation id mismatch.
    Data,
    /// Structural constraint violation in a payload.
    Validation,
    /// Transport I/O failure.
    Connection,
    /// Remote returned a structured error.
    ErrorResponse,
    /// Remote accepted the call but declined the business operation.
    Rejection,
    /// No listener (and no fallback) for a notification method.
    NoListener,
    /// No client is registered to receive notifications.
    NoClient,
    /// Listeners ran but none of them answered.
    NoResponse,
    /// Inconsistent setup (keys, settings, listener registration).
    Config,
}

impl ErrorCode {
    /// String representation used in error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Signature => "SIGNATURE",
            ErrorCode::Data => "DATA",
            ErrorCode::Validation => "VALIDATION",
            ErrorCode::Connection => "CONNECTION",
            ErrorCode::ErrorResponse => "ERROR_RESPONSE",
            ErrorCode::Rejection => "REJECTION",
            ErrorCode::NoListener => "NO_LISTENER",
            ErrorCode::NoClient => "NO_CLIENT",
            ErrorCode::NoResponse => "NO_RESPONSE",
            ErrorCode::Config => "CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PaywireError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum PaywireError {
    #[error("signature error: {0}")]
    Signature(String),
    #[error("data error: {0}")]
    Data(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("error response {code}: {message}")]
    ErrorResponse { code: i64, message: String },
    #[error("rejected: {reason}")]
    Rejection { reason: String },
    #[error("no listener for notification method '{0}'")]
    NoListener(String),
    #[error("no client registered for notifications")]
    NoClient,
    #[error("no listener responded to notification '{0}'")]
    NoResponse(String),
    #[error("config error: {0}")]
    Config(String),
}

impl PaywireError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaywireError::Signature(_) => ErrorCode::Signature,
            PaywireError::Data(_) => ErrorCode::Data,
            PaywireError::Validation(_) => ErrorCode::Validation,
            PaywireError::Connection(_) => ErrorCode::Connection,
            PaywireError::ErrorResponse { .. } => ErrorCode::ErrorResponse,
            PaywireError::Rejection { .. } => ErrorCode::Rejection,
            PaywireError::NoListener(_) => ErrorCode::NoListener,
            PaywireError::NoClient => ErrorCode::NoClient,
            PaywireError::NoResponse(_) => ErrorCode::NoResponse,
            PaywireError::Config(_) => ErrorCode::Config,
        }
    }
}
