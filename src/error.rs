//! # Client Error Types
//!
//! Unified error handling for all lunaql client operations.

use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Error types for client operations
///
/// Every failure surfaces through this enum: transport failures, non-success
/// API responses, response-shape violations, and local usage errors. The
/// client performs no retries of its own — recoverability is reported via
/// [`ClientError::is_recoverable`] so callers can decide.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },
}

impl ClientError {
    /// Create an API error from an HTTP response status and body
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create an invalid input error for caller-usage violations
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid response error for protocol violations
    ///
    /// Use this when a decoded response is missing a required field. This
    /// indicates a contract violation that must not be silently defaulted.
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is recoverable (worth retrying)
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::HttpError(e) => e.is_timeout() || e.is_connect(),
            ClientError::ApiError { status, .. } => *status >= 500,
            // Protocol violations are not recoverable - the server is broken
            ClientError::InvalidResponse { .. } => false,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ClientError::api_error(404, "collection not found");
        assert_eq!(error.to_string(), "API error: 404 - collection not found");
    }

    #[test]
    fn test_server_errors_are_recoverable() {
        assert!(ClientError::api_error(500, "boom").is_recoverable());
        assert!(ClientError::api_error(503, "unavailable").is_recoverable());
        assert!(!ClientError::api_error(400, "bad request").is_recoverable());
    }

    #[test]
    fn test_local_errors_are_not_recoverable() {
        assert!(!ClientError::invalid_input("list given to insert").is_recoverable());
        assert!(!ClientError::invalid_response("users", "missing field").is_recoverable());
        assert!(!ClientError::config_error("no endpoint").is_recoverable());
    }
}
