//! Error types for Smartsheet API operations.
//!
//! Every client operation returns [`ApiError`], classified so callers can
//! distinguish transient transport conditions from permanent request errors.

use thiserror::Error;

/// Errors returned by the Smartsheet API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP error response from the Smartsheet API.
    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    /// Request to the Smartsheet API timed out.
    #[error("Request timeout")]
    Timeout,

    /// The request was invalid (client error).
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The access token was rejected.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The requested resource was not found.
    #[error("Resource not found")]
    NotFound,

    /// Failed to parse a JSON response from the Smartsheet API.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP client error (network, TLS, etc.).
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

impl ApiError {
    /// Check if this error represents a transient condition that may succeed
    /// if retried.
    ///
    /// Transient conditions include:
    /// - Server errors (5xx)
    /// - Rate limiting (429)
    /// - Request timeouts
    /// - Network/transport errors
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpError { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout => true,
            Self::InvalidRequest { .. } => false,
            Self::AuthenticationFailed => false,
            Self::NotFound => false,
            Self::JsonError(_) => false,
            Self::HttpClientError(_) => true, // Network issues are transient
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
