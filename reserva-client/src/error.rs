//! Client error types

use thiserror::Error;

/// Error code the backend sends when the per-user booking cap is hit
pub const BOOKING_LIMIT_CODE: &str = "BOOKING_LIMIT";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business-rule rejection (HTTP 400)
    #[error("Rejected: {message}")]
    Rejected {
        code: Option<String>,
        message: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the backend rejected a booking for exceeding the
    /// 3-booking cap. Classified by the structured code when present,
    /// with a substring fallback for backends that only send free text.
    pub fn is_booking_limit(&self) -> bool {
        match self {
            ClientError::Rejected { code, message } => {
                code.as_deref() == Some(BOOKING_LIMIT_CODE)
                    || message.contains("already made 3 bookings")
            }
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
