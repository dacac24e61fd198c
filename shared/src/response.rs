//! API Response types
//!
//! Response envelope shapes used by the reservation backend.

use serde::{Deserialize, Serialize};

/// Unified API response envelope
///
/// All successful responses follow this format:
/// ```json
/// {
///     "success": true,
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Success flag (some endpoints omit it; absent means true for 2xx)
    #[serde(default = "default_success")]
    pub success: bool,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }

    /// Create a bare success flag with no data
    pub fn flag(success: bool) -> Self {
        Self {
            success,
            data: None,
        }
    }
}

/// Error body carried with a non-2xx status
///
/// The backend always sends `message`; `code` is an optional machine
/// readable classifier (e.g. `"BOOKING_LIMIT"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_defaults_to_true() {
        let resp: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"data": ["a", "b"]}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap().len(), 2);
    }

    #[test]
    fn envelope_explicit_failure_flag() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_none());
    }

    #[test]
    fn error_body_parses_without_code() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "Not found"}"#).unwrap();
        assert_eq!(body.message, "Not found");
        assert!(body.code.is_none());
    }
}
