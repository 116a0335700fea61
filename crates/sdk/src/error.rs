//! Error types for the Zeus SDK.

use serde::{Deserialize, Serialize};
use zeus_core::{DecodeError, EncodeError, LogError};

/// Result type for SDK operations.
pub type ZeusResult<T> = Result<T, ZeusError>;

/// Error types that can occur when using the Zeus SDK.
#[derive(Debug, thiserror::Error)]
pub enum ZeusError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Metric series could not be encoded.
    #[error("Metric encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// Metric query response could not be decoded.
    #[error("Metric decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Log record rejected before sending.
    #[error("Invalid log: {0}")]
    InvalidLog(#[from] LogError),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No token configured; every endpoint is scoped by it.
    #[error("Token is required")]
    MissingToken,

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ZeusError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        // Try to parse as ErrorResponse
        let message = match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(ErrorResponse { error: Some(error) }) if !error.is_empty() => error,
            _ => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    reqwest::StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    text
                }
            }
        };

        Self::Api { status, message }
    }
}

/// Error payload returned by the Zeus API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_error_field() {
        let err = ZeusError::from_response(400, br#"{"successful": 0, "error": "bad metric"}"#);
        match err {
            ZeusError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad metric");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_response_plain_body() {
        let err = ZeusError::from_response(500, b"internal failure\n");
        assert_eq!(err.to_string(), "API error (status 500): internal failure");
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = ZeusError::from_response(400, b"");
        assert_eq!(err.to_string(), "API error (status 400): Bad Request");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_status_only_for_api_errors() {
        assert_eq!(ZeusError::MissingToken.status(), None);
    }
}
