//! Error types for the RDS client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the RDS client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a complete response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error code and message reported by the service
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Endpoint URL is unusable
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request could not be signed
    #[error("Failed to sign request: {0}")]
    SigningFailed(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if the service reported that the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::api_error(404, "DBInstanceNotFound: DBInstance db-1 not found.");
        assert_eq!(
            err.to_string(),
            "API error (status 404): DBInstanceNotFound: DBInstance db-1 not found."
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_forbidden_is_not_not_found() {
        assert!(!ClientError::api_error(403, "denied").is_not_found());
        assert!(!ClientError::ParseError("bad".to_string()).is_not_found());
    }
}
