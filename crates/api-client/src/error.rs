//! Error types for the API client

use std::time::Duration;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Fallback notice when an error carries no message
pub(crate) const GENERIC_NETWORK_MESSAGE: &str = "network error";

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// No HTTP exchange completed (connection refused, DNS, TLS, ...)
    #[error("{0}")]
    Network(String),

    /// No HTTP exchange completed within the configured timeout
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    /// The gateway answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        status_text: String,
        /// URL that was requested
        url: String,
        /// Raw response body
        body: String,
    },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The storefront service reported a failure inside a 2xx response
    #[error("Backend error ({code}): {message}")]
    Backend {
        /// Application-level result code
        code: i32,
        /// Message from the service
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request could not be assembled (bad URL, header name or header value)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a backend result error
    pub fn backend(code: i32, message: impl Into<String>) -> Self {
        Self::Backend {
            code,
            message: message.into(),
        }
    }

    /// HTTP status of the response, if one was received
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the gateway rejected the session (401)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Check if this is a timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }

    /// Message shown to the user when no status-specific notice applies
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_NETWORK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            let detail = match std::error::Error::source(&err) {
                Some(source) => format!("{err}: {source}"),
                None => err.to_string(),
            };
            Self::InvalidRequest(detail)
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            status_text: String::new(),
            url: "/api/test".to_string(),
            body: String::new(),
        }
    }

    #[test]
    fn test_status_classification() {
        assert!(http(401).is_unauthorized());
        assert!(http(404).is_client_error());
        assert!(!http(404).is_server_error());
        assert!(http(503).is_server_error());
        assert_eq!(ApiError::Network("refused".into()).status(), None);
    }

    #[test]
    fn test_timeout_message() {
        let err = ApiError::Timeout(Duration::from_secs(10));
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "timeout of 10000ms exceeded");
    }

    #[test]
    fn test_user_message_falls_back_when_empty() {
        assert_eq!(ApiError::Network(String::new()).user_message(), "network error");
        assert_eq!(
            http(404).user_message(),
            "Request failed with status code 404"
        );
    }
}
