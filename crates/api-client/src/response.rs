//! Response envelopes and the storefront result wrapper

use crate::error::{ApiError, ApiResult};
use crate::request::Headers;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A completed HTTP exchange, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase
    pub status_text: String,
    /// Response headers
    pub headers: Headers,
    /// Raw body text
    pub body: String,
    /// URL that produced this response
    pub url: String,
}

impl ResponseEnvelope {
    /// 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Turn a non-2xx response into an [`ApiError::Http`]
    #[must_use]
    pub fn into_error(self) -> ApiError {
        ApiError::Http {
            status: self.status,
            status_text: self.status_text,
            url: self.url,
            body: self.body,
        }
    }
}

/// Result code the storefront services use for success
pub const SUCCESS_CODE: i32 = 200;

/// Standard wrapper every storefront service answers with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Application-level result code (200 on success)
    pub code: i32,
    /// Human-readable outcome
    #[serde(default)]
    pub message: Option<String>,
    /// Payload
    pub data: Option<T>,
    /// Server time in epoch milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl<T> ApiResponse<T> {
    /// Whether the service reported success
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Unwrap the payload, turning a failure code into [`ApiError::Backend`]
    ///
    /// A successful response without payload yields `None`.
    pub fn into_data(self) -> ApiResult<Option<T>> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::backend(
                self.code,
                self.message.unwrap_or_default(),
            ))
        }
    }
}
