//! Configuration for the Eleme API client
//!
//! Supports environment-based configuration and TOML files with sensible
//! defaults pointing at a locally running gateway.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default gateway address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Gateway base URL; endpoint paths are appended to it
    pub base_url: String,
    /// Request timeout
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("eleme-api-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `ELEME_API_URL`: gateway base URL
    /// - `ELEME_TIMEOUT_SECS`: request timeout in seconds
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> ApiResult<Self> {
        Self::default().merge_env()
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_toml_file(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ApiError::config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        config.merge_env()
    }

    fn merge_env(mut self) -> ApiResult<Self> {
        if let Ok(url) = env::var("ELEME_API_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }

        if let Some(secs) = env::var("ELEME_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.timeout = Duration::from_secs(secs);
        }

        self.validate()?;
        Ok(self)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Join an endpoint path onto the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8888");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("eleme-api-client/"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://gateway.example.com")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.base_url, "https://gateway.example.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_url_for_joins_slashes() {
        let config = ClientConfig::default().with_base_url("http://localhost:8888/");
        assert_eq!(
            config.url_for("/api/user/info"),
            "http://localhost:8888/api/user/info"
        );
        assert_eq!(
            config.url_for("api/user/info"),
            "http://localhost:8888/api/user/info"
        );
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(
            ClientConfig::default()
                .with_base_url("ftp://localhost")
                .validate()
                .is_err()
        );
        assert!(
            ClientConfig::default()
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_toml_roundtrip_fields() {
        let toml_src = r#"
            base_url = "http://gateway.internal:9000"
            timeout_secs = 25
        "#;
        let config: ClientConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.base_url, "http://gateway.internal:9000");
        assert_eq!(config.timeout, Duration::from_secs(25));
        assert_eq!(config.user_agent, ClientConfig::default().user_agent);
    }

    #[test]
    fn test_from_toml_file_rejects_invalid_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"localhost\"").unwrap();

        if std::env::var("ELEME_API_URL").is_err() {
            assert!(ClientConfig::from_toml_file(file.path()).is_err());
        }
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = ClientConfig::from_toml_file("/nonexistent/eleme.toml").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
