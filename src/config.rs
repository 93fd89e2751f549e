//! # Database Configuration
//!
//! Connection settings for a LunaQL database: the HTTP endpoint of the
//! database, the API token, and the request timeout.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Configuration for connecting to a LunaQL database
///
/// # Examples
///
/// ```rust
/// use lunaql::DatabaseConfig;
///
/// let config = DatabaseConfig::new("https://eu-1.lunaql.com/db/test", "secret-token");
/// assert_eq!(config.timeout_ms, 30000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database endpoint URL (e.g., "<https://eu-1.lunaql.com/db/test>")
    pub endpoint: String,
    /// API authentication token, sent as a bearer token on every request
    pub token: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    30000
}

impl DatabaseConfig {
    /// Create a new configuration with the default timeout
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads `LUNAQL_ENDPOINT` and `LUNAQL_TOKEN` (both required) and
    /// `LUNAQL_TIMEOUT_MS` (optional). There are no default values for the
    /// endpoint or token, so a missing variable is a configuration error.
    pub fn from_env() -> ClientResult<Self> {
        let endpoint = std::env::var("LUNAQL_ENDPOINT")
            .map_err(|_| ClientError::config_error("LUNAQL_ENDPOINT is not set"))?;
        let token = std::env::var("LUNAQL_TOKEN")
            .map_err(|_| ClientError::config_error("LUNAQL_TOKEN is not set"))?;

        let mut config = Self::new(endpoint, token);
        if let Ok(timeout) = std::env::var("LUNAQL_TIMEOUT_MS") {
            if let Ok(timeout_ms) = timeout.parse() {
                config.timeout_ms = timeout_ms;
            }
        }

        Ok(config)
    }
}
