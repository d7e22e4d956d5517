//! Service configuration.
//!
//! All fields carry serde defaults so an absent file or unset environment
//! still deserializes; [`ServiceConfig::validate`] then rejects combinations
//! the service cannot run with (missing token, unusable callback URL).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration value is invalid or missing.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Smartsheet access and webhook settings
    pub smartsheet: SmartsheetConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                message: "server.port must be non-zero".to_string(),
            });
        }

        if self.smartsheet.access_token.is_empty() {
            return Err(ConfigError::Invalid {
                message: "smartsheet.access_token is required \
                          (or set SMARTSHEET_ACCESS_TOKEN)"
                    .to_string(),
            });
        }

        if self.smartsheet.sheet_id == 0 {
            return Err(ConfigError::Invalid {
                message: "smartsheet.sheet_id is required".to_string(),
            });
        }

        if self.smartsheet.webhook_name.is_empty() {
            return Err(ConfigError::Invalid {
                message: "smartsheet.webhook_name must not be empty".to_string(),
            });
        }

        let callback_url =
            url::Url::parse(&self.smartsheet.callback_url).map_err(|e| ConfigError::Invalid {
                message: format!("smartsheet.callback_url is not a valid URL: {}", e),
            })?;
        if callback_url.scheme() != "https" && callback_url.scheme() != "http" {
            return Err(ConfigError::Invalid {
                message: format!(
                    "smartsheet.callback_url must be http(s), got '{}'",
                    callback_url.scheme()
                ),
            });
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout_seconds: 30,
        }
    }
}

/// Smartsheet access and webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartsheetConfig {
    /// API access token; falls back to SMARTSHEET_ACCESS_TOKEN in the binary
    pub access_token: String,

    /// Smartsheet API base URL
    pub api_url: String,

    /// Sheet to watch
    pub sheet_id: u64,

    /// Display name for this application's webhook subscription
    pub webhook_name: String,

    /// Publicly reachable callback URL for webhook delivery
    pub callback_url: String,
}

impl Default for SmartsheetConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_url: "https://api.smartsheet.com/2.0".to_string(),
            sheet_id: 0,
            webhook_name: "cell_watch".to_string(),
            callback_url: String::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
