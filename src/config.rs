//! Configuration module for the tracking client.
//!
//! This module provides environment-based configuration, including the project
//! identifier, collection endpoint, request timeout and click envelope shape.

use std::env;
use std::time::Duration;

use crate::event::ClickShape;

/// Default collection endpoint
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8080/api/v1/public/event";

/// Minimum request timeout accepted from the environment
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout accepted from the environment
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

const PROJECT_ID_VAR: &str = "TRACKING_CLIENT_PROJECT_ID";
const ENDPOINT_URL_VAR: &str = "TRACKING_CLIENT_ENDPOINT_URL";
const REQUEST_TIMEOUT_VAR: &str = "TRACKING_CLIENT_REQUEST_TIMEOUT_SECS";
const CLICK_SHAPE_VAR: &str = "TRACKING_CLIENT_CLICK_SHAPE";

/// Configuration for the tracking client.
///
/// All settings can be configured via environment variables:
/// - `TRACKING_CLIENT_PROJECT_ID`: Project identifier (no default)
/// - `TRACKING_CLIENT_ENDPOINT_URL`: Collection endpoint (default: http://localhost:8080/api/v1/public/event)
/// - `TRACKING_CLIENT_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: transport default)
/// - `TRACKING_CLIENT_CLICK_SHAPE`: `nested` or `flat` (default: nested)
#[derive(Debug, Clone)]
pub struct Config {
    /// Project identifier attached to every envelope
    pub project_id: Option<String>,

    /// Full URL of the collection endpoint
    pub endpoint_url: String,

    /// Optional HTTP request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,

    /// Layout of click envelopes
    pub click_shape: ClickShape,
}

/// Error type for configuration loading failures
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
    pub env_var: Option<String>,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.env_var {
            Some(var) => write!(f, "Configuration error for {}: {}", var, self.message),
            None => write!(f, "Configuration error: {}", self.message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Create a configuration for the given project with default settings.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults. A missing project id is not an
    /// error here; client construction rejects it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `TRACKING_CLIENT_REQUEST_TIMEOUT_SECS` is not a valid number or is out of range
    /// - `TRACKING_CLIENT_CLICK_SHAPE` is neither `nested` nor `flat`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tracking_client::config::Config;
    ///
    /// let config = Config::from_env().expect("Failed to load config");
    /// println!("Endpoint: {}", config.endpoint_url);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = env::var(PROJECT_ID_VAR).ok();

        // Empty override keeps the default
        let endpoint_url = env::var(ENDPOINT_URL_VAR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string());

        let request_timeout = Self::parse_request_timeout()?;
        let click_shape = Self::parse_click_shape()?;

        Ok(Self {
            project_id,
            endpoint_url,
            request_timeout,
            click_shape,
        })
    }

    /// Parse request timeout from environment variable with validation.
    fn parse_request_timeout() -> Result<Option<Duration>, ConfigError> {
        match env::var(REQUEST_TIMEOUT_VAR) {
            Ok(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| ConfigError {
                    message: format!("'{}' is not a valid number", value),
                    env_var: Some(REQUEST_TIMEOUT_VAR.to_string()),
                })?;

                if secs < MIN_REQUEST_TIMEOUT_SECS {
                    return Err(ConfigError {
                        message: format!(
                            "request timeout {} is below minimum ({}s)",
                            secs, MIN_REQUEST_TIMEOUT_SECS
                        ),
                        env_var: Some(REQUEST_TIMEOUT_VAR.to_string()),
                    });
                }

                if secs > MAX_REQUEST_TIMEOUT_SECS {
                    return Err(ConfigError {
                        message: format!(
                            "request timeout {} exceeds maximum ({}s)",
                            secs, MAX_REQUEST_TIMEOUT_SECS
                        ),
                        env_var: Some(REQUEST_TIMEOUT_VAR.to_string()),
                    });
                }

                Ok(Some(Duration::from_secs(secs)))
            }
            Err(_) => Ok(None),
        }
    }

    /// Parse click shape from environment variable.
    fn parse_click_shape() -> Result<ClickShape, ConfigError> {
        match env::var(CLICK_SHAPE_VAR) {
            Ok(value) => value.parse().map_err(|message| ConfigError {
                message,
                env_var: Some(CLICK_SHAPE_VAR.to_string()),
            }),
            Err(_) => Ok(ClickShape::default()),
        }
    }
}

impl Default for Config {
    /// Default configuration without a project id.
    fn default() -> Self {
        Self {
            project_id: None,
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            request_timeout: None,
            click_shape: ClickShape::default(),
        }
    }
}
