//! Configuration file format.
//!
//! Every section is optional; missing keys fall back to the defaults
//! used by the hosted service.

use crate::capture::CaptureConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default REST API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Default location of matched images.
pub const DEFAULT_IMAGE_CDN_BASE: &str = "https://lumetryphotoshare.s3.us-east-2.amazonaws.com";

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    /// JPEG quality outside 1..=100.
    #[error("invalid JPEG quality {0} (must be 1-100)")]
    InvalidQuality(u8),
    /// Base URL is not an absolute http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The configuration file is not valid TOML.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// REST API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Camera settings.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Upload settings.
    #[serde(default)]
    pub submission: SubmissionConfig,
}

/// REST API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Prefix joined with each matched image key to build its URL.
    pub image_cdn_base: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            image_cdn_base: DEFAULT_IMAGE_CDN_BASE.to_string(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without a trailing slash.
    pub fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Checks that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

/// Attendee submission settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubmissionConfig {
    /// File name attached to the uploaded snapshot.
    pub image_filename: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            image_filename: "profile-image.jpg".to_string(),
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.capture.validate()
    }
}
