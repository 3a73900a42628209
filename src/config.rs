//! Deployment configuration
//!
//! The API root is read once at startup. `.env` files are honored by the
//! caller (`dotenvy::dotenv()` in `run`) before `from_env` is consulted.

use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const API_URL_VAR: &str = "API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid API url: {0}")]
  InvalidUrl(String),
}

/// ---------------------------------------------------------------------------
/// API Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
  /// Root for every relative endpoint
  pub api_url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      api_url: DEFAULT_API_URL.to_string(),
    }
  }
}

impl ApiConfig {
  pub fn new(api_url: impl Into<String>) -> Result<Self, ConfigError> {
    let api_url = api_url.into().trim().to_string();

    let parsed = Url::parse(&api_url).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", api_url, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
      return Err(ConfigError::InvalidUrl(format!(
        "{}: unsupported scheme {}",
        api_url,
        parsed.scheme()
      )));
    }

    Ok(Self { api_url })
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    let api_url = env::var(API_URL_VAR).map_err(|_| ConfigError::MissingConfig(API_URL_VAR.into()))?;
    Self::new(api_url)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
