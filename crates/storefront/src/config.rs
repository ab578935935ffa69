//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ONYX_API_BASE_URL` - Base URL of the backend commerce API
//! - `ONYX_API_TOKEN` - Bearer token for the commerce API
//!
//! ## Optional
//! - `ONYX_DEFAULT_COUNTRY` - Country written on created shipping addresses
//!   (default: India). Country is a fixed default in the current scope, not
//!   shopper-selectable.

use core::fmt;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const ENV_API_BASE_URL: &str = "ONYX_API_BASE_URL";
const ENV_API_TOKEN: &str = "ONYX_API_TOKEN";
const ENV_DEFAULT_COUNTRY: &str = "ONYX_DEFAULT_COUNTRY";

const DEFAULT_COUNTRY: &str = "India";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is present but unusable.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend commerce API configuration.
    pub api: ApiConfig,
    /// Country written on created shipping addresses.
    pub default_country: String,
}

/// Backend commerce API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL; always normalized to end with a slash so endpoint paths
    /// join under it.
    pub base_url: Url,
    /// Bearer token.
    pub api_token: SecretString,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_base_url = lookup(ENV_API_BASE_URL)
            .ok_or_else(|| ConfigError::MissingEnvVar(ENV_API_BASE_URL.to_string()))?;
        let mut base_url = Url::parse(&raw_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar(ENV_API_BASE_URL.to_string(), e.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let api_token = lookup(ENV_API_TOKEN)
            .ok_or_else(|| ConfigError::MissingEnvVar(ENV_API_TOKEN.to_string()))?;
        if api_token.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                ENV_API_TOKEN.to_string(),
                "must not be empty".to_string(),
            ));
        }

        let default_country = lookup(ENV_DEFAULT_COUNTRY)
            .filter(|country| !country.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        Ok(Self {
            api: ApiConfig {
                base_url,
                api_token: SecretString::from(api_token),
            },
            default_country,
        })
    }
}
