//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORE_API_BASE_URL` - Base URL of the inventory/catalog service
//!   (e.g., <http://localhost:3333>)
//!
//! ## Optional
//! - `CART_STORAGE_PATH` - Path of the durable cart storage file
//!   (default: `rocket-cart.json` in the working directory)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the inventory/catalog service.
    pub api_base_url: Url,
    /// Path of the durable cart storage file.
    pub storage_path: PathBuf,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Loading a `.env` file (`dotenvy::dotenv()`) is left to the binary;
    /// this reads the process environment only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `STORE_API_BASE_URL` is missing or not a
    /// valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("STORE_API_BASE_URL")?;
        let api_base_url = parse_base_url("STORE_API_BASE_URL", &base_url)?;

        let storage_path =
            PathBuf::from(get_env_or_default("CART_STORAGE_PATH", "rocket-cart.json"));

        Ok(Self {
            api_base_url,
            storage_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate a base URL.
///
/// The URL must be absolute and must be able to serve as a base for
/// `stock/{id}` and `products/{id}` path segments.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }

    Ok(url)
}
