//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured process fails at startup rather than on the first request.
//!
//! # Example
//!
//! ```rust
//! use shopify_app::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building an [`AppConfig`](crate::AppConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Shopify API key.")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key cannot be empty. Please provide a valid Shopify API secret key.")]
    EmptyApiSecretKey,

    /// App name cannot be empty.
    #[error("App name cannot be empty. Please provide the app handle used in the Shopify admin.")]
    EmptyAppName,

    /// A redirect URL is invalid.
    #[error("Invalid redirect URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://myapp.example.com/install').")]
    InvalidRedirectUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable: '{name}'.")]
    MissingEnvVar {
        /// The name of the environment variable.
        name: &'static str,
    },

    /// A `.env` file could not be read or parsed.
    #[error("Failed to load environment file '{path}': {message}")]
    EnvFile {
        /// Path of the file.
        path: String,
        /// The underlying read or parse error.
        message: String,
    },
}
