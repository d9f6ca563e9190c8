//! Application configuration.
//!
//! The configuration is read once at startup, either from the process
//! environment via [`AppConfig::from_env`] or assembled with
//! [`AppConfigBuilder`], and is then passed by reference into every handler.
//!
//! # Environment Variables
//!
//! | Variable                 | Required | Field                     |
//! |--------------------------|----------|---------------------------|
//! | `SHOPIFY_API_KEY`        | yes      | [`AppConfig::api_key`]    |
//! | `SHOPIFY_SECRET`         | yes      | [`AppConfig::api_secret_key`] |
//! | `INSTALL_REDIRECT_URL`   | yes      | [`AppConfig::install_redirect_url`] |
//! | `DASHBOARD_REDIRECT_URL` | yes      | [`AppConfig::dashboard_redirect_url`] |
//! | `APP_NAME`               | yes      | [`AppConfig::app_name`]   |
//! | `SHOPIFY_OLD_SECRET`     | no       | [`AppConfig::old_api_secret_key`] |
//! | `SHOPIFY_API_VERSION`    | no       | [`AppConfig::api_version`] |
//!
//! [`AppConfig::from_env`] also reads a `.env` file when one is present;
//! [`AppConfig::from_env_file`] reads an explicit one.
//!
//! # Example
//!
//! ```rust
//! use shopify_app::{AppConfig, ApiKey, ApiSecretKey, AppName, RedirectUrl};
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("my-secret").unwrap())
//!     .install_redirect_url(RedirectUrl::new("https://myapp.example.com/app_installed").unwrap())
//!     .dashboard_redirect_url(RedirectUrl::new("https://myapp.example.com/dashboard").unwrap())
//!     .app_name(AppName::new("my-app").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, ApiSecretKey, AppName, RedirectUrl};
pub use version::ApiVersion;

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "SHOPIFY_API_KEY";
/// Environment variable holding the shared secret.
pub const ENV_SECRET: &str = "SHOPIFY_SECRET";
/// Environment variable holding the previous shared secret during rotation.
pub const ENV_OLD_SECRET: &str = "SHOPIFY_OLD_SECRET";
/// Environment variable holding the install callback URL.
pub const ENV_INSTALL_REDIRECT_URL: &str = "INSTALL_REDIRECT_URL";
/// Environment variable holding the dashboard URL.
pub const ENV_DASHBOARD_REDIRECT_URL: &str = "DASHBOARD_REDIRECT_URL";
/// Environment variable holding the app handle.
pub const ENV_APP_NAME: &str = "APP_NAME";
/// Environment variable overriding the Admin API version.
pub const ENV_API_VERSION: &str = "SHOPIFY_API_VERSION";

/// Process-wide, read-only application configuration.
///
/// # Key Rotation
///
/// When `old_api_secret_key` is set, HMAC verification tries the primary
/// secret first and falls back to the old one, so requests signed before a
/// secret rotation still verify.
#[derive(Clone, Debug)]
pub struct AppConfig {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
    old_api_secret_key: Option<ApiSecretKey>,
    install_redirect_url: RedirectUrl,
    dashboard_redirect_url: RedirectUrl,
    app_name: AppName,
    api_version: ApiVersion,
}

impl AppConfig {
    /// Creates a new builder for constructing an `AppConfig`.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }

    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the current directory or one of its parents is read
    /// first, if present. Variables already set in the environment are not
    /// overwritten by the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when a required variable is
    /// unset, [`ConfigError::EnvFile`] when a `.env` file exists but cannot be
    /// parsed, or the validation error of the offending value.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(error) if error.not_found() => {}
            Err(error) => {
                return Err(ConfigError::EnvFile {
                    path: ".env".to_string(),
                    message: error.to_string(),
                })
            }
        }
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Loads the configuration from the `.env`-format file at `path`.
    ///
    /// Non-blank process environment variables take precedence over the file.
    /// The process environment itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFile`] if the file cannot be read or parsed,
    /// otherwise the same errors as [`AppConfig::from_env`].
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_error = |error: dotenvy::Error| ConfigError::EnvFile {
            path: path.display().to_string(),
            message: error.to_string(),
        };

        let mut file_vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(file_error)? {
            let (key, value) = item.map_err(file_error)?;
            file_vars.insert(key, value);
        }

        Self::from_vars(|name| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .or_else(|| file_vars.get(name).cloned())
        })
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use shopify_app::AppConfig;
    ///
    /// let vars = HashMap::from([
    ///     ("SHOPIFY_API_KEY", "key"),
    ///     ("SHOPIFY_SECRET", "secret"),
    ///     ("INSTALL_REDIRECT_URL", "https://myapp.example.com/app_installed"),
    ///     ("DASHBOARD_REDIRECT_URL", "https://myapp.example.com"),
    ///     ("APP_NAME", "my-app"),
    /// ]);
    ///
    /// let config = AppConfig::from_vars(|name| vars.get(name).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.app_name().as_ref(), "my-app");
    /// ```
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::MissingEnvVar { name });

        let mut builder = Self::builder()
            .api_key(ApiKey::new(required(ENV_API_KEY)?)?)
            .api_secret_key(ApiSecretKey::new(required(ENV_SECRET)?)?)
            .install_redirect_url(RedirectUrl::new(required(ENV_INSTALL_REDIRECT_URL)?)?)
            .dashboard_redirect_url(RedirectUrl::new(required(ENV_DASHBOARD_REDIRECT_URL)?)?)
            .app_name(AppName::new(required(ENV_APP_NAME)?)?);

        if let Some(old_secret) = var(ENV_OLD_SECRET) {
            builder = builder.old_api_secret_key(ApiSecretKey::new(old_secret)?);
        }
        if let Some(version) = var(ENV_API_VERSION) {
            builder = builder.api_version(version.parse()?);
        }

        let config = builder.build()?;
        tracing::debug!(
            api_version = %config.api_version,
            key_rotation = config.old_api_secret_key.is_some(),
            "Loaded app configuration from environment"
        );
        Ok(config)
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the shared secret.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// Returns the previous shared secret, if configured.
    #[must_use]
    pub const fn old_api_secret_key(&self) -> Option<&ApiSecretKey> {
        self.old_api_secret_key.as_ref()
    }

    /// Returns the URL Shopify redirects to after the merchant grants access.
    #[must_use]
    pub const fn install_redirect_url(&self) -> &RedirectUrl {
        &self.install_redirect_url
    }

    /// Returns the app dashboard URL.
    #[must_use]
    pub const fn dashboard_redirect_url(&self) -> &RedirectUrl {
        &self.dashboard_redirect_url
    }

    /// Returns the app handle.
    #[must_use]
    pub const fn app_name(&self) -> &AppName {
        &self.app_name
    }

    /// Returns the Admin API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the secrets to try when verifying a signature, primary first.
    pub(crate) fn secrets(&self) -> impl Iterator<Item = &ApiSecretKey> {
        std::iter::once(&self.api_secret_key).chain(self.old_api_secret_key.as_ref())
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppConfig>();
};

/// Builder for constructing [`AppConfig`] instances.
///
/// All fields are required except `old_api_secret_key` (default `None`) and
/// `api_version` (default: latest stable).
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    old_api_secret_key: Option<ApiSecretKey>,
    install_redirect_url: Option<RedirectUrl>,
    dashboard_redirect_url: Option<RedirectUrl>,
    app_name: Option<AppName>,
    api_version: Option<ApiVersion>,
}

impl AppConfigBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the shared secret (required).
    #[must_use]
    pub fn api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(key);
        self
    }

    /// Sets the previous shared secret for key rotation.
    #[must_use]
    pub fn old_api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.old_api_secret_key = Some(key);
        self
    }

    /// Sets the install callback URL (required).
    #[must_use]
    pub fn install_redirect_url(mut self, url: RedirectUrl) -> Self {
        self.install_redirect_url = Some(url);
        self
    }

    /// Sets the dashboard URL (required).
    #[must_use]
    pub fn dashboard_redirect_url(mut self, url: RedirectUrl) -> Self {
        self.dashboard_redirect_url = Some(url);
        self
    }

    /// Sets the app handle (required).
    #[must_use]
    pub fn app_name(mut self, name: AppName) -> Self {
        self.app_name = Some(name);
        self
    }

    /// Sets the Admin API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Builds the [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] naming the first unset
    /// required field.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        Ok(AppConfig {
            api_key: self
                .api_key
                .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?,
            api_secret_key: self
                .api_secret_key
                .ok_or(ConfigError::MissingRequiredField {
                    field: "api_secret_key",
                })?,
            old_api_secret_key: self.old_api_secret_key,
            install_redirect_url: self.install_redirect_url.ok_or(
                ConfigError::MissingRequiredField {
                    field: "install_redirect_url",
                },
            )?,
            dashboard_redirect_url: self.dashboard_redirect_url.ok_or(
                ConfigError::MissingRequiredField {
                    field: "dashboard_redirect_url",
                },
            )?,
            app_name: self
                .app_name
                .ok_or(ConfigError::MissingRequiredField { field: "app_name" })?,
            api_version: self.api_version.unwrap_or_default(),
        })
    }
}
