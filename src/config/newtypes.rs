//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction so that handlers can
//! rely on the configuration without re-checking it per request.

use crate::error::ConfigError;
use std::fmt;

/// A validated Shopify API key (the app's client id).
///
/// # Example
///
/// ```rust
/// use shopify_app::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The shared secret used to sign install requests and webhooks.
///
/// The `Debug` implementation masks the value so the secret never ends up in
/// logs.
///
/// # Example
///
/// ```rust
/// use shopify_app::ApiSecretKey;
///
/// let secret = ApiSecretKey::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ApiSecretKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecretKey(String);

impl ApiSecretKey {
    /// Creates a new validated API secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiSecretKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiSecretKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiSecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecretKey(*****)")
    }
}

/// An absolute URL the app redirects to, such as the install callback or the
/// dashboard entry point.
///
/// Only the presence of a scheme and a host is checked; the URL is otherwise
/// kept exactly as configured, because the redirect builders insert it
/// verbatim.
///
/// # Example
///
/// ```rust
/// use shopify_app::RedirectUrl;
///
/// let url = RedirectUrl::new("https://myapp.example.com/install").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "myapp.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl RedirectUrl {
    /// Creates a new validated redirect URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRedirectUrl`] if the URL has no scheme or
    /// no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let invalid = || ConfigError::InvalidRedirectUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let host_end = url[host_start..]
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for RedirectUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RedirectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The app handle shown in the shop admin (`/admin/apps/{handle}`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppName(String);

impl AppName {
    /// Creates a new validated app name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppName`] if the name is empty or only
    /// whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyAppName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
