//! Query-string verification for install and app-launch requests.
//!
//! Shopify appends `hmac` to the query string of every request it sends the
//! merchant's browser through. The digest covers all other parameters,
//! sorted by key and joined as `key=value` pairs with `&`.
//!
//! A digest computed over the parameters in arrival order is rejected unless
//! that order happens to be sorted.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::auth::hmac::verify_with_config;
use crate::auth::is_valid_shop;
use crate::config::AppConfig;
use crate::verify::VerificationError;

/// Name of the query parameter carrying the signature.
pub const HMAC_PARAM: &str = "hmac";

/// Name of the query parameter carrying the shop domain.
pub const SHOP_PARAM: &str = "shop";

/// Decoded query parameters of an inbound request, in arrival order.
///
/// # Example
///
/// ```rust
/// use shopify_app::verify::QueryParams;
///
/// let query = QueryParams::parse("shop=foo.myshopify.com&timestamp=1337&hmac=abc");
/// assert_eq!(query.get("shop"), Some("foo.myshopify.com"));
/// assert_eq!(query.signable_string(), "shop=foo.myshopify.com&timestamp=1337");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    ///
    /// Keys and values are percent-decoded and `+` is read as a space, as
    /// HTML form encoding does. Segments that fail to decode are kept as-is.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let pairs = raw
            .trim_start_matches('?')
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();

        Self { pairs }
    }

    /// Appends a decoded key/value pair.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns an iterator over all pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds the string Shopify signs: every parameter except `hmac`, first
    /// value per key, sorted by key, joined as `key=value` with `&`.
    #[must_use]
    pub fn signable_string(&self) -> String {
        let mut first_values: BTreeMap<&str, &str> = BTreeMap::new();
        for (key, value) in self.iter().filter(|(key, _)| *key != HMAC_PARAM) {
            first_values.entry(key).or_insert(value);
        }

        first_values
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), Cow::into_owned)
}

/// Checks the signature and shop domain of an inbound query string.
///
/// # Errors
///
/// - [`VerificationError::InvalidHmac`] if `hmac` is absent or does not match
///   the other parameters under any configured secret.
/// - [`VerificationError::InvalidShop`] if a `shop` parameter is present and
///   is not a `*.myshopify.com` domain.
pub fn verify_query(config: &AppConfig, query: &QueryParams) -> Result<(), VerificationError> {
    let hmac = query.get(HMAC_PARAM).unwrap_or_default();
    let data = query.signable_string();

    if !verify_with_config(data.as_bytes(), hmac, config) {
        tracing::error!(hmac, data = %data, "HMAC could not be verified");
        return Err(VerificationError::InvalidHmac);
    }

    if let Some(shop) = query.get(SHOP_PARAM) {
        if !is_valid_shop(shop) {
            tracing::error!(shop, "Shop name received is invalid");
            return Err(VerificationError::InvalidShop);
        }
    }

    Ok(())
}

/// Runs `handler` only if the query string verifies.
///
/// This is the interceptor to put in front of install and app-launch routes.
/// The handler's return value is passed through; async handlers return a
/// future that the caller awaits after the check:
///
/// ```rust,ignore
/// let response = verify_web_call(&config, &query, || async {
///     render_dashboard(&query).await
/// })?
/// .await;
/// ```
///
/// # Errors
///
/// See [`verify_query`]. The handler is not called on error.
pub fn verify_web_call<F, T>(
    config: &AppConfig,
    query: &QueryParams,
    handler: F,
) -> Result<T, VerificationError>
where
    F: FnOnce() -> T,
{
    verify_query(config, query)?;
    Ok(handler())
}
