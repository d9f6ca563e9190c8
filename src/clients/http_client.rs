//! Authenticated HTTP client for the Shopify Admin API.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_response::HttpResponse;

/// Crate version, sent in the `User-Agent` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the offline access token of a store.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// HTTP client bound to one store and one API base path.
///
/// Every request carries `User-Agent`, `Accept: application/json` and the
/// store's access token. Failures are returned on the first attempt.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_app::clients::HttpClient;
///
/// let client = HttpClient::new(
///     "https://my-store.myshopify.com",
///     "/admin/api/2025-10",
///     "shpat_xxx",
/// )?;
///
/// let response = client.get("orders.json", &[("limit", "250".to_string())]).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for `base_uri` (scheme and host, no trailing slash)
    /// and `base_path` (e.g. `/admin/api/2025-10`).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialized.
    pub fn new(
        base_uri: impl Into<String>,
        base_path: impl Into<String>,
        access_token: &str,
    ) -> Result<Self, HttpError> {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("Shopify App Helpers v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        if !access_token.is_empty() {
            default_headers.insert(ACCESS_TOKEN_HEADER.to_string(), access_token.to_string());
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri: base_uri.into().trim_end_matches('/').to_string(),
            base_path: base_path.into(),
            default_headers,
        })
    }

    /// Returns the base URI.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a GET request to `{base_uri}{base_path}/{path}`.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Network`] if the request cannot be sent or read.
    /// - [`HttpError::Response`] for any non-2xx status.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, HttpError> {
        let url = format!("{}{}/{}", self.base_uri, self.base_path, path);

        let mut req_builder = self.client.get(&url).query(query);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).unwrap_or_else(|_| {
                if code >= 500 {
                    serde_json::json!({ "raw_body": body_text })
                } else {
                    serde_json::json!({})
                }
            })
        };

        let response = HttpResponse::new(code, res_headers, body);

        if let Some(reason) = response.deprecation_reason() {
            tracing::warn!(path, reason, "Deprecated request to Shopify API");
        }

        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code,
            message: response.serialize_error(),
            error_reference: response.request_id().map(String::from),
        }))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
