//! Webhook signature verification.
//!
//! Shopify signs each webhook delivery with HMAC-SHA256 over the raw request
//! body and sends the base64 digest in the `X-Shopify-Hmac-Sha256` header.

use base64::prelude::*;

use crate::auth::hmac::verify_with_config;
use crate::config::AppConfig;
use crate::verify::VerificationError;

/// HTTP header carrying the base64 HMAC-SHA256 of the body.
pub const HEADER_HMAC: &str = "X-Shopify-Hmac-Sha256";

/// HTTP header carrying the webhook topic (e.g. `orders/create`).
pub const HEADER_TOPIC: &str = "X-Shopify-Topic";

/// HTTP header carrying the shop's myshopify.com domain.
pub const HEADER_SHOP_DOMAIN: &str = "X-Shopify-Shop-Domain";

/// HTTP header carrying the API version of the payload.
pub const HEADER_API_VERSION: &str = "X-Shopify-API-Version";

/// HTTP header carrying the unique delivery id.
pub const HEADER_WEBHOOK_ID: &str = "X-Shopify-Webhook-Id";

/// An inbound webhook delivery: the raw body plus its headers.
///
/// The body is kept as bytes so the digest is computed over exactly what was
/// received. Header names are matched case-insensitively.
///
/// # Example
///
/// ```rust
/// use shopify_app::verify::WebhookRequest;
///
/// let request = WebhookRequest::new(b"{}".to_vec())
///     .with_header("x-shopify-topic", "orders/create");
///
/// assert_eq!(request.header("X-Shopify-Topic"), Some("orders/create"));
/// assert_eq!(request.body(), b"{}");
/// ```
#[derive(Clone, Debug, Default)]
pub struct WebhookRequest {
    body: Vec<u8>,
    headers: Vec<(String, String)>,
}

impl WebhookRequest {
    /// Creates a request with the given raw body and no headers.
    #[must_use]
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            body,
            headers: Vec::new(),
        }
    }

    /// Creates a request from a raw body and any collection of headers.
    #[must_use]
    pub fn from_parts<I, K, V>(body: Vec<u8>, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            body,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the first value of the header `name`, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Metadata of a webhook whose signature has been verified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WebhookContext {
    topic: Option<String>,
    shop_domain: Option<String>,
    api_version: Option<String>,
    webhook_id: Option<String>,
}

impl WebhookContext {
    fn from_request(request: &WebhookRequest) -> Self {
        let header = |name| request.header(name).map(String::from);
        Self {
            topic: header(HEADER_TOPIC),
            shop_domain: header(HEADER_SHOP_DOMAIN),
            api_version: header(HEADER_API_VERSION),
            webhook_id: header(HEADER_WEBHOOK_ID),
        }
    }

    /// Returns the topic, e.g. `orders/create`.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Returns the shop domain the webhook is about.
    #[must_use]
    pub fn shop_domain(&self) -> Option<&str> {
        self.shop_domain.as_deref()
    }

    /// Returns the API version of the payload.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Returns the delivery id, useful for de-duplicating retries.
    #[must_use]
    pub fn webhook_id(&self) -> Option<&str> {
        self.webhook_id.as_deref()
    }
}

/// Verifies the body signature of a webhook delivery.
///
/// The header digest is base64-decoded to hex and compared against the hex
/// HMAC of the body under each configured secret.
///
/// # Errors
///
/// Returns [`VerificationError::InvalidWebhookHmac`] if the header is missing,
/// is not valid base64, or does not match the body.
pub fn verify_webhook(
    config: &AppConfig,
    request: &WebhookRequest,
) -> Result<WebhookContext, VerificationError> {
    let Some(encoded_hmac) = request.header(HEADER_HMAC) else {
        tracing::error!("Webhook is missing the {HEADER_HMAC} header");
        return Err(VerificationError::InvalidWebhookHmac);
    };

    let hmac = match BASE64_STANDARD.decode(encoded_hmac.trim()) {
        Ok(bytes) => hex::encode(bytes),
        Err(error) => {
            tracing::error!(hmac = encoded_hmac, %error, "Webhook HMAC is not valid base64");
            return Err(VerificationError::InvalidWebhookHmac);
        }
    };

    if !verify_with_config(request.body(), &hmac, config) {
        tracing::error!(
            hmac = %hmac,
            data = %String::from_utf8_lossy(request.body()),
            "HMAC could not be verified"
        );
        return Err(VerificationError::InvalidWebhookHmac);
    }

    Ok(WebhookContext::from_request(request))
}

/// Runs `handler` with the verified webhook context only if the body
/// signature verifies.
///
/// # Errors
///
/// See [`verify_webhook`]. The handler is not called on error.
pub fn verify_webhook_call<F, T>(
    config: &AppConfig,
    request: &WebhookRequest,
    handler: F,
) -> Result<T, VerificationError>
where
    F: FnOnce(WebhookContext) -> T,
{
    let context = verify_webhook(config, request)?;
    Ok(handler(context))
}
