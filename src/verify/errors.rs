//! Verification failure type.

use reqwest::StatusCode;
use thiserror::Error;

/// A rejected inbound request.
///
/// Each variant maps to the HTTP status the web layer should answer with, via
/// [`VerificationError::status_code`]. Messages are kept generic so they can
/// be returned to the caller without leaking what was expected.
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use shopify_app::verify::VerificationError;
///
/// assert_eq!(VerificationError::InvalidHmac.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(VerificationError::InvalidShop.status_code(), StatusCode::UNAUTHORIZED);
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// The query-string `hmac` is missing or does not match the parameters.
    #[error("Request signature verification failed")]
    InvalidHmac,

    /// The `shop` query parameter is not a `*.myshopify.com` domain.
    #[error("Shop domain is invalid")]
    InvalidShop,

    /// The webhook `X-Shopify-Hmac-Sha256` header is missing, malformed, or
    /// does not match the body.
    #[error("Webhook signature verification failed")]
    InvalidWebhookHmac,
}

impl VerificationError {
    /// Returns the HTTP status to reject the request with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidHmac => StatusCode::BAD_REQUEST,
            Self::InvalidShop | Self::InvalidWebhookHmac => StatusCode::UNAUTHORIZED,
        }
    }
}
