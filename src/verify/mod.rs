//! Request verification guards.
//!
//! Route handlers that receive traffic from Shopify wrap their body in one of
//! two guards, which reject the request before the handler runs:
//!
//! - [`verify_web_call`]: for browser redirects carrying a signed query string
//!   (install callback, app launch). Rejects with 400 on a bad signature and
//!   401 on an invalid `shop` parameter.
//! - [`verify_webhook_call`]: for webhook deliveries. Rejects with 401 on a bad
//!   body signature.
//!
//! The guards are framework-agnostic: the web layer converts its request into
//! [`QueryParams`] or [`WebhookRequest`] and maps a [`VerificationError`] to a
//! response with [`VerificationError::status_code`].
//!
//! # Example
//!
//! ```rust
//! use shopify_app::{AppConfig, ApiKey, ApiSecretKey, AppName, RedirectUrl};
//! use shopify_app::auth::hmac::compute_signature;
//! use shopify_app::verify::{verify_web_call, QueryParams};
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("secret").unwrap())
//!     .install_redirect_url(RedirectUrl::new("https://app.example.com/app_installed").unwrap())
//!     .dashboard_redirect_url(RedirectUrl::new("https://app.example.com").unwrap())
//!     .app_name(AppName::new("my-app").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let signed = "shop=foo.myshopify.com&timestamp=1337";
//! let hmac = compute_signature(signed.as_bytes(), "secret");
//! let query = QueryParams::parse(&format!("{signed}&hmac={hmac}"));
//!
//! let page = verify_web_call(&config, &query, || "welcome").unwrap();
//! assert_eq!(page, "welcome");
//!
//! let forged = QueryParams::parse("shop=foo.myshopify.com&timestamp=1337&hmac=00");
//! let err = verify_web_call(&config, &forged, || "welcome").unwrap_err();
//! assert_eq!(err.status_code().as_u16(), 400);
//! ```

mod errors;
mod query;
mod webhook;

pub use errors::VerificationError;
pub use query::{verify_query, verify_web_call, QueryParams, HMAC_PARAM, SHOP_PARAM};
pub use webhook::{
    verify_webhook, verify_webhook_call, WebhookContext, WebhookRequest, HEADER_API_VERSION,
    HEADER_HMAC, HEADER_SHOP_DOMAIN, HEADER_TOPIC, HEADER_WEBHOOK_ID,
};
