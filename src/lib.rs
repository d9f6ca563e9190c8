//! # Shopify App Helpers
//!
//! Building blocks for a web application that installs into Shopify stores:
//! request verification, install-flow redirect URLs, and a bulk order export.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`AppConfig`] and [`AppConfigBuilder`],
//!   loaded from the environment with [`AppConfig::from_env`]
//! - Guards for inbound traffic in [`verify`]: signed query strings
//!   (400 on a bad signature, 401 on a bad shop) and webhook bodies (401)
//! - Install, dashboard and post-install redirect URLs in [`auth`]
//! - Paginated order fetching into an [`orders::OrderTable`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_app::{AppConfig, ApiKey, ApiSecretKey, AppName, RedirectUrl};
//! use shopify_app::auth::{install_redirect_url, is_valid_shop};
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("your-secret").unwrap())
//!     .install_redirect_url(RedirectUrl::new("https://your-app.com/app_installed").unwrap())
//!     .dashboard_redirect_url(RedirectUrl::new("https://your-app.com").unwrap())
//!     .app_name(AppName::new("your-app").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let shop = "example-shop.myshopify.com";
//! assert!(is_valid_shop(shop));
//!
//! let url = install_redirect_url(&config, shop, &["read_orders"], "nonce123", &["per-user"]);
//! assert!(url.starts_with("https://example-shop.myshopify.com/admin/oauth/authorize?"));
//! ```
//!
//! ## Verifying Requests
//!
//! ```rust,ignore
//! use shopify_app::verify::{verify_web_call, verify_webhook_call, QueryParams, WebhookRequest};
//!
//! // App launch: GET /?shop=...&timestamp=...&hmac=...
//! let query = QueryParams::parse(raw_query);
//! match verify_web_call(&config, &query, || render_dashboard()) {
//!     Ok(page) => page,
//!     Err(e) => respond_with_status(e.status_code()),
//! }
//!
//! // Webhook: POST with X-Shopify-Hmac-Sha256
//! let request = WebhookRequest::from_parts(body, headers);
//! verify_webhook_call(&config, &request, |ctx| handle(ctx.topic()))?;
//! ```
//!
//! ## Exporting Orders
//!
//! ```rust,ignore
//! use shopify_app::orders::{fetch_all_orders, ShopifyStoreClient};
//!
//! let client = ShopifyStoreClient::new("example-shop.myshopify.com", &access_token, &config)?;
//! let table = fetch_all_orders(&client).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **No retries**: API failures are returned to the caller unchanged
//!
//! The crate emits [`tracing`] events and installs no subscriber.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod orders;
pub mod verify;

pub use config::{
    ApiKey, ApiSecretKey, ApiVersion, AppConfig, AppConfigBuilder, AppName, RedirectUrl,
};
pub use error::ConfigError;

pub use verify::{verify_web_call, verify_webhook_call, VerificationError};

pub use orders::{fetch_all_orders, FetchOrdersError, OrderSource, OrderTable, ShopifyStoreClient};
