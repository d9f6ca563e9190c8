//! Install-flow helpers: HMAC primitives, shop validation and redirect URLs.
//!
//! # Overview
//!
//! - [`hmac`]: HMAC-SHA256 digests and constant-time comparison
//! - [`is_valid_shop`]: `*.myshopify.com` domain check
//! - [`install_redirect_url`], [`dashboard_redirect_url`],
//!   [`post_install_redirect_url`]: redirect targets of the install flow
//! - [`generate_nonce`]: random `state` values
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_app::auth::{generate_nonce, install_redirect_url, is_valid_shop};
//!
//! if is_valid_shop(shop) {
//!     let nonce = generate_nonce();
//!     // store nonce in a cookie, then redirect
//!     let url = install_redirect_url(&config, shop, &["read_orders"], &nonce, &["per-user"]);
//! }
//! ```

pub mod hmac;
mod nonce;
mod redirect;
mod shop;

pub use nonce::{generate_nonce, NONCE_LENGTH};
pub use redirect::{dashboard_redirect_url, install_redirect_url, post_install_redirect_url};
pub use shop::is_valid_shop;
