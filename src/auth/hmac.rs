//! HMAC-SHA256 signing and verification.
//!
//! Shopify signs install/launch query strings and webhook bodies with the app's
//! shared secret. Both verifiers in [`crate::verify`] reduce to the
//! comparison implemented here: compute the hex digest of the signed bytes and
//! compare it against the digest the platform sent.
//!
//! # Security
//!
//! All digest comparisons are constant-time. Verification against an
//! [`AppConfig`] also tries the old secret when one is configured.
//!
//! # Example
//!
//! ```rust
//! use shopify_app::auth::hmac::{compute_signature, verify_hmac};
//!
//! let digest = compute_signature(b"message", "key");
//! assert_eq!(
//!     digest,
//!     "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
//! );
//! assert!(verify_hmac(b"message", &digest, "key"));
//! ```

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::AppConfig;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(message: &[u8], secret: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    mac
}

/// Computes the lowercase hex HMAC-SHA256 digest of `message` under `secret`.
#[must_use]
pub fn compute_signature(message: &[u8], secret: &str) -> String {
    hex::encode(mac_for(message, secret).finalize().into_bytes())
}

/// Computes the base64 HMAC-SHA256 digest of `message`, the form Shopify puts
/// in the `X-Shopify-Hmac-Sha256` webhook header.
///
/// ```rust
/// use shopify_app::auth::hmac::compute_signature_base64;
///
/// let sig = compute_signature_base64(b"message", "key");
/// assert_eq!(sig, "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo=");
/// ```
#[must_use]
pub fn compute_signature_base64(message: &[u8], secret: &str) -> String {
    BASE64_STANDARD.encode(mac_for(message, secret).finalize().into_bytes())
}

/// Compares two strings in constant time.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Returns `true` if `expected_hex` is the HMAC-SHA256 hex digest of `data`
/// under `secret`.
///
/// The supplied digest is compared case-sensitively, as Shopify always sends
/// lowercase hex.
#[must_use]
pub fn verify_hmac(data: &[u8], expected_hex: &str, secret: &str) -> bool {
    constant_time_compare(&compute_signature(data, secret), expected_hex)
}

/// Verifies `expected_hex` against every secret in `config`, primary first.
#[must_use]
pub fn verify_with_config(data: &[u8], expected_hex: &str, config: &AppConfig) -> bool {
    config
        .secrets()
        .any(|secret| verify_hmac(data, expected_hex, secret.as_ref()))
}
