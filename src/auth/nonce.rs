//! Random `state` values for the install flow.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of nonces produced by [`generate_nonce`].
pub const NONCE_LENGTH: usize = 15;

/// Generates an alphanumeric nonce from a cryptographically secure RNG.
///
/// The caller stores the nonce (for example in a cookie) and passes it as the
/// `state` of [`install_redirect_url`](crate::auth::install_redirect_url), then
/// compares it to the `state` echoed back on the callback.
///
/// ```rust
/// use shopify_app::auth::{generate_nonce, NONCE_LENGTH};
///
/// let nonce = generate_nonce();
/// assert_eq!(nonce.len(), NONCE_LENGTH);
/// ```
#[must_use]
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}
