//! Shop domain validation.

use std::sync::OnceLock;

use regex::Regex;

// Shopify documents this pattern with a required protocol, but the `shop`
// query parameter never carries one.
const SHOP_DOMAIN_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9\-]*\.myshopify\.com/?$";

fn shop_domain_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(SHOP_DOMAIN_PATTERN).expect("shop domain pattern is valid"))
}

/// Returns `true` if `shop` is a `*.myshopify.com` domain.
///
/// The shop name must start with an ASCII letter or digit and may continue
/// with letters, digits and hyphens. A single trailing slash is tolerated.
///
/// # Example
///
/// ```rust
/// use shopify_app::auth::is_valid_shop;
///
/// assert!(is_valid_shop("foo-bar.myshopify.com"));
/// assert!(is_valid_shop("foo-bar.myshopify.com/"));
/// assert!(!is_valid_shop("foo_bar.evilhost.com"));
/// assert!(!is_valid_shop("myshopify.com"));
/// ```
#[must_use]
pub fn is_valid_shop(shop: &str) -> bool {
    shop_domain_regex().is_match(shop)
}
