//! Redirect URL builders for the app installation flow.
//!
//! The install flow bounces the merchant between Shopify and the app three
//! times:
//!
//! 1. [`install_redirect_url`]: send the merchant to the shop's OAuth grant
//!    screen.
//! 2. [`dashboard_redirect_url`]: after the grant, send them to the app
//!    dashboard with the shop and state attached.
//! 3. [`post_install_redirect_url`]: send them back into the shop admin where
//!    the app is embedded.
//!
//! All three are plain formatting over already validated inputs. Values are
//! inserted verbatim.

use crate::config::AppConfig;

fn join_comma<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Builds the OAuth authorization URL for `shop`.
///
/// `scopes` and `access_mode` are joined with commas, in the order given. Pass
/// `["per-user"]` as `access_mode` for online tokens.
///
/// # Example
///
/// ```rust
/// use shopify_app::{AppConfig, ApiKey, ApiSecretKey, AppName, RedirectUrl};
/// use shopify_app::auth::install_redirect_url;
///
/// let config = AppConfig::builder()
///     .api_key(ApiKey::new("abc").unwrap())
///     .api_secret_key(ApiSecretKey::new("secret").unwrap())
///     .install_redirect_url(RedirectUrl::new("https://app.example.com/app_installed").unwrap())
///     .dashboard_redirect_url(RedirectUrl::new("https://app.example.com").unwrap())
///     .app_name(AppName::new("my-app").unwrap())
///     .build()
///     .unwrap();
///
/// let url = install_redirect_url(
///     &config,
///     "shop.myshopify.com",
///     &["read_orders", "read_products"],
///     "nonce",
///     &["per-user"],
/// );
/// assert_eq!(
///     url,
///     "https://shop.myshopify.com/admin/oauth/authorize?client_id=abc\
///      &scope=read_orders,read_products\
///      &redirect_uri=https://app.example.com/app_installed\
///      &state=nonce&grant_options[]=per-user"
/// );
/// ```
#[must_use]
pub fn install_redirect_url<S, A>(
    config: &AppConfig,
    shop: &str,
    scopes: &[S],
    nonce: &str,
    access_mode: &[A],
) -> String
where
    S: AsRef<str>,
    A: AsRef<str>,
{
    format!(
        "https://{shop}/admin/oauth/authorize?client_id={client_id}&scope={scopes}&redirect_uri={redirect_uri}&state={nonce}&grant_options[]={access_mode}",
        client_id = config.api_key(),
        scopes = join_comma(scopes),
        redirect_uri = config.install_redirect_url(),
        access_mode = join_comma(access_mode),
    )
}

/// Builds the app dashboard URL carrying `shop` and `nonce`.
#[must_use]
pub fn dashboard_redirect_url(config: &AppConfig, shop: &str, nonce: &str) -> String {
    format!(
        "{dashboard}/?shop={shop}&state={nonce}",
        dashboard = config.dashboard_redirect_url()
    )
}

/// Builds the URL of the app inside the shop admin.
#[must_use]
pub fn post_install_redirect_url(config: &AppConfig, shop: &str) -> String {
    format!("https://{shop}/admin/apps/{}", config.app_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecretKey, AppName, RedirectUrl};

    fn create_test_config() -> AppConfig {
        AppConfig::builder()
            .api_key(ApiKey::new("test-api-key").unwrap())
            .api_secret_key(ApiSecretKey::new("test-secret").unwrap())
            .install_redirect_url(
                RedirectUrl::new("https://myapp.example.com/app_installed").unwrap(),
            )
            .dashboard_redirect_url(RedirectUrl::new("https://myapp.example.com").unwrap())
            .app_name(AppName::new("order-export").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_install_redirect_url_exact_format() {
        let config = create_test_config();

        let url = install_redirect_url(
            &config,
            "test-shop.myshopify.com",
            &["read_orders", "write_products"],
            "abc123",
            &["per-user"],
        );

        assert_eq!(
            url,
            "https://test-shop.myshopify.com/admin/oauth/authorize?client_id=test-api-key\
             &scope=read_orders,write_products\
             &redirect_uri=https://myapp.example.com/app_installed\
             &state=abc123&grant_options[]=per-user"
        );
    }

    #[test]
    fn test_install_redirect_url_keeps_scope_order() {
        let config = create_test_config();
        let scopes = vec!["write_products".to_string(), "read_orders".to_string()];
        let no_modes: [&str; 0] = [];

        let url = install_redirect_url(&config, "s.myshopify.com", &scopes, "n", &no_modes);

        assert!(url.contains("&scope=write_products,read_orders&"));
        assert!(url.ends_with("&grant_options[]="));
    }

    #[test]
    fn test_dashboard_redirect_url_format() {
        let config = create_test_config();

        assert_eq!(
            dashboard_redirect_url(&config, "test-shop.myshopify.com", "xyz"),
            "https://myapp.example.com/?shop=test-shop.myshopify.com&state=xyz"
        );
    }

    #[test]
    fn test_post_install_redirect_url_format() {
        let config = create_test_config();

        assert_eq!(
            post_install_redirect_url(&config, "test-shop.myshopify.com"),
            "https://test-shop.myshopify.com/admin/apps/order-export"
        );
    }
}
