//! REST client for a single store's orders.

use crate::clients::{HttpClient, HttpError};
use crate::config::AppConfig;
use crate::orders::{OrderSource, OrdersResponse, PAGE_SIZE};

/// Fetches orders from one store through the REST Admin API.
///
/// Requests go to `GET /admin/api/{version}/orders.json` with
/// `limit=250`, `since_id` and `status=any`, so cancelled and archived
/// orders are included.
#[derive(Debug)]
pub struct ShopifyStoreClient {
    http: HttpClient,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyStoreClient>();
};

impl ShopifyStoreClient {
    /// Creates a client for `shop` (e.g. `my-store.myshopify.com`) using the
    /// store's offline access token and the configured API version.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(shop: &str, access_token: &str, config: &AppConfig) -> Result<Self, HttpError> {
        Self::with_base_uri(format!("https://{shop}"), access_token, config)
    }

    /// Creates a client that sends requests to `base_uri` instead of the
    /// shop's own domain, e.g. a proxy or a local mock server.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn with_base_uri(
        base_uri: impl Into<String>,
        access_token: &str,
        config: &AppConfig,
    ) -> Result<Self, HttpError> {
        let base_path = format!("/admin/api/{}", config.api_version());
        Ok(Self {
            http: HttpClient::new(base_uri, base_path, access_token)?,
        })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http
    }
}

impl OrderSource for ShopifyStoreClient {
    type Error = HttpError;

    async fn get_orders(&self, since_id: u64) -> Result<OrdersResponse, HttpError> {
        let query = [
            ("limit", PAGE_SIZE.to_string()),
            ("since_id", since_id.to_string()),
            ("status", "any".to_string()),
        ];

        let response = self.http.get("orders.json", &query).await?;
        if let Some(limit) = response.api_call_limit {
            tracing::debug!(
                used = limit.request_count,
                bucket = limit.bucket_size,
                "Shopify API call limit"
            );
        }

        Ok(serde_json::from_value(response.body)?)
    }
}
