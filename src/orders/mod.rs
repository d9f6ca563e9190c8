//! Fetching every order of a store.
//!
//! The REST Admin API returns at most [`PAGE_SIZE`] orders per request.
//! [`fetch_all_orders`] walks the pages with `since_id` cursors until a short
//! page comes back, and collects the records into an [`OrderTable`].
//!
//! Any type implementing [`OrderSource`] can be paged; [`ShopifyStoreClient`]
//! is the HTTP implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_app::AppConfig;
//! use shopify_app::orders::{fetch_all_orders, ShopifyStoreClient};
//!
//! let config = AppConfig::from_env()?;
//! let client = ShopifyStoreClient::new("my-store.myshopify.com", "shpat_xxx", &config)?;
//!
//! let table = fetch_all_orders(&client).await?;
//! println!("{} orders, columns: {:?}", table.len(), table.columns());
//! ```

mod errors;
mod store_client;
mod table;

use std::future::Future;

use serde::Deserialize;
use serde_json::Value;

pub use errors::FetchOrdersError;
pub use store_client::ShopifyStoreClient;
pub use table::OrderTable;

/// Maximum number of orders the API returns per page.
pub const PAGE_SIZE: usize = 250;

/// One page of orders as returned by `GET orders.json`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct OrdersResponse {
    /// Order records, oldest id first.
    pub orders: Vec<Value>,
}

/// A source of order pages addressed by `since_id`.
pub trait OrderSource {
    /// Error returned when a page cannot be fetched.
    type Error: std::error::Error + 'static;

    /// Returns up to [`PAGE_SIZE`] orders whose id is greater than `since_id`.
    fn get_orders(
        &self,
        since_id: u64,
    ) -> impl Future<Output = Result<OrdersResponse, Self::Error>> + Send;
}

/// Fetches all orders from `source` into a table.
///
/// Paging starts at `since_id = 0` and continues from the `id` of each page's
/// last record. It stops after the first page holding fewer than
/// [`PAGE_SIZE`] records. Columns whose first-row value is a JSON object are
/// then converted to JSON strings (see
/// [`OrderTable::stringify_object_columns`]).
///
/// # Errors
///
/// - [`FetchOrdersError::Source`] if a page request fails. Nothing is retried.
/// - [`FetchOrdersError::NotAnObject`] if a record is not a JSON object.
/// - [`FetchOrdersError::MissingOrderId`] if a full page ends with a record
///   that has no integer `id`.
pub async fn fetch_all_orders<S>(source: &S) -> Result<OrderTable, FetchOrdersError<S::Error>>
where
    S: OrderSource + Sync,
{
    let mut table = OrderTable::new();
    let mut last: u64 = 0;

    loop {
        let page = source.get_orders(last).await?.orders;
        let page_len = page.len();
        tracing::debug!(since_id = last, count = page_len, "Fetched orders page");

        for record in page {
            match record {
                Value::Object(fields) => table.push(fields),
                _ => return Err(FetchOrdersError::NotAnObject { index: table.len() }),
            }
        }

        if page_len < PAGE_SIZE {
            break;
        }

        let last_index = table.len() - 1;
        last = table
            .value(last_index, "id")
            .and_then(Value::as_u64)
            .ok_or(FetchOrdersError::MissingOrderId { index: last_index })?;
    }

    table.stringify_object_columns();
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    struct Pages {
        pages: Mutex<Vec<Vec<Value>>>,
        requested: Mutex<Vec<u64>>,
    }

    impl Pages {
        fn new(mut pages: Vec<Vec<Value>>) -> Self {
            pages.reverse();
            Self {
                pages: Mutex::new(pages),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl OrderSource for Pages {
        type Error = Boom;

        async fn get_orders(&self, since_id: u64) -> Result<OrdersResponse, Boom> {
            self.requested.lock().unwrap().push(since_id);
            let orders = self.pages.lock().unwrap().pop().ok_or(Boom)?;
            Ok(OrdersResponse { orders })
        }
    }

    fn page(ids: std::ops::RangeInclusive<u64>) -> Vec<Value> {
        ids.map(|id| json!({"id": id})).collect()
    }

    #[tokio::test]
    async fn test_single_short_page() {
        let source = Pages::new(vec![page(1..=3)]);

        let table = fetch_all_orders(&source).await.unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(*source.requested.lock().unwrap(), vec![0]);
    }

    #[tokio::test]
    async fn test_full_page_requests_next_from_last_id() {
        let source = Pages::new(vec![page(1..=250), page(251..=260)]);

        let table = fetch_all_orders(&source).await.unwrap();

        assert_eq!(table.len(), 260);
        assert_eq!(*source.requested.lock().unwrap(), vec![0, 250]);
    }

    #[tokio::test]
    async fn test_non_object_record_is_rejected() {
        let source = Pages::new(vec![vec![json!({"id": 1}), json!(2)]]);

        let error = fetch_all_orders(&source).await.unwrap_err();

        assert!(matches!(error, FetchOrdersError::NotAnObject { index: 1 }));
    }

    #[tokio::test]
    async fn test_source_error_is_propagated() {
        let source = Pages::new(vec![page(1..=250)]);

        let error = fetch_all_orders(&source).await.unwrap_err();

        assert!(matches!(error, FetchOrdersError::Source(Boom)));
    }

    #[test]
    fn test_orders_response_deserializes() {
        let response: OrdersResponse =
            serde_json::from_value(json!({"orders": [{"id": 1}]})).unwrap();
        assert_eq!(response.orders, vec![json!({"id": 1})]);
    }
}
