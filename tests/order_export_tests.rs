//! Integration tests for order pagination.
//!
//! The REST endpoint is served by a `wiremock` server; the paging rules are
//! also checked against an in-memory source.

use std::sync::Mutex;

use serde_json::{json, Value};
use shopify_app::clients::HttpError;
use shopify_app::orders::{
    fetch_all_orders, FetchOrdersError, OrderSource, OrdersResponse, ShopifyStoreClient,
    PAGE_SIZE,
};
use shopify_app::{ApiKey, ApiSecretKey, ApiVersion, AppConfig, AppName, RedirectUrl};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORDERS_PATH: &str = "/admin/api/2025-10/orders.json";

fn create_test_config() -> AppConfig {
    AppConfig::builder()
        .api_key(ApiKey::new("api-key").unwrap())
        .api_secret_key(ApiSecretKey::new("hush").unwrap())
        .install_redirect_url(RedirectUrl::new("https://app.example.com/app_installed").unwrap())
        .dashboard_redirect_url(RedirectUrl::new("https://app.example.com").unwrap())
        .app_name(AppName::new("order-export").unwrap())
        .api_version(ApiVersion::V2025_10)
        .build()
        .unwrap()
}

fn order(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("#{id}"),
        "total_price": "19.99",
        "customer": {"id": id * 10, "email": format!("buyer{id}@example.com")},
    })
}

fn orders_body(ids: std::ops::RangeInclusive<u64>) -> Value {
    json!({ "orders": ids.map(order).collect::<Vec<_>>() })
}

/// In-memory source serving pre-built pages and recording each cursor.
struct ScriptedSource {
    pages: Mutex<Vec<Vec<Value>>>,
    cursors: Mutex<Vec<u64>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Vec<Value>>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().rev().collect()),
            cursors: Mutex::new(Vec::new()),
        }
    }

    fn cursors(&self) -> Vec<u64> {
        self.cursors.lock().unwrap().clone()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("no more pages scripted")]
struct Exhausted;

impl OrderSource for ScriptedSource {
    type Error = Exhausted;

    async fn get_orders(&self, since_id: u64) -> Result<OrdersResponse, Exhausted> {
        self.cursors.lock().unwrap().push(since_id);
        let orders = self.pages.lock().unwrap().pop().ok_or(Exhausted)?;
        Ok(OrdersResponse { orders })
    }
}

fn ids(table: &shopify_app::OrderTable) -> Vec<u64> {
    table
        .rows()
        .iter()
        .map(|row| row["id"].as_u64().unwrap())
        .collect()
}

// ============================================================================
// Paging rules
// ============================================================================

#[tokio::test]
async fn test_paging_stops_on_first_short_page() {
    let source = ScriptedSource::new(vec![
        (1..=250).map(order).collect(),
        (251..=500).map(order).collect(),
        (501..=510).map(order).collect(),
        // never requested
        (511..=520).map(order).collect(),
    ]);

    let table = fetch_all_orders(&source).await.unwrap();

    assert_eq!(table.len(), 510);
    assert_eq!(ids(&table), (1..=510).collect::<Vec<_>>());
    assert_eq!(source.cursors(), vec![0, 250, 500]);
}

#[tokio::test]
async fn test_exact_page_size_requests_one_more_page() {
    let source = ScriptedSource::new(vec![(1..=250).map(order).collect(), Vec::new()]);

    let table = fetch_all_orders(&source).await.unwrap();

    assert_eq!(table.len(), PAGE_SIZE);
    assert_eq!(source.cursors(), vec![0, 250]);
}

#[tokio::test]
async fn test_empty_store_yields_empty_table() {
    let source = ScriptedSource::new(vec![Vec::new()]);

    let table = fetch_all_orders(&source).await.unwrap();

    assert!(table.is_empty());
    assert!(table.columns().is_empty());
    assert_eq!(source.cursors(), vec![0]);
}

#[tokio::test]
async fn test_cursor_follows_last_id_not_count() {
    let first: Vec<Value> = (0..250u64).map(|i| order(1000 + i * 3)).collect();
    let source = ScriptedSource::new(vec![first, vec![order(5000)]]);

    fetch_all_orders(&source).await.unwrap();

    assert_eq!(source.cursors(), vec![0, 1000 + 249 * 3]);
}

#[tokio::test]
async fn test_nested_objects_become_json_strings() {
    let source = ScriptedSource::new(vec![vec![order(1), order(2)]]);

    let table = fetch_all_orders(&source).await.unwrap();

    let customer = table.rows()[0]["customer"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(customer).unwrap();
    assert_eq!(parsed, json!({"id": 10, "email": "buyer1@example.com"}));
    assert_eq!(table.rows()[1]["total_price"], json!("19.99"));
    assert_eq!(table.columns(), ["id", "name", "total_price", "customer"]);
}

#[tokio::test]
async fn test_later_page_without_object_column_leaves_cells_absent() {
    let mut first: Vec<Value> = (1..=250).map(order).collect();
    first[249]["customer"] = Value::Null;
    let second = vec![json!({"id": 251, "name": "#251", "total_price": "5.00"})];
    let source = ScriptedSource::new(vec![first, second]);

    let table = fetch_all_orders(&source).await.unwrap();

    assert_eq!(table.len(), 251);
    assert_eq!(table.value(249, "customer"), Some(&json!("null")));
    assert_eq!(table.value(250, "customer"), None);
    assert!(!table.rows()[250].contains_key("customer"));
}

#[tokio::test]
async fn test_full_page_without_trailing_id_is_an_error() {
    let mut page: Vec<Value> = (1..=249).map(order).collect();
    page.push(json!({"name": "#draft"}));
    let source = ScriptedSource::new(vec![page]);

    let error = fetch_all_orders(&source).await.unwrap_err();

    assert!(matches!(
        error,
        FetchOrdersError::MissingOrderId { index: 249 }
    ));
}

// ============================================================================
// REST client
// ============================================================================

#[tokio::test]
async fn test_store_client_pages_through_rest_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(query_param("since_id", "0"))
        .and(query_param("limit", "250"))
        .and(query_param("status", "any"))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_body(1..=250)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(query_param("since_id", "250"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Shopify-Shop-Api-Call-Limit", "2/40")
                .set_body_json(orders_body(251..=253)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config();
    let client = ShopifyStoreClient::with_base_uri(server.uri(), "shpat_test", &config).unwrap();

    let table = fetch_all_orders(&client).await.unwrap();

    assert_eq!(table.len(), 253);
    assert_eq!(ids(&table).last(), Some(&253));
    assert!(table.rows()[252]["customer"].is_string());
}

#[tokio::test]
async fn test_store_client_returns_api_error_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("X-Request-Id", "req-123")
                .set_body_json(json!({"errors": "[API] Invalid API key or access token"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config();
    let client = ShopifyStoreClient::with_base_uri(server.uri(), "bad-token", &config).unwrap();

    let error = fetch_all_orders(&client).await.unwrap_err();

    match error {
        FetchOrdersError::Source(HttpError::Response(response)) => {
            assert_eq!(response.code, 401);
            assert_eq!(response.error_reference.as_deref(), Some("req-123"));
            assert!(response.message.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_store_client_rejects_unexpected_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let config = create_test_config();
    let client = ShopifyStoreClient::with_base_uri(server.uri(), "shpat_test", &config).unwrap();

    let error = fetch_all_orders(&client).await.unwrap_err();

    assert!(matches!(
        error,
        FetchOrdersError::Source(HttpError::Decode(_))
    ));
}
