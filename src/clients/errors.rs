//! HTTP error types.
//!
//! There is no retry layer: every failure is returned to the caller on the
//! first attempt.
//!
//! ```rust,ignore
//! match client.get("orders.json", &query).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(HttpError::Decode(e)) => println!("Unexpected body: {e}"),
//! }
//! ```

use thiserror::Error;

/// A non-2xx response from the Admin API.
///
/// `message` is a JSON object holding whichever of `errors`, `error`,
/// `error_description` the response carried, plus an `error_reference`
/// sentence quoting the `X-Request-Id`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// The `X-Request-Id` of the failed request, if Shopify sent one.
    pub error_reference: Option<String>,
}

/// Unified error type for HTTP operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}
