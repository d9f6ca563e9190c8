//! HTTP layer for calls to the Shopify Admin API.
//!
//! - [`HttpClient`]: async client bound to one store, sending the access
//!   token with every request
//! - [`HttpResponse`]: status, lowercased headers and JSON body
//! - [`HttpError`]: network failures and non-2xx responses
//!
//! Requests are not retried.

mod errors;
mod http_client;
mod http_response;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{HttpClient, ACCESS_TOKEN_HEADER, SDK_VERSION};
pub use http_response::{ApiCallLimit, HttpResponse};
