//! HTTP response type.

use std::collections::HashMap;

/// Rate limit information parsed from the `X-Shopify-Shop-Api-Call-Limit`
/// header (`"used/bucket"`).
///
/// ```rust
/// use shopify_app::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("40/80").unwrap();
/// assert_eq!(limit.request_count, 40);
/// assert_eq!(limit.bucket_size, 80);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Requests used in the current bucket.
    pub request_count: u32,
    /// Size of the bucket.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses a `used/bucket` header value.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (used, bucket) = header_value.trim().split_once('/')?;
        Some(Self {
            request_count: used.parse().ok()?,
            bucket_size: bucket.parse().ok()?,
        })
    }
}

/// A response from the Admin API.
///
/// Header names are stored lowercased; a header may repeat.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed JSON body (`{}` when the body was empty).
    pub body: serde_json::Value,
    /// Rate limit state after this request.
    pub api_call_limit: Option<ApiCallLimit>,
}

impl HttpResponse {
    /// Creates a response, parsing the rate limit header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let api_call_limit = headers
            .get("x-shopify-shop-api-call-limit")
            .and_then(|values| values.first())
            .and_then(|value| ApiCallLimit::parse(value));

        Self {
            code,
            headers,
            body,
            api_call_limit,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    fn first_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.first_header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.first_header("x-shopify-api-deprecated-reason")
    }

    /// Serializes the error fields of the body into the JSON message carried
    /// by [`HttpResponseError`](crate::clients::HttpResponseError).
    #[must_use]
    pub fn serialize_error(&self) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(errors) = self.body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(error) = self.body.get("error") {
            error_body.insert("error".to_string(), error.clone());
            if let Some(description) = self.body.get("error_description") {
                error_body.insert("error_description".to_string(), description.clone());
            }
        }
        if let Some(request_id) = self.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::Value::String(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::Value::Object(error_body).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_boundaries() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(299, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(199, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_parses_api_call_limit_header() {
        let response = HttpResponse::new(
            200,
            headers(&[("x-shopify-shop-api-call-limit", "3/40")]),
            json!({}),
        );

        assert_eq!(
            response.api_call_limit,
            Some(ApiCallLimit {
                request_count: 3,
                bucket_size: 40
            })
        );
    }

    #[test]
    fn test_api_call_limit_rejects_malformed_values() {
        assert_eq!(ApiCallLimit::parse("40"), None);
        assert_eq!(ApiCallLimit::parse("a/b"), None);
        assert_eq!(ApiCallLimit::parse("1/2/3"), None);
    }

    #[test]
    fn test_serialize_error_includes_request_id() {
        let response = HttpResponse::new(
            402,
            headers(&[("x-request-id", "req-42")]),
            json!({"errors": "Unavailable Shop"}),
        );

        let message: serde_json::Value =
            serde_json::from_str(&response.serialize_error()).unwrap();

        assert_eq!(message["errors"], "Unavailable Shop");
        assert_eq!(
            message["error_reference"],
            "If you report this error, please include this id: req-42."
        );
    }

    #[test]
    fn test_serialize_error_description_requires_error() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            json!({"error_description": "ignored"}),
        );

        assert_eq!(response.serialize_error(), "{}");
    }

    #[test]
    fn test_deprecation_reason() {
        let response = HttpResponse::new(
            200,
            headers(&[("x-shopify-api-deprecated-reason", "use GraphQL")]),
            json!({}),
        );

        assert_eq!(response.deprecation_reason(), Some("use GraphQL"));
        assert_eq!(response.request_id(), None);
    }
}
