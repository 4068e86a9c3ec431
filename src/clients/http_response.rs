//! HTTP response types for the PeopleDoc client library.
//!
//! This module provides the [`HttpResponse`] type that the response handler
//! chain classifies.

use std::collections::HashMap;

use serde_json::Value;

/// An HTTP response from the PeopleDoc API.
///
/// Holds the status code, the raw body and the body parsed as JSON. The
/// response is immutable once built and is consumed by a single
/// classification pass.
///
/// # Example
///
/// ```rust
/// use people_doc::HttpResponse;
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(200, HashMap::new(), r#"{"id": 7}"#);
/// assert!(response.is_success());
/// assert_eq!(response.field("id"), Some(&serde_json::json!(7)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// The body parsed as JSON, `None` when it is empty or not JSON.
    pub parsed_body: Option<Value>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the raw body as JSON.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let body = body.into();
        let parsed_body = if body.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&body).ok()
        };

        Self {
            code,
            headers,
            body,
            parsed_body,
        }
    }

    /// Returns `true` for a 2xx status code.
    ///
    /// This is the transport's generic notion of success, independent of
    /// any API-specific error payload.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns a top-level field of the parsed body, if the body is a JSON
    /// object holding a non-null value for `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.parsed_body
            .as_ref()
            .and_then(|body| body.get(key))
            .filter(|value| !value.is_null())
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Consumes the response, returning the parsed payload.
    ///
    /// Bodies that are not JSON are returned as a string value; empty bodies
    /// yield [`Value::Null`].
    #[must_use]
    pub fn into_data(self) -> Value {
        match self.parsed_body {
            Some(value) => value,
            None if self.body.trim().is_empty() => Value::Null,
            None => Value::String(self.body),
        }
    }
}

/// Renders a JSON value as message text: strings without quotes, null as
/// an empty string, everything else in its JSON form.
pub(crate) fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
