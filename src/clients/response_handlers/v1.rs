//! Response handler overrides for the REST API v1.

use serde_json::Value;

use super::{HandlerSlot, ResponseHandlers, CRLF};
use crate::clients::errors::ApiError;
use crate::clients::http_response::{value_text, HttpResponse};

impl ResponseHandlers {
    /// The v1 chain: the defaults with the `bad_request` slot replaced by
    /// [`handle_v1_bad_request`].
    #[must_use]
    pub fn v1() -> Self {
        Self::default().with(HandlerSlot::BadRequest, handle_v1_bad_request)
    }
}

/// 400 on the v1 API.
///
/// The message is taken, in order of preference, from:
/// 1. the `msg` of every entry of an `errors` list, joined by CRLF
/// 2. a top-level `message` field
/// 3. the raw body
pub fn handle_v1_bad_request(response: &HttpResponse) -> Option<ApiError> {
    if response.code != 400 {
        return None;
    }

    let message = if let Some(Value::Array(errors)) = response.field("errors") {
        errors
            .iter()
            .map(|error| value_text(error.get("msg")))
            .collect::<Vec<_>>()
            .join(CRLF)
    } else if let Some(message) = response.field("message") {
        value_text(Some(message))
    } else {
        response.body.clone()
    };

    Some(ApiError::bad_request(message, response.parsed_body.clone()))
}
