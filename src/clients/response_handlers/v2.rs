//! Response handler overrides for the REST API v2.
//!
//! The v2 API reports OAuth-style errors (`error` / `error_description`) on
//! its token endpoint and `code` / `message` pairs elsewhere.

use super::{HandlerSlot, ResponseHandlers};
use crate::clients::errors::ApiError;
use crate::clients::http_response::{value_text, HttpResponse};

impl ResponseHandlers {
    /// The v2 chain: the defaults with the `bad_request` and `unauthorized`
    /// slots replaced.
    ///
    /// The v2 `unauthorized` rule only matches 401. A 403 is therefore not
    /// classified as unauthorized and falls through to the `unknown` slot.
    #[must_use]
    pub fn v2() -> Self {
        Self::default()
            .with(HandlerSlot::BadRequest, handle_v2_bad_request)
            .with(HandlerSlot::Unauthorized, handle_v2_unauthorized)
    }
}

/// 400 on the v2 API: the message is `error_description`.
///
/// A body without `error_description` falls back to the raw body.
pub fn handle_v2_bad_request(response: &HttpResponse) -> Option<ApiError> {
    if response.code != 400 {
        return None;
    }

    let message = response
        .field("error_description")
        .map_or_else(|| response.body.clone(), |d| value_text(Some(d)));

    Some(ApiError::bad_request(message, response.parsed_body.clone()))
}

/// 401 on the v2 API.
///
/// The message is `"{error}: {error_description}"` when an `error` field is
/// present, `"{code}: {message}"` when a `code` field is present, and the
/// raw body otherwise. No response body is attached.
pub fn handle_v2_unauthorized(response: &HttpResponse) -> Option<ApiError> {
    if response.code != 401 {
        return None;
    }

    let message = if let Some(error) = response.field("error") {
        format!(
            "{}: {}",
            value_text(Some(error)),
            value_text(response.field("error_description"))
        )
    } else if let Some(code) = response.field("code") {
        format!(
            "{}: {}",
            value_text(Some(code)),
            value_text(response.field("message"))
        )
    } else {
        response.body.clone()
    };

    Some(ApiError::unauthorized(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::ErrorKind;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body)
    }

    #[test]
    fn test_bad_request_uses_error_description() {
        let body = r#"{"error_description":"The request is invalid","error":"invalid_request"}"#;
        let error = ResponseHandlers::v2().check(&response(400, body)).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), "The request is invalid");
        assert_eq!(
            error.response_body(),
            Some(&json!({"error_description": "The request is invalid", "error": "invalid_request"}))
        );
    }

    #[test]
    fn test_bad_request_without_description_falls_back_to_body() {
        let error = handle_v2_bad_request(&response(400, r#"{"error":"x"}"#)).unwrap();
        assert_eq!(error.message(), r#"{"error":"x"}"#);
    }

    #[test]
    fn test_unauthorized_with_oauth_error() {
        let body = r#"{"error":"invalid_client","error_description":"Client authentication failed."}"#;
        let error = ResponseHandlers::v2().check(&response(401, body)).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        assert_eq!(error.message(), "invalid_client: Client authentication failed.");
        assert!(error.response_body().is_none());
    }

    #[test]
    fn test_unauthorized_with_code_and_message() {
        let body = r#"{"message":"Token is invalid.","code":"invalid_token"}"#;
        let error = ResponseHandlers::v2().check(&response(401, body)).unwrap_err();

        assert_eq!(error.message(), "invalid_token: Token is invalid.");
    }

    #[test]
    fn test_unauthorized_error_field_wins_over_code() {
        let body = r#"{"error":"e","error_description":"d","code":"c","message":"m"}"#;
        let error = handle_v2_unauthorized(&response(401, body)).unwrap();
        assert_eq!(error.message(), "e: d");
    }

    #[test]
    fn test_unauthorized_raw_body_fallback() {
        let error = handle_v2_unauthorized(&response(401, "Unauthorized")).unwrap();
        assert_eq!(error.message(), "Unauthorized");
    }

    // The v2 rule is narrower than the default one: 403 is not unauthorized.
    #[test]
    fn test_forbidden_falls_through_to_unknown_failure() {
        let error = ResponseHandlers::v2()
            .check(&response(403, "Forbidden"))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnknownFailure);
        assert_eq!(error.message(), "Code 403 - Forbidden");
    }

    #[test]
    fn test_default_slots_are_inherited() {
        let handlers = ResponseHandlers::v2();

        let error = handlers.check(&response(404, "{}")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let body = r#"{"code":"C1","message":"bad","errors":[{"field":"a","message":"required"}]}"#;
        let error = handlers.check(&response(422, body)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnprocessableEntity);
        assert_eq!(error.message(), "C1: bad\r\n\r\na - required");

        assert!(handlers.check(&response(200, "{}")).is_ok());
    }
}
