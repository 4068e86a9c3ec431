//! Response classification for PeopleDoc API calls.
//!
//! Every response goes through a [`ResponseHandlers`] chain before its data
//! reaches the caller. The chain is an ordered set of named slots, each
//! holding a [`HandlerRule`]: a pure function that either recognizes the
//! response and returns an [`ApiError`], or returns `None`.
//!
//! Slots are evaluated in [`HandlerSlot::ORDER`] and the first rule that
//! matches wins. The `unknown` slot is last and catches any non-success
//! response that no earlier rule claimed.
//!
//! # Default rules
//!
//! | slot | matches | message |
//! |---|---|---|
//! | `bad_request` | 400 | raw body |
//! | `not_found` | 404 | raw body |
//! | `unauthorized` | 401, 403 | raw body |
//! | `unprocessable_entity` | 422 | `"{code}: {message}"`, a blank line, then `"{field} - {message}"` per error |
//! | `unknown` | not 2xx | `"Code {status} - {body}"` |
//!
//! API versions replace individual slots; see [`ResponseHandlers::v1`] and
//! [`ResponseHandlers::v2`].
//!
//! # Example
//!
//! ```rust
//! use people_doc::clients::{HandlerSlot, ResponseHandlers};
//! use people_doc::{ApiError, ErrorKind, HttpResponse};
//! use std::collections::HashMap;
//!
//! fn teapot(response: &HttpResponse) -> Option<ApiError> {
//!     (response.code == 418).then(|| ApiError::bad_request("teapot", None))
//! }
//!
//! let handlers = ResponseHandlers::default().with(HandlerSlot::BadRequest, teapot);
//!
//! let response = HttpResponse::new(418, HashMap::new(), "");
//! let error = handlers.check(&response).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::BadRequest);
//! assert_eq!(error.message(), "teapot");
//! ```

mod v1;
mod v2;

pub use v1::handle_v1_bad_request;
pub use v2::{handle_v2_bad_request, handle_v2_unauthorized};

use std::fmt;

use crate::clients::errors::ApiError;
use crate::clients::http_response::{value_text, HttpResponse};

/// Line separator used when joining error messages.
pub(crate) const CRLF: &str = "\r\n";

/// A classification rule: returns the error a response maps to, if any.
pub type HandlerRule = fn(&HttpResponse) -> Option<ApiError>;

/// A named position in a [`ResponseHandlers`] chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerSlot {
    /// HTTP 400 responses.
    BadRequest,
    /// HTTP 404 responses.
    NotFound,
    /// HTTP 401/403 responses.
    Unauthorized,
    /// HTTP 422 responses.
    UnprocessableEntity,
    /// Catch-all for non-success responses.
    Unknown,
}

impl HandlerSlot {
    /// Evaluation order of the chain.
    pub const ORDER: [Self; 5] = [
        Self::BadRequest,
        Self::NotFound,
        Self::Unauthorized,
        Self::UnprocessableEntity,
        Self::Unknown,
    ];
}

impl fmt::Display for HandlerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::UnprocessableEntity => "unprocessable_entity",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// An ordered chain of response classification rules.
///
/// The chain holds no state between calls and is `Copy`, so a client can
/// share it freely across tasks.
#[derive(Clone, Copy)]
pub struct ResponseHandlers {
    bad_request: HandlerRule,
    not_found: HandlerRule,
    unauthorized: HandlerRule,
    unprocessable_entity: HandlerRule,
    unknown: HandlerRule,
}

impl Default for ResponseHandlers {
    fn default() -> Self {
        Self {
            bad_request: handle_bad_request,
            not_found: handle_not_found,
            unauthorized: handle_unauthorized,
            unprocessable_entity: handle_unprocessable_entity,
            unknown: handle_unknown_failure,
        }
    }
}

impl fmt::Debug for ResponseHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseHandlers").finish_non_exhaustive()
    }
}

impl ResponseHandlers {
    /// Replaces the rule in `slot`. The previous rule no longer runs.
    #[must_use]
    pub fn with(mut self, slot: HandlerSlot, rule: HandlerRule) -> Self {
        *self.slot_mut(slot) = rule;
        self
    }

    /// Returns the rule configured for `slot`.
    #[must_use]
    pub const fn rule(&self, slot: HandlerSlot) -> HandlerRule {
        match slot {
            HandlerSlot::BadRequest => self.bad_request,
            HandlerSlot::NotFound => self.not_found,
            HandlerSlot::Unauthorized => self.unauthorized,
            HandlerSlot::UnprocessableEntity => self.unprocessable_entity,
            HandlerSlot::Unknown => self.unknown,
        }
    }

    fn slot_mut(&mut self, slot: HandlerSlot) -> &mut HandlerRule {
        match slot {
            HandlerSlot::BadRequest => &mut self.bad_request,
            HandlerSlot::NotFound => &mut self.not_found,
            HandlerSlot::Unauthorized => &mut self.unauthorized,
            HandlerSlot::UnprocessableEntity => &mut self.unprocessable_entity,
            HandlerSlot::Unknown => &mut self.unknown,
        }
    }

    /// Runs the chain and returns the first error produced, if any.
    ///
    /// Rules after the first match are not evaluated. The returned error
    /// carries the response status code.
    #[must_use]
    pub fn classify(&self, response: &HttpResponse) -> Option<ApiError> {
        HandlerSlot::ORDER.iter().find_map(|&slot| {
            let error = (self.rule(slot))(response)?.with_status(response.code);
            tracing::debug!(
                "Response {} classified by {} handler as {}",
                response.code,
                slot,
                error.kind()
            );
            Some(error)
        })
    }

    /// Runs the chain, passing the response through when no rule matches.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] produced by the first matching rule.
    pub fn check(&self, response: &HttpResponse) -> Result<(), ApiError> {
        self.classify(response).map_or(Ok(()), Err)
    }
}

/// 400: the raw body is the message; the parsed body is attached.
pub fn handle_bad_request(response: &HttpResponse) -> Option<ApiError> {
    (response.code == 400)
        .then(|| ApiError::bad_request(response.body.clone(), response.parsed_body.clone()))
}

/// 404: the raw body is the message.
pub fn handle_not_found(response: &HttpResponse) -> Option<ApiError> {
    (response.code == 404).then(|| ApiError::not_found(response.body.clone()))
}

/// 401 and 403: the raw body is the message.
pub fn handle_unauthorized(response: &HttpResponse) -> Option<ApiError> {
    matches!(response.code, 401 | 403).then(|| ApiError::unauthorized(response.body.clone()))
}

/// 422: a summary line followed by one line per field error.
///
/// ```text
/// {code}: {message}\r\n\r\n{field} - {message}\r\n{field} - {message}
/// ```
pub fn handle_unprocessable_entity(response: &HttpResponse) -> Option<ApiError> {
    if response.code != 422 {
        return None;
    }

    let mut message = format!(
        "{}: {}",
        value_text(response.field("code")),
        value_text(response.field("message"))
    );
    message.push_str(CRLF);
    message.push_str(CRLF);

    let errors: Vec<String> = response
        .field("errors")
        .and_then(|errors| errors.as_array())
        .map(|errors| {
            errors
                .iter()
                .map(|error| {
                    format!(
                        "{} - {}",
                        value_text(error.get("field")),
                        value_text(error.get("message"))
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    message.push_str(&errors.join(CRLF));

    Some(ApiError::unprocessable_entity(
        message,
        response.parsed_body.clone(),
    ))
}

/// Any non-success response: `"Code {status} - {body}"`.
pub fn handle_unknown_failure(response: &HttpResponse) -> Option<ApiError> {
    (!response.is_success()).then(|| {
        ApiError::unknown_failure(format!("Code {} - {}", response.code, response.body))
    })
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
    fn test_success_passes_through() {
        let handlers = ResponseHandlers::default();
        for code in [200, 201, 202, 204] {
            assert!(handlers.check(&response(code, r#"{"id":1}"#)).is_ok());
        }
    }

    #[test]
    fn test_bad_request_uses_raw_body() {
        let body = r#"{"message":"Invalid param"}"#;
        let error = ResponseHandlers::default()
            .check(&response(400, body))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), body);
        assert_eq!(error.response_body(), Some(&json!({"message": "Invalid param"})));
    }

    #[test]
    fn test_not_found_uses_raw_body() {
        let error = ResponseHandlers::default()
            .check(&response(404, r#"{"message":"not found"}"#))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), r#"{"message":"not found"}"#);
        assert!(error.response_body().is_none());
    }

    #[test]
    fn test_unauthorized_covers_401_and_403() {
        for code in [401, 403] {
            let error = ResponseHandlers::default()
                .check(&response(code, "Auth Token invalid"))
                .unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Unauthorized);
            assert_eq!(error.message(), "Auth Token invalid");
        }
    }

    #[test]
    fn test_unprocessable_entity_message_format() {
        let body = json!({
            "code": "C1",
            "message": "bad",
            "errors": [{"field": "a", "message": "required"}]
        });
        let error = ResponseHandlers::default()
            .check(&response(422, &body.to_string()))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnprocessableEntity);
        assert!(error.kind().is_bad_request());
        assert_eq!(error.message(), "C1: bad\r\n\r\na - required");
        assert_eq!(error.response_body(), Some(&body));
    }

    #[test]
    fn test_unprocessable_entity_joins_errors_with_crlf() {
        let body = json!({
            "code": "1422",
            "message": "Validation failed",
            "errors": [
                {"field": "email", "message": "invalid"},
                {"field": "lastname", "message": "required"}
            ]
        });
        let error = handle_unprocessable_entity(&response(422, &body.to_string())).unwrap();

        assert_eq!(
            error.message(),
            "1422: Validation failed\r\n\r\nemail - invalid\r\nlastname - required"
        );
    }

    #[test]
    fn test_unprocessable_entity_without_errors_list() {
        let error =
            handle_unprocessable_entity(&response(422, r#"{"code":"C1","message":"bad"}"#))
                .unwrap();
        assert_eq!(error.message(), "C1: bad\r\n\r\n");
    }

    #[test]
    fn test_unknown_failure_message_format() {
        let error = ResponseHandlers::default()
            .check(&response(500, "Internal Server Error"))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnknownFailure);
        assert_eq!(error.message(), "Code 500 - Internal Server Error");
    }

    #[test]
    fn test_exactly_one_default_rule_fires_per_status() {
        let handlers = ResponseHandlers::default();
        for code in [400, 401, 403, 404, 422, 409, 500, 503] {
            let response = response(code, "{}");
            let fired = HandlerSlot::ORDER
                .iter()
                .filter(|&&slot| handlers.rule(slot)(&response).is_some())
                .filter(|&&slot| slot != HandlerSlot::Unknown)
                .count();
            assert!(fired <= 1, "status {code} matched {fired} specific rules");
            assert!(handlers.classify(&response).is_some());
        }
    }

    #[test]
    fn test_first_match_wins_over_unknown() {
        // The unknown rule would also match a 404; the earlier slot must win.
        let error = ResponseHandlers::default()
            .classify(&response(404, "gone"))
            .unwrap();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_override_replaces_slot_wholesale() {
        fn never(_: &HttpResponse) -> Option<ApiError> {
            None
        }

        let handlers = ResponseHandlers::default().with(HandlerSlot::NotFound, never);
        let error = handlers.check(&response(404, "gone")).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnknownFailure);
        assert_eq!(error.message(), "Code 404 - gone");
    }

    #[test]
    fn test_slot_display_names() {
        let names: Vec<String> = HandlerSlot::ORDER.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "bad_request",
                "not_found",
                "unauthorized",
                "unprocessable_entity",
                "unknown"
            ]
        );
    }

    #[test]
    fn test_handlers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResponseHandlers>();
    }
}
