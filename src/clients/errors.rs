//! Error types for PeopleDoc API calls.
//!
//! # Error Handling
//!
//! - [`ApiError`]: a response classified by the response handler chain,
//!   tagged with an [`ErrorKind`]
//! - [`InvalidHttpRequestError`]: a request that fails validation before sending
//! - [`HttpError`]: unified error type returned by every client call
//!
//! # Example
//!
//! ```rust,ignore
//! use people_doc::{ErrorKind, HttpError};
//!
//! match client.post("employees", &employee).await {
//!     Ok(data) => println!("Created: {data}"),
//!     Err(HttpError::Api(e)) if e.kind().is_bad_request() => {
//!         println!("Rejected: {}", e.message());
//!     }
//!     Err(HttpError::Api(e)) if e.kind() == ErrorKind::Unauthorized => {
//!         println!("Check credentials: {e}");
//!     }
//!     Err(other) => println!("Request failed: {other}"),
//! }
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The class of failure reported by the PeopleDoc API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP 400.
    BadRequest,
    /// HTTP 404.
    NotFound,
    /// HTTP 401 or 403.
    Unauthorized,
    /// HTTP 422, a refinement of [`ErrorKind::BadRequest`].
    UnprocessableEntity,
    /// Any other non-success response.
    UnknownFailure,
}

impl ErrorKind {
    /// Returns `true` for [`BadRequest`](Self::BadRequest) and its
    /// refinement [`UnprocessableEntity`](Self::UnprocessableEntity).
    ///
    /// Callers handling bad requests should branch on this rather than on
    /// equality so that validation failures are caught too.
    #[must_use]
    pub const fn is_bad_request(self) -> bool {
        matches!(self, Self::BadRequest | Self::UnprocessableEntity)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "not found",
            Self::Unauthorized => "unauthorized",
            Self::UnprocessableEntity => "unprocessable entity",
            Self::UnknownFailure => "unknown failure",
        };
        f.write_str(name)
    }
}

/// A failed API response, classified by the response handler chain.
///
/// The message is reproduced exactly as built by the handler that fired;
/// downstream code may match on it. Bad request and unprocessable entity
/// errors also carry the parsed response body so callers can inspect
/// field-level validation errors.
///
/// # Example
///
/// ```rust
/// use people_doc::{ApiError, ErrorKind};
/// use serde_json::json;
///
/// let error = ApiError::bad_request("technical_id is required", Some(json!({"errors": []})));
/// assert_eq!(error.kind(), ErrorKind::BadRequest);
/// assert_eq!(error.message(), "technical_id is required");
/// assert_eq!(error.to_string(), "technical_id is required");
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    response_body: Option<Value>,
    status: Option<u16>,
}

impl ApiError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, response_body: Option<Value>) -> Self {
        Self {
            kind,
            message: message.into(),
            response_body,
            status: None,
        }
    }

    /// Records the HTTP status code of the response that produced the error.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Creates a [`ErrorKind::BadRequest`] error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>, response_body: Option<Value>) -> Self {
        Self::new(ErrorKind::BadRequest, message, response_body)
    }

    /// Creates a [`ErrorKind::NotFound`] error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, None)
    }

    /// Creates a [`ErrorKind::Unauthorized`] error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message, None)
    }

    /// Creates a [`ErrorKind::UnprocessableEntity`] error.
    #[must_use]
    pub fn unprocessable_entity(message: impl Into<String>, response_body: Option<Value>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity, message, response_body)
    }

    /// Creates a [`ErrorKind::UnknownFailure`] error.
    #[must_use]
    pub fn unknown_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownFailure, message, None)
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the parsed response body attached to the error, if any.
    #[must_use]
    pub const fn response_body(&self) -> Option<&Value> {
        self.response_body.as_ref()
    }

    /// Returns the HTTP status code, when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all client calls.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API answered with a classified failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A request path could not be resolved against the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A payload could not be serialized or a response could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns the classified API error, if this is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` if the API reported the resource as not found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.api_error()
            .is_some_and(|e| e.kind() == ErrorKind::NotFound)
    }
}
