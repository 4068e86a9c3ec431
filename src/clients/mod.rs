//! HTTP client types for PeopleDoc API communication.
//!
//! # Overview
//!
//! - [`v1::V1Client`]: REST API v1 client (API key authentication)
//! - [`v2::V2Client`]: REST API v2 client (OAuth client credentials)
//! - [`HttpClient`]: the request executor shared by both clients
//! - [`ResponseHandlers`]: the response classification chain
//! - [`ApiError`] / [`ErrorKind`]: classified API failures
//! - [`HttpError`]: unified error type returned by every call
//!
//! # Response classification
//!
//! Every response passes through the client's [`ResponseHandlers`]. A
//! non-success response becomes an [`HttpError::Api`] carrying an
//! [`ApiError`]; the message format of each kind is documented on
//! [`ResponseHandlers`]. The `get` methods of both clients return
//! `Ok(None)` instead of a not-found error.
//!
//! # Example
//!
//! ```rust,ignore
//! use people_doc::clients::v1::V1Client;
//! use people_doc::{ApiKey, BaseUrl, V1Config};
//!
//! let config = V1Config::builder()
//!     .api_key(ApiKey::new("api-key")?)
//!     .base_url(BaseUrl::new("https://api.staging.us.people-doc.com")?)
//!     .build()?;
//!
//! let client = V1Client::new(config)?;
//! match client.get("employees/ABC123").await? {
//!     Some(employee) => println!("{}", employee["email"]),
//!     None => println!("No such employee"),
//! }
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod response_handlers;
pub mod v1;
pub mod v2;

pub use errors::{ApiError, ErrorKind, HttpError, InvalidHttpRequestError};
pub use http_client::HttpClient;
pub use http_request::{FileUpload, HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody};
pub use http_response::HttpResponse;
pub use response_handlers::{
    handle_bad_request, handle_not_found, handle_unauthorized, handle_unknown_failure,
    handle_unprocessable_entity, handle_v1_bad_request, handle_v2_bad_request,
    handle_v2_unauthorized, HandlerRule, HandlerSlot, ResponseHandlers,
};

pub use v1::V1Client;
pub use v2::V2Client;
