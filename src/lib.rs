//! # PeopleDoc API Rust Client
//!
//! A Rust client for the PeopleDoc REST API, covering both API generations:
//!
//! - **v1**: API key authentication (`X-API-KEY` header)
//! - **v2**: OAuth 2.0 client credentials with a bearer token
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`V1Config`] and [`V2Config`]
//! - Validated newtypes for API credentials and the base URL
//! - Async clients ([`V1Client`], [`V2Client`]) with `get`, `post`, `put`
//!   and multipart `post_file` operations
//! - Typed errors: every non-success response is classified into an
//!   [`ApiError`] by a chain of [`ResponseHandlers`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use people_doc::{ApiKey, BaseUrl, V1Client, V1Config};
//!
//! let config = V1Config::builder()
//!     .api_key(ApiKey::new("your-api-key")?)
//!     .base_url(BaseUrl::new("https://api.staging.us.people-doc.com")?)
//!     .build()?;
//!
//! let client = V1Client::new(config)?;
//! let employee = client.get("employees/ABC123").await?;
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use people_doc::{ErrorKind, HttpError};
//!
//! match client.token().await {
//!     Ok(token) => println!("Token type: {}", token.token_type),
//!     Err(HttpError::Api(e)) if e.kind() == ErrorKind::Unauthorized => {
//!         // e.g. "invalid_client: Client authentication failed."
//!         eprintln!("{}", e.message());
//!     }
//!     Err(e) => eprintln!("Request failed: {e}"),
//! }
//! ```
//!
//! `get` on either client returns `Ok(None)` for a missing resource instead
//! of a not-found error. All other errors propagate to the caller.
//!
//! ## Logging
//!
//! Requests are logged at `debug` level through [`tracing`], with
//! credential headers masked. The library installs no subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All clients are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::Token;
pub use config::{
    ApiKey, ApplicationId, ApplicationSecret, BaseUrl, ClientId, V1Config, V1ConfigBuilder,
    V2Config, V2ConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, ErrorKind, FileUpload, HandlerSlot, HttpError, HttpResponse,
    InvalidHttpRequestError, ResponseHandlers, V1Client, V2Client,
};
