//! Authentication types for the PeopleDoc REST API v2.
//!
//! The v2 API uses the OAuth 2.0 client credentials grant. The application
//! ID and secret are sent as Basic credentials to the token endpoint, which
//! returns a bearer [`Token`] used for every subsequent request.
//!
//! # Overview
//!
//! - [`encode_credentials`]: builds the Basic credentials for the token request
//! - [`Token`]: an access token returned by the token endpoint
//! - [`TokenCache`]: per-client memo of the first successful token
//!
//! # Example
//!
//! ```rust
//! use people_doc::auth::encode_credentials;
//! use people_doc::{ApplicationId, ApplicationSecret};
//!
//! let id = ApplicationId::new("app").unwrap();
//! let secret = ApplicationSecret::new("secret").unwrap();
//! assert_eq!(encode_credentials(&id, &secret), "YXBwOnNlY3JldA==");
//! ```

mod credentials;
mod token;

pub use credentials::{encode_credentials, CLIENT_CREDENTIALS_GRANT_TYPE, TOKEN_SCOPE};
pub use token::{Token, TokenCache};
