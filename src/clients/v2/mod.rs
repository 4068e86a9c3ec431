//! PeopleDoc REST API v2 client.
//!
//! The v2 API uses OAuth 2.0 client credentials. The client requests a
//! token from `api/v2/client/tokens` on first use and sends it as a bearer
//! token with every resource request. The token is kept for the lifetime of
//! the client; see [`TokenCache`](crate::auth::TokenCache).
//!
//! # Example
//!
//! ```rust,ignore
//! use people_doc::clients::v2::V2Client;
//! use people_doc::{ApplicationId, ApplicationSecret, BaseUrl, ClientId, V2Config};
//! use serde_json::json;
//!
//! let config = V2Config::builder()
//!     .application_id(ApplicationId::new("app-id")?)
//!     .application_secret(ApplicationSecret::new("app-secret")?)
//!     .client_id(ClientId::new("client-id")?)
//!     .base_url(BaseUrl::new("https://apis.staging.us.people-doc.com")?)
//!     .build()?;
//! let client = V2Client::new(config)?;
//!
//! if let Some(organization) = client.get("organizations/001").await? {
//!     client
//!         .put("organizations/001", &json!({"name": organization["name"]}))
//!         .await?;
//! }
//! ```

mod client;

pub use client::V2Client;
