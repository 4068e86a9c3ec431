//! PeopleDoc REST API v1 client.
//!
//! The v1 API authenticates every request with an `X-API-KEY` header.
//! Resources live under `api/v1/`.
//!
//! # Example
//!
//! ```rust,ignore
//! use people_doc::clients::v1::V1Client;
//! use people_doc::{ApiKey, BaseUrl, FileUpload, V1Config};
//! use serde_json::json;
//!
//! let config = V1Config::builder()
//!     .api_key(ApiKey::new("api-key")?)
//!     .base_url(BaseUrl::new("https://api.staging.us.people-doc.com")?)
//!     .build()?;
//! let client = V1Client::new(config)?;
//!
//! // Create or update an employee
//! client.post("employees", &json!({"technical_id": "ABC123"})).await?;
//!
//! // Upload a company document
//! let file = FileUpload::new("handbook.pdf", std::fs::read("handbook.pdf")?);
//! client
//!     .post_file("enterprise/documents", file, &json!({"document_type_code": "HANDBOOK"}))
//!     .await?;
//! ```

mod client;

pub use client::V1Client;
