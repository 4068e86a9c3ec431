//! REST API v2 client implementation.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::auth::{
    encode_credentials, Token, TokenCache, CLIENT_CREDENTIALS_GRANT_TYPE, TOKEN_SCOPE,
};
use crate::clients::http_client::{found, user_agent};
use crate::clients::{
    FileUpload, HttpClient, HttpError, HttpMethod, HttpRequest, ResponseHandlers,
};
use crate::config::V2Config;

/// Path of the token endpoint.
const TOKEN_PATH: &str = "api/v2/client/tokens";

/// Path prefix of client resources.
const CLIENT_PREFIX: &str = "api/v2/client";

/// Path prefix of file uploads.
const UPLOAD_PREFIX: &str = "api/v2";

/// Client name sent as the `User-Agent`.
const CLIENT_NAME: &str = "PeopleDoc::V2::Client";

/// Client for the PeopleDoc REST API v2.
///
/// Responses, including the token request, are classified with
/// [`ResponseHandlers::v2`].
///
/// # Thread Safety
///
/// `V2Client` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct V2Client {
    config: V2Config,
    http_client: HttpClient,
    token: TokenCache,
    user_agent: String,
}

// Verify V2Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<V2Client>();
};

impl V2Client {
    /// Creates a new v2 client. No token is requested until first use.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: V2Config) -> Result<Self, HttpError> {
        let http_client = HttpClient::new(
            config.base_url().clone(),
            ResponseHandlers::v2(),
            config.timeout(),
        )?;
        let user_agent = user_agent(config.user_agent_prefix(), CLIENT_NAME);

        Ok(Self {
            config,
            http_client,
            token: TokenCache::new(),
            user_agent,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &V2Config {
        &self.config
    }

    /// Returns the access token, requesting one on first use.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the token request fails. With the v2
    /// handlers, rejected credentials surface as an unauthorized error such
    /// as `"invalid_client: Client authentication failed."`.
    pub async fn token(&self) -> Result<Token, HttpError> {
        self.token.get_or_fetch(|| self.request_token()).await
    }

    async fn request_token(&self) -> Result<Token, HttpError> {
        let credentials = encode_credentials(
            self.config.application_id(),
            self.config.application_secret(),
        );

        let mut headers = self.common_headers();
        headers.insert("Authorization".to_string(), format!("Basic {credentials}"));
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );

        let request = HttpRequest::builder(HttpMethod::Post, TOKEN_PATH)
            .form([
                ("client_id", self.config.client_id().as_ref()),
                ("grant_type", CLIENT_CREDENTIALS_GRANT_TYPE),
                ("scope", TOKEN_SCOPE),
            ])
            .build()?;

        let response = self.http_client.request(&headers, request).await?;
        let token: Token = serde_json::from_value(response.into_data())?;

        tracing::debug!(
            "Obtained {} token expiring in {:?}s",
            token.token_type,
            token.expires_in
        );

        Ok(token)
    }

    /// Fetches a client resource.
    ///
    /// Returns `Ok(None)` when the API reports the resource as not found.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for every other failure, including a failed
    /// token request.
    pub async fn get(&self, resource: &str) -> Result<Option<Value>, HttpError> {
        let request =
            HttpRequest::builder(HttpMethod::Get, format!("{CLIENT_PREFIX}/{resource}")).build()?;

        let headers = self.base_headers().await?;
        found(self.http_client.request(&headers, request).await)
    }

    /// Puts a JSON payload to a client resource, returning the response data.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] if the payload cannot be
    /// serialized, or any other [`HttpError`] raised by the call.
    pub async fn put<T>(&self, resource: &str, payload: &T) -> Result<Value, HttpError>
    where
        T: Serialize + ?Sized,
    {
        let request = HttpRequest::builder(HttpMethod::Put, format!("{CLIENT_PREFIX}/{resource}"))
            .json(serde_json::to_value(payload)?)
            .build()?;

        let headers = self.base_headers().await?;
        let response = self.http_client.request(&headers, request).await?;
        Ok(response.into_data())
    }

    /// Uploads a file as a multipart request.
    ///
    /// The file is sent as the `file` part. When a payload is given it is
    /// serialized into a `data` part; otherwise the part is omitted.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] if the payload cannot be
    /// serialized, or any other [`HttpError`] raised by the call, including
    /// a failed token request.
    pub async fn post_file<T>(
        &self,
        resource: &str,
        file: FileUpload,
        payload: Option<&T>,
    ) -> Result<Value, HttpError>
    where
        T: Serialize + ?Sized,
    {
        let data = payload.map(serde_json::to_string).transpose()?;
        let request = HttpRequest::builder(HttpMethod::Post, format!("{UPLOAD_PREFIX}/{resource}"))
            .multipart(file, data)
            .build()?;

        let headers = self.base_headers().await?;
        let response = self.http_client.request(&headers, request).await?;
        Ok(response.into_data())
    }

    fn common_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Host".to_string(), self.config.base_url().authority());
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers
    }

    async fn base_headers(&self) -> Result<HashMap<String, String>, HttpError> {
        let token = self.token().await?;

        let mut headers = self.common_headers();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", token.access_token),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Ok(headers)
    }
}
