//! REST API v1 client implementation.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::clients::http_client::{found, user_agent};
use crate::clients::{
    FileUpload, HttpClient, HttpError, HttpMethod, HttpRequest, ResponseHandlers,
};
use crate::config::V1Config;

/// Path prefix of every v1 resource.
const API_PREFIX: &str = "api/v1";

/// Client name sent as the `User-Agent`.
const CLIENT_NAME: &str = "PeopleDoc::V1::Client";

/// Client for the PeopleDoc REST API v1.
///
/// Responses are classified with [`ResponseHandlers::v1`].
///
/// # Thread Safety
///
/// `V1Client` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct V1Client {
    config: V1Config,
    http_client: HttpClient,
    user_agent: String,
}

// Verify V1Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<V1Client>();
};

impl V1Client {
    /// Creates a new v1 client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: V1Config) -> Result<Self, HttpError> {
        let http_client = HttpClient::new(
            config.base_url().clone(),
            ResponseHandlers::v1(),
            config.timeout(),
        )?;
        let user_agent = user_agent(config.user_agent_prefix(), CLIENT_NAME);

        Ok(Self {
            config,
            http_client,
            user_agent,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &V1Config {
        &self.config
    }

    /// Fetches a resource.
    ///
    /// Returns `Ok(None)` when the API reports the resource as not found.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for every other failure.
    pub async fn get(&self, resource: &str) -> Result<Option<Value>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, format!("{API_PREFIX}/{resource}"))
            .build()?;

        found(self.http_client.request(&self.base_headers(), request).await)
    }

    /// Posts a JSON payload to a resource, returning the response data.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] if the payload cannot be
    /// serialized, or any other [`HttpError`] raised by the call.
    pub async fn post<T>(&self, resource: &str, payload: &T) -> Result<Value, HttpError>
    where
        T: Serialize + ?Sized,
    {
        let request = HttpRequest::builder(HttpMethod::Post, format!("{API_PREFIX}/{resource}/"))
            .json(serde_json::to_value(payload)?)
            .build()?;

        let response = self.http_client.request(&self.base_headers(), request).await?;
        Ok(response.into_data())
    }

    /// Uploads a file with a JSON payload as a multipart request.
    ///
    /// The file is sent as the `file` part and the payload as the `data` part.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] if the payload cannot be
    /// serialized, or any other [`HttpError`] raised by the call.
    pub async fn post_file<T>(
        &self,
        resource: &str,
        file: FileUpload,
        payload: &T,
    ) -> Result<Value, HttpError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_string(payload)?;
        let request = HttpRequest::builder(HttpMethod::Post, format!("{API_PREFIX}/{resource}/"))
            .multipart(file, Some(data))
            .build()?;

        let response = self.http_client.request(&self.base_headers(), request).await?;
        Ok(response.into_data())
    }

    fn base_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert(
            "X-API-KEY".to_string(),
            self.config.api_key().as_ref().to_string(),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Host".to_string(), self.config.base_url().authority());
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, BaseUrl};

    fn create_test_client() -> V1Client {
        let config = V1Config::builder()
            .api_key(ApiKey::new("test-api-key").unwrap())
            .base_url(BaseUrl::new("https://api.test.us.people-doc.com").unwrap())
            .build()
            .unwrap();
        V1Client::new(config).unwrap()
    }

    #[test]
    fn test_base_headers() {
        let client = create_test_client();
        let headers = client.base_headers();

        assert_eq!(headers.get("Accept"), Some(&"application/json".to_string()));
        assert_eq!(headers.get("X-API-KEY"), Some(&"test-api-key".to_string()));
        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            headers.get("Host"),
            Some(&"api.test.us.people-doc.com".to_string())
        );
        assert_eq!(
            headers.get("User-Agent"),
            Some(&"PeopleDoc::V1::Client".to_string())
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<V1Client>();
    }
}
