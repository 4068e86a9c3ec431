//! Configuration types for the PeopleDoc client library.
//!
//! Each API generation has its own configuration, passed explicitly to the
//! matching client constructor. There is no process-wide state.
//!
//! # Overview
//!
//! - [`V1Config`] / [`V1ConfigBuilder`]: API key authentication (REST API v1)
//! - [`V2Config`] / [`V2ConfigBuilder`]: OAuth client credentials (REST API v2)
//! - [`ApiKey`], [`ApplicationId`], [`ApplicationSecret`], [`ClientId`]:
//!   validated credential newtypes
//! - [`BaseUrl`]: a validated API base URL
//!
//! # Example
//!
//! ```rust
//! use people_doc::{ApiKey, BaseUrl, V1Config};
//!
//! let config = V1Config::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://api.staging.us.people-doc.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().authority(), "api.staging.us.people-doc.com");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApplicationId, ApplicationSecret, BaseUrl, ClientId};

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the PeopleDoc REST API v1 client.
///
/// # Example
///
/// ```rust
/// use people_doc::{ApiKey, BaseUrl, V1Config};
/// use std::time::Duration;
///
/// let config = V1Config::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .base_url(BaseUrl::new("https://api.test.us.people-doc.com").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
/// ```
#[derive(Clone, Debug)]
pub struct V1Config {
    api_key: ApiKey,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl V1Config {
    /// Creates a new builder for constructing a `V1Config`.
    #[must_use]
    pub fn builder() -> V1ConfigBuilder {
        V1ConfigBuilder::default()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for constructing [`V1Config`] instances.
///
/// Required fields are `api_key` and `base_url`.
#[derive(Debug, Default)]
pub struct V1ConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl V1ConfigBuilder {
    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`V1Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `base_url` is not set.
    pub fn build(self) -> Result<V1Config, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(V1Config {
            api_key,
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

/// Configuration for the PeopleDoc REST API v2 client.
///
/// The v2 API authenticates with OAuth client credentials: the application
/// ID and secret are sent as Basic credentials to the token endpoint, along
/// with the client ID.
///
/// # Example
///
/// ```rust
/// use people_doc::{ApplicationId, ApplicationSecret, BaseUrl, ClientId, V2Config};
///
/// let config = V2Config::builder()
///     .application_id(ApplicationId::new("app-id").unwrap())
///     .application_secret(ApplicationSecret::new("app-secret").unwrap())
///     .client_id(ClientId::new("client-id").unwrap())
///     .base_url(BaseUrl::new("https://apis.staging.us.people-doc.com").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.client_id().as_ref(), "client-id");
/// ```
#[derive(Clone, Debug)]
pub struct V2Config {
    application_id: ApplicationId,
    application_secret: ApplicationSecret,
    client_id: ClientId,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl V2Config {
    /// Creates a new builder for constructing a `V2Config`.
    #[must_use]
    pub fn builder() -> V2ConfigBuilder {
        V2ConfigBuilder::default()
    }

    /// Returns the application ID.
    #[must_use]
    pub const fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the application secret.
    #[must_use]
    pub const fn application_secret(&self) -> &ApplicationSecret {
        &self.application_secret
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for constructing [`V2Config`] instances.
///
/// Required fields are `application_id`, `application_secret`, `client_id`
/// and `base_url`.
#[derive(Debug, Default)]
pub struct V2ConfigBuilder {
    application_id: Option<ApplicationId>,
    application_secret: Option<ApplicationSecret>,
    client_id: Option<ClientId>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl V2ConfigBuilder {
    /// Sets the application ID (required).
    #[must_use]
    pub fn application_id(mut self, id: ApplicationId) -> Self {
        self.application_id = Some(id);
        self
    }

    /// Sets the application secret (required).
    #[must_use]
    pub fn application_secret(mut self, secret: ApplicationSecret) -> Self {
        self.application_secret = Some(secret);
        self
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`V2Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] naming the first
    /// required field that is not set.
    pub fn build(self) -> Result<V2Config, ConfigError> {
        let application_id = self.application_id.ok_or(ConfigError::MissingRequiredField {
            field: "application_id",
        })?;
        let application_secret =
            self.application_secret
                .ok_or(ConfigError::MissingRequiredField {
                    field: "application_secret",
                })?;
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(V2Config {
            application_id,
            application_secret,
            client_id,
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

// Verify configs are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<V1Config>();
    assert_send_sync::<V2Config>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> BaseUrl {
        BaseUrl::new("https://api.test.us.people-doc.com").unwrap()
    }

    #[test]
    fn test_v1_builder_requires_api_key() {
        let result = V1Config::builder().base_url(base_url()).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_v1_builder_requires_base_url() {
        let result = V1Config::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_v1_builder_defaults() {
        let config = V1Config::builder()
            .api_key(ApiKey::new("key").unwrap())
            .base_url(base_url())
            .build()
            .unwrap();

        assert_eq!(config.api_key().as_ref(), "key");
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_v2_builder_reports_first_missing_field() {
        let result = V2Config::builder()
            .application_id(ApplicationId::new("app").unwrap())
            .base_url(base_url())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "application_secret"
            })
        ));
    }

    #[test]
    fn test_v2_builder_with_all_fields() {
        let config = V2Config::builder()
            .application_id(ApplicationId::new("app").unwrap())
            .application_secret(ApplicationSecret::new("secret").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .base_url(base_url())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.application_id().as_ref(), "app");
        assert_eq!(config.application_secret().as_ref(), "secret");
        assert_eq!(config.client_id().as_ref(), "client");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_v2_config_debug_masks_secret() {
        let config = V2Config::builder()
            .application_id(ApplicationId::new("app").unwrap())
            .application_secret(ApplicationSecret::new("very-secret").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .base_url(base_url())
            .build()
            .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("*****"));
    }
}
