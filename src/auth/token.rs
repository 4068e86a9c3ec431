//! Access tokens for the PeopleDoc REST API v2.

use std::fmt;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// An access token returned by the v2 token endpoint.
///
/// # Security
///
/// The `Debug` implementation masks the access token.
///
/// # Example
///
/// ```rust
/// use people_doc::auth::Token;
///
/// let token: Token = serde_json::from_str(
///     r#"{"access_token":"abc","token_type":"bearer","expires_in":3600}"#,
/// ).unwrap();
///
/// assert_eq!(token.access_token, "abc");
/// assert!(!token.expired());
/// assert!(!format!("{token:?}").contains("abc"));
/// ```
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The bearer token.
    pub access_token: String,
    /// The token type, usually `bearer`.
    pub token_type: String,
    /// Lifetime in seconds, as reported by the token endpoint.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// When the token was received.
    #[serde(skip, default = "Utc::now")]
    pub issued_at: DateTime<Utc>,
}

impl Token {
    /// Returns when the token expires, if the endpoint reported a lifetime.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.expires_in?).ok()?;
        self.issued_at
            .checked_add_signed(Duration::try_seconds(seconds)?)
    }

    /// Returns `true` if the reported lifetime has elapsed.
    ///
    /// Clients do not refresh tokens; this is informational.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires_at().is_some_and(|at| Utc::now() >= at)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"*****")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Memo of the first token obtained by a client.
///
/// The first successful token is stored and reused for the lifetime of the
/// cache; there is no refresh on expiry. The lock is not held while a token
/// is fetched, so concurrent first use may fetch more than once. The first
/// token stored wins and later fetches are discarded.
#[derive(Debug, Default)]
pub struct TokenCache {
    token: RwLock<Option<Token>>,
}

impl TokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token, if any.
    #[must_use]
    pub fn get(&self) -> Option<Token> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores `token` unless one is already cached, returning the cached token.
    pub fn store(&self, token: Token) -> Token {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert(token).clone()
    }

    /// Returns the cached token, fetching and storing one on first use.
    ///
    /// # Errors
    ///
    /// Returns the error of `fetch`; nothing is cached in that case.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<Token, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Token, E>>,
    {
        if let Some(token) = self.get() {
            return Ok(token);
        }

        let token = fetch().await?;
        Ok(self.store(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn token(access_token: &str) -> Token {
        Token {
            access_token: access_token.to_string(),
            token_type: "bearer".to_string(),
            expires_in: Some(3600),
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_deserializes_endpoint_response() {
        let token: Token = serde_json::from_str(
            r#"{"access_token":"abc","token_type":"bearer","expires_in":3600}"#,
        )
        .unwrap();

        assert_eq!(token.access_token, "abc");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, Some(3600));
    }

    #[test]
    fn test_token_without_lifetime_never_expires() {
        let token: Token =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        assert!(token.expires_at().is_none());
        assert!(!token.expired());
    }

    #[test]
    fn test_token_expiry() {
        let mut token = token("abc");
        assert!(!token.expired());

        token.issued_at = Utc::now() - Duration::hours(2);
        assert!(token.expired());
        assert_eq!(
            token.expires_at(),
            Some(token.issued_at + Duration::seconds(3600))
        );
    }

    #[test]
    fn test_token_debug_masks_access_token() {
        let debug = format!("{:?}", token("very-secret-token"));
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("*****"));
    }

    #[test]
    fn test_first_stored_token_wins() {
        let cache = TokenCache::new();
        assert!(cache.get().is_none());

        assert_eq!(cache.store(token("first")).access_token, "first");
        assert_eq!(cache.store(token("second")).access_token, "first");
        assert_eq!(cache.get().unwrap().access_token, "first");
    }

    #[tokio::test]
    async fn test_get_or_fetch_fetches_once() {
        let cache = TokenCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let token = cache
                .get_or_fetch(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(token("abc"))
                })
                .await
                .unwrap();
            assert_eq!(token.access_token, "abc");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_does_not_cache_errors() {
        let cache = TokenCache::new();

        let result = cache.get_or_fetch(|| async { Err("denied") }).await;
        assert_eq!(result, Err("denied"));
        assert!(cache.get().is_none());

        let result = cache
            .get_or_fetch(|| async { Ok::<_, &str>(token("abc")) })
            .await;
        assert_eq!(result.unwrap().access_token, "abc");
    }
}
