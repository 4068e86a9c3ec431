//! Client credentials for the v2 token endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::{ApplicationId, ApplicationSecret};

/// Grant type sent to the token endpoint.
pub const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Scope requested from the token endpoint.
pub const TOKEN_SCOPE: &str = "client";

/// Encodes `"{application_id}:{application_secret}"` as standard base64,
/// for use in an `Authorization: Basic` header.
#[must_use]
pub fn encode_credentials(
    application_id: &ApplicationId,
    application_secret: &ApplicationSecret,
) -> String {
    STANDARD.encode(format!(
        "{}:{}",
        application_id.as_ref(),
        application_secret.as_ref()
    ))
}
