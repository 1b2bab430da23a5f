//! Token Acquirer: client-credentials exchange against the token endpoint.

use std::fmt;

use http::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::client::FlowClient;
use crate::error::FlowError;

/// The OAuth2 grant type sent to the token endpoint.
pub const GRANT_TYPE: &str = "client_credentials";

/// A bearer token obtained from the token endpoint.
///
/// Never empty: the only constructor rejects empty values.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token value, returning `None` when it is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.is_empty()).then_some(Self(value))
    }

    /// The raw token value.
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Extracts the `access_token` field from a token response body.
    ///
    /// Returns `None` when the field is absent, not a string, or empty.
    pub fn from_response(body: &Value) -> Option<Self> {
        body.get("access_token")
            .and_then(Value::as_str)
            .and_then(Self::new)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// Form body of the token request, in the order the fields are sent.
#[derive(Serialize)]
struct TokenRequestForm<'a> {
    grant_type: &'static str,
    scope: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

impl FlowClient {
    /// Encodes the token request body as `application/x-www-form-urlencoded`.
    pub(crate) fn token_request_body(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let credentials = self.config.credentials();
        serde_urlencoded::to_string(TokenRequestForm {
            grant_type: GRANT_TYPE,
            scope: self.config.scope(),
            client_id: credentials.client_id(),
            client_secret: credentials.client_secret().as_str(),
        })
    }

    /// Acquires an access token with the client credentials grant.
    ///
    /// # Errors
    ///
    /// - [`FlowError::TokenRequest`] on transport failure or a non-2xx status
    /// - [`FlowError::InvalidJson`] if the body is not JSON
    /// - [`FlowError::MissingToken`] if the body has no non-empty `access_token`
    pub async fn acquire_token(&self) -> Result<AccessToken, FlowError> {
        let token_url = self.config.credentials().token_url();
        debug!(%token_url, scope = self.config.scope(), "requesting access token");

        let body = self.token_request_body()?;

        let request = self
            .http
            .post(token_url.clone())
            .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .body(body);
        let raw_body = Self::send(request).await.map_err(FlowError::TokenRequest)?;

        let json = Self::parse_json("token response", raw_body)?;
        let Some(token) = AccessToken::from_response(&json) else {
            return Err(FlowError::MissingToken {
                body: pretty_json(&json),
            });
        };

        let token_type = json.get("token_type").and_then(Value::as_str);
        let expires_in = json.get("expires_in").and_then(Value::as_u64);
        debug!(token_type, expires_in, "token response received");
        info!("access token obtained");
        Ok(token)
    }
}

/// Pretty-prints a JSON value with two-space indentation.
pub(crate) fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
