//! Operator-supplied settings for the client-credentials flow.

use std::fmt;

use http::HeaderValue;
use url::Url;

use crate::secret::SecureString;

/// The scope requested from the token endpoint unless configured otherwise.
pub const DEFAULT_SCOPE: &str = "api_read";

/// The `User-Agent` sent with both requests unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!("ccflow/", env!("CARGO_PKG_VERSION"));

/// Errors raised while validating the operator configuration.
///
/// These are reported before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum ConfigError {
    /// A required setting was not supplied, or was supplied empty.
    #[display("missing required setting '{name}'")]
    MissingSetting {
        /// The name of the missing setting.
        name: &'static str,
    },

    /// A URL setting could not be parsed.
    #[display("invalid {name} '{url}': {reason}")]
    InvalidUrl {
        /// The name of the setting holding the URL.
        name: &'static str,
        /// The value that was provided.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// A setting cannot be sent as an HTTP header value.
    #[display("invalid {name} '{value}': not a valid header value")]
    InvalidHeaderValue {
        /// The name of the setting.
        name: &'static str,
        /// The value that was provided.
        value: String,
    },
}

/// The four values identifying the client and the two endpoints.
///
/// Constant for the process lifetime: there are no setters.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecureString,
    token_url: Url,
    api_url: Url,
}

impl Credentials {
    /// Validates and builds the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSetting`] when the client id or secret is empty,
    /// and [`ConfigError::InvalidUrl`] when either URL does not parse.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<SecureString>,
        token_url: impl AsRef<str>,
        api_url: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let client_id = client_id.into();
        if client_id.is_empty() {
            return Err(ConfigError::MissingSetting { name: "client id" });
        }

        let client_secret = client_secret.into();
        if client_secret.is_empty() {
            return Err(ConfigError::MissingSetting {
                name: "client secret",
            });
        }

        Ok(Self {
            client_id,
            client_secret,
            token_url: parse_url("token URL", token_url.as_ref())?,
            api_url: parse_url("API URL", api_url.as_ref())?,
        })
    }

    /// The OAuth2 client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The OAuth2 client secret.
    pub fn client_secret(&self) -> &SecureString {
        &self.client_secret
    }

    /// The token endpoint.
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// The API endpoint called with the bearer token.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("token_url", &self.token_url.as_str())
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingSetting { name });
    }
    Url::parse(value).map_err(|err| ConfigError::InvalidUrl {
        name,
        url: value.to_string(),
        reason: err.to_string(),
    })
}

/// Full configuration of one flow run.
///
/// Use [`FlowConfig::builder`] to create instances.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub(crate) credentials: Credentials,
    pub(crate) scope: String,
    pub(crate) user_agent: String,
}

impl FlowConfig {
    /// Creates a builder with the default scope and user agent.
    pub fn builder(credentials: Credentials) -> FlowConfigBuilder {
        FlowConfigBuilder {
            credentials,
            scope: DEFAULT_SCOPE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// The client credentials and endpoints.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The scope requested from the token endpoint.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The `User-Agent` header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Builder for [`FlowConfig`].
#[derive(Debug, Clone)]
pub struct FlowConfigBuilder {
    credentials: Credentials,
    scope: String,
    user_agent: String,
}

impl FlowConfigBuilder {
    /// Sets the requested scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the scope is empty or the user agent is not a valid header value.
    pub fn build(self) -> Result<FlowConfig, ConfigError> {
        if self.scope.is_empty() {
            return Err(ConfigError::MissingSetting { name: "scope" });
        }
        if self.user_agent.is_empty() || HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ConfigError::InvalidHeaderValue {
                name: "user agent",
                value: self.user_agent,
            });
        }

        Ok(FlowConfig {
            credentials: self.credentials,
            scope: self.scope,
            user_agent: self.user_agent,
        })
    }
}
