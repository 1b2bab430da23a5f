use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::debug;

use crate::config::FlowConfig;
use crate::error::{FlowError, RequestError};

/// HTTP client bound to one [`FlowConfig`].
///
/// Holds the underlying `reqwest` client, which already carries the configured
/// `User-Agent`. No timeout or retry policy is set beyond the client defaults.
#[derive(Debug, Clone)]
pub struct FlowClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: FlowConfig,
}

impl FlowClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Client`] if the HTTP client cannot be initialized.
    pub fn new(config: FlowConfig) -> Result<Self, FlowError> {
        Self::with_builder(config, reqwest::Client::builder())
    }

    /// Creates a client from a pre-configured `reqwest` builder, e.g. one with
    /// proxies disabled. The configured `User-Agent` is applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Client`] if the HTTP client cannot be initialized.
    pub fn with_builder(
        config: FlowConfig,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, FlowError> {
        let credentials = config.credentials();
        debug!(
            client_id = credentials.client_id(),
            client_secret = %credentials.client_secret(),
            user_agent = config.user_agent(),
            "creating HTTP client"
        );

        let http = builder
            .user_agent(config.user_agent())
            .build()
            .map_err(FlowError::Client)?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Sends the request and returns the body of a 2xx response.
    ///
    /// Any other status becomes a [`RequestError::Status`] carrying the raw body.
    pub(crate) async fn send(request: RequestBuilder) -> Result<String, RequestError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        debug!(%url, %status, "response received");

        let body = response.text().await?;
        if !status.is_success() {
            return Err(RequestError::Status { status, url, body });
        }

        Ok(body)
    }

    /// Parses a response body as JSON, keeping the raw body on failure.
    pub(crate) fn parse_json(context: &'static str, body: String) -> Result<Value, FlowError> {
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(error) => Err(FlowError::InvalidJson {
                context,
                error,
                body,
            }),
        }
    }
}
