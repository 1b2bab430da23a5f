//! API Caller: one authenticated GET with the bearer token.

use http::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::FlowClient;
use crate::error::FlowError;
use crate::token::AccessToken;

impl FlowClient {
    /// Calls the configured API endpoint with the given bearer token.
    ///
    /// Sends `Authorization: Bearer <token>`, the configured `User-Agent` and
    /// `Accept: application/json`, and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// - [`FlowError::ApiRequest`] on transport failure or a non-2xx status
    /// - [`FlowError::InvalidJson`] if the body is not JSON
    pub async fn call_api(&self, token: &AccessToken) -> Result<Value, FlowError> {
        let api_url = self.config.credentials().api_url();
        debug!(%api_url, "calling API");

        let request = self
            .http
            .get(api_url.clone())
            .bearer_auth(token.secret())
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref());
        let raw_body = Self::send(request).await.map_err(FlowError::ApiRequest)?;

        let json = Self::parse_json("API response", raw_body)?;
        info!("API response received");
        Ok(json)
    }
}
