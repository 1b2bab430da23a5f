//! # ccflow core
//!
//! Obtain an OAuth2 access token with the client credentials grant, then call
//! one API endpoint with it.
//!
//! The flow has two strictly sequential steps:
//! - **Token Acquirer** ([`FlowClient::acquire_token`]): form-encoded `POST` to the
//!   token endpoint with `grant_type=client_credentials`, the scope, the client id
//!   and the client secret. The `access_token` field of the JSON response becomes
//!   an [`AccessToken`].
//! - **API Caller** ([`FlowClient::call_api`]): `GET` on the API endpoint with
//!   `Authorization: Bearer <token>` and `Accept: application/json`.
//!
//! [`run`] chains both and prints the outcome.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ccflow_core::{Credentials, FlowClient, FlowConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new(
//!     "client-id",
//!     "client-secret",
//!     "https://example.com/webtrees/oauth/token",
//!     "https://example.com/webtrees/api/version",
//! )?;
//! let config = FlowConfig::builder(credentials)
//!     .with_scope("api_read")
//!     .build()?;
//! let client = FlowClient::new(config)?;
//!
//! let token = client.acquire_token().await?;
//! let version = client.call_api(&token).await?;
//! println!("{version:#}");
//! # Ok(())
//! # }
//! ```
//!
//! Tokens are neither cached nor refreshed, and failed requests are not retried.

mod api;
mod client;
mod config;
mod error;
mod flow;
mod secret;
mod token;

pub use self::client::FlowClient;
pub use self::config::{
    ConfigError, Credentials, DEFAULT_SCOPE, DEFAULT_USER_AGENT, FlowConfig, FlowConfigBuilder,
};
pub use self::error::{EXIT_FAILURE, FlowError, RequestError};
pub use self::flow::{API_RESPONSE_HEADER, TOKEN_OBTAINED_MESSAGE, run};
pub use self::secret::SecureString;
pub use self::token::{AccessToken, GRANT_TYPE};
