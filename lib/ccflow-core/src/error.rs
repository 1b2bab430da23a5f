use std::error::Error as _;

use reqwest::StatusCode;

use crate::config::ConfigError;

/// The process exit status reported for any failure of the flow.
pub const EXIT_FAILURE: u8 = 1;

/// Failure of a single HTTP exchange.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum RequestError {
    /// The request could not be sent or its response could not be read.
    #[display("{}", source_chain(_0))]
    Transport(reqwest::Error),

    /// The server answered with a status outside the 2xx range.
    #[display("{status} for url {url}: {body}")]
    #[from(skip)]
    Status {
        /// The status code received.
        status: StatusCode,
        /// The URL that was requested.
        url: String,
        /// The raw response body, kept for diagnostics.
        body: String,
    },
}

impl RequestError {
    /// The HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status(),
            Self::Status { status, .. } => Some(*status),
        }
    }
}

/// Appends the `source()` chain, so the underlying cause (e.g. connection refused) is shown.
fn source_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// Errors that terminate the authenticate-then-call flow.
///
/// None of them is retried. Every variant maps to [`EXIT_FAILURE`].
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum FlowError {
    /// The operator configuration is invalid.
    #[display("Invalid configuration: {_0}")]
    Config(ConfigError),

    /// The HTTP client could not be created.
    #[display("Error creating HTTP client: {_0}")]
    #[from(skip)]
    Client(reqwest::Error),

    /// The token endpoint could not be reached or answered with a non-2xx status.
    #[display("Error requesting access token: {_0}")]
    #[from(skip)]
    TokenRequest(RequestError),

    /// The token response carried no usable `access_token`.
    #[display("Failed to retrieve access token.\nResponse: {body}")]
    #[from(skip)]
    MissingToken {
        /// The full token response, pretty-printed.
        body: String,
    },

    /// The API endpoint could not be reached or answered with a non-2xx status.
    #[display("Error making API request: {_0}")]
    #[from(skip)]
    ApiRequest(RequestError),

    /// A response body was not valid JSON.
    #[display("Invalid JSON in {context}: {error}\n{body}")]
    #[from(skip)]
    InvalidJson {
        /// Which response failed to parse.
        context: &'static str,
        /// The underlying parse error.
        error: serde_json::Error,
        /// The raw response body.
        body: String,
    },

    /// The token request form could not be encoded.
    #[display("Error encoding token request: {_0}")]
    FormEncoding(serde_urlencoded::ser::Error),

    /// Writing the output failed.
    #[display("Error writing output: {_0}")]
    Output(std::io::Error),
}

impl FlowError {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}
