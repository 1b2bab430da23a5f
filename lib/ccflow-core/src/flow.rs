//! The linear authenticate-then-call flow.

use std::io::Write;

use tracing::debug;

use crate::client::FlowClient;
use crate::error::FlowError;
use crate::token::pretty_json;

/// Printed once the token endpoint returned a usable token.
pub const TOKEN_OBTAINED_MESSAGE: &str = "Access token obtained successfully.";

/// Printed right before the pretty-printed API response.
pub const API_RESPONSE_HEADER: &str = "API Response:";

/// Runs both steps in order, writing progress and the API response to `out`.
///
/// The API is only called once a non-empty token has been obtained. The first
/// failure stops the flow.
///
/// # Errors
///
/// Returns the first [`FlowError`] raised by either step, or
/// [`FlowError::Output`] if writing to `out` fails.
pub async fn run<W: Write>(client: &FlowClient, out: &mut W) -> Result<(), FlowError> {
    let token = client.acquire_token().await?;
    writeln!(out, "{TOKEN_OBTAINED_MESSAGE}")?;

    let response = client.call_api(&token).await?;
    writeln!(out, "{API_RESPONSE_HEADER}")?;
    writeln!(out, "{}", pretty_json(&response))?;
    out.flush()?;

    debug!("flow completed");
    Ok(())
}
