//! Command-line front end of the client-credentials flow.
//!
//! Settings come from flags or `CCFLOW_*` environment variables. The JSON
//! response goes to standard output; errors and logs go to standard error.

use std::io::Write;

use tracing::{info, warn};

use ccflow_core::{EXIT_FAILURE, FlowClient};

mod args;
pub use self::args::*;

/// Exit status of a successful run.
pub const EXIT_SUCCESS: u8 = 0;

/// Installs the tracing subscriber, writing to standard error.
pub fn init_tracing(args: &AppArgs) {
    // fails if a subscriber is already set, which is fine
    let _ = tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs the flow and returns the process exit status.
///
/// Progress and the API response are written to `out`, errors to `err`.
pub async fn execute<O: Write, E: Write>(args: &AppArgs, out: &mut O, err: &mut E) -> u8 {
    if !args.remaining.is_empty() {
        warn!(remaining = ?args.remaining, "Warning: unused arguments left");
    }

    let result = match args.to_config() {
        Ok(config) => match FlowClient::new(config) {
            Ok(client) => ccflow_core::run(&client, out).await,
            Err(error) => Err(error),
        },
        Err(error) => Err(error.into()),
    };

    match result {
        Ok(()) => {
            info!("Bye!");
            EXIT_SUCCESS
        }
        Err(error) => {
            // nothing left to report to if stderr is gone
            let _ = writeln!(err, "{error}");
            error.exit_code()
        }
    }
}

/// Writes the usage text.
pub fn print_usage<O: Write>(out: &mut O) -> u8 {
    match out.write_all(USAGE.as_bytes()) {
        Ok(()) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}
