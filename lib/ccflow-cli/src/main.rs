#![allow(missing_docs)]
use std::io::{self, Write};
use std::process::ExitCode;

use ccflow_cli::{Command, execute, init_tracing, print_usage};
use ccflow_core::EXIT_FAILURE;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let code = match Command::from_env() {
        Ok(Command::Help) => print_usage(&mut io::stdout()),
        Ok(Command::Run(args)) => {
            init_tracing(&args);
            execute(&args, &mut io::stdout(), &mut io::stderr()).await
        }
        Err(error) => {
            let _ = writeln!(io::stderr(), "Error: {error:#}");
            EXIT_FAILURE
        }
    };

    ExitCode::from(code)
}
