//! if_changed entry point.
//!
//! The only place where errors become exit codes and diagnostics.

use std::io;
use std::process::ExitCode;

use ifchanged_cli::{execute, Cli, RunError};
use ifchanged_core::{exit_code, ChangeVerdict, Settings, StateLocator, EXIT_FAILURE};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays empty
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(verdict) => ExitCode::from(exit_code(verdict)),
        Err(e) => {
            report(&e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run() -> Result<ChangeVerdict, RunError> {
    let key = Cli::from_env()?.key()?;
    let settings = Settings::from_env()?;
    let locator = StateLocator::from_env();

    execute(&key, &settings, &locator, io::stdin().lock())
}

fn report(error: &RunError) {
    if error.is_usage() {
        eprintln!("{}\n", error);
        eprintln!("{}", ifchanged_cli::usage());
    } else {
        eprintln!("Unexpected error:");
        eprintln!("{}", error);
    }
}
