// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (exactly one: the include directory)
// 2. Set up logging to stderr
// 3. Build the HTTP client and run the install
// 4. Exit with proper code (0 = headers installed, 1 = anything went wrong)
//
// Only this file calls std::process::exit. Everything below it returns an
// exit code instead, so it can be tested without ending the test process.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod install; // src/install/ - directory creation and header downloads

use anyhow::Result;
use cli::{Cli, ParsedArgs};
use std::io::Write;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = match cli::parse_args(std::env::args_os()) {
        ParsedArgs::Run(cli) => cli,
        ParsedArgs::Exit(code) => std::process::exit(code),
    };

    init_logging(cli.verbose);

    let code = exit_code(run(&cli).await, &mut std::io::stdout());

    std::process::exit(code);
}

// Turns the outcome of `run` into the process exit code
//
// A setup error (the install never started) is reported with the same
// failure line as any other failure.
fn exit_code<W: Write>(outcome: Result<i32>, out: &mut W) -> i32 {
    match outcome {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Setup failed");
            let _ = writeln!(out, "{}", install::failure_message(&e));
            1
        }
    }
}

// Builds the HTTP client and runs the install
// Returns:
//   Ok(0) = all headers installed
//   Ok(1) = the install failed (already reported on stdout)
//   Err = the HTTP client could not be created
async fn run(cli: &Cli) -> Result<i32> {
    let source = install::HttpSource::new(Duration::from_secs(cli.timeout))?;

    let mut stdout = std::io::stdout();
    Ok(install::run(&cli.include_path, &source, &mut stdout).await)
}

// Sends tracing output to stderr, keeping stdout for the status lines the
// build system shows to the user
//
// RUST_LOG wins when set; otherwise only errors, or everything from this
// crate with --verbose.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "gl_header_fetch=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_status_passes_through() {
        let mut out = Vec::<u8>::new();
        assert_eq!(exit_code(Ok(0), &mut out), 0);
        assert_eq!(exit_code(Ok(1), &mut out), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_setup_error_is_reported_as_failure() {
        let mut out = Vec::<u8>::new();

        let code = exit_code(Err(anyhow::anyhow!("TLS backend unavailable")), &mut out);

        assert_eq!(code, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "-- Failed to install OpenGL dependencies! Reason: TLS backend unavailable\n"
        );
    }
}
