// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The tool takes exactly one positional argument: the include directory the
// headers are installed into. It is meant to be called by a build system
// (e.g. from a CMake custom command), not by hand.
//
// clap would normally exit with code 2 on a bad command line. The build
// system only distinguishes 0 from non-zero, but we keep a single failure
// code (1) for every error, so we parse with try_parse_from and handle the
// error ourselves.
// =============================================================================

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const DEFAULT_PROGRAM_NAME: &str = "gl-header-fetch";

#[derive(Parser, Debug)]
#[command(
    name = "gl-header-fetch",
    version,
    about = "Downloads the Khronos OpenGL/EGL headers into an include directory",
    long_about = "gl-header-fetch creates GL/ and KHR/ inside the given include directory and \
                  downloads glcorearb.h, wglext.h and khrplatform.h from the Khronos registry."
)]
pub struct Cli {
    /// Existing directory to install the headers into
    ///
    /// GL/ and KHR/ must not exist inside it yet.
    pub include_path: PathBuf,

    /// Timeout for each download, in seconds (at least 1)
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Print debug logs to stderr (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

// What main should do after looking at the command line
#[derive(Debug)]
pub enum ParsedArgs {
    /// Arguments are fine, go ahead
    Run(Cli),
    /// Stop right away with this exit code (help, version, or a usage error)
    Exit(i32),
}

// Parses the command line
//
// On a usage error (missing or extra arguments, bad or zero --timeout) the
// usage message is printed to stdout and we exit with 1. --help and
// --version print clap's text and exit with 0.
pub fn parse_args<I, T>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = program_name(args.first());

    match Cli::try_parse_from(&args) {
        Ok(cli) => ParsedArgs::Run(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // Help and version text are not errors; clap prints them to stdout
            let _ = e.print();
            ParsedArgs::Exit(0)
        }
        Err(_) => {
            println!("{}", usage_message(&program));
            ParsedArgs::Exit(1)
        }
    }
}

/// The message shown when the command line is wrong
pub fn usage_message(program: &str) -> String {
    format!(
        "Usage: {} <project-include-path>\n\
         Please note that this tool is meant to be executed by the build system and not manually!",
        program
    )
}

// Name to show in the usage line: the executable's file name, as invoked
fn program_name(arg0: Option<&OsString>) -> String {
    arg0.and_then(|a| Path::new(a).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_argument_runs() {
        match parse_args(["gl-header-fetch", "build/include"]) {
            ParsedArgs::Run(cli) => {
                assert_eq!(cli.include_path, PathBuf::from("build/include"));
                assert_eq!(cli.timeout, 60);
                assert!(!cli.verbose);
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_no_argument_is_usage_error() {
        assert!(matches!(parse_args(["gl-header-fetch"]), ParsedArgs::Exit(1)));
    }

    #[test]
    fn test_two_arguments_is_usage_error() {
        let parsed = parse_args(["gl-header-fetch", "include", "extra"]);
        assert!(matches!(parsed, ParsedArgs::Exit(1)));
    }

    #[test]
    fn test_bad_timeout_is_usage_error() {
        let parsed = parse_args(["gl-header-fetch", "--timeout", "soon", "include"]);
        assert!(matches!(parsed, ParsedArgs::Exit(1)));
    }

    #[test]
    fn test_zero_timeout_is_usage_error() {
        let parsed = parse_args(["gl-header-fetch", "--timeout", "0", "include"]);
        assert!(matches!(parsed, ParsedArgs::Exit(1)));
    }

    #[test]
    fn test_options() {
        match parse_args(["gl-header-fetch", "--timeout", "5", "-v", "include"]) {
            ParsedArgs::Run(cli) => {
                assert_eq!(cli.timeout, 5);
                assert!(cli.verbose);
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_usage_message_uses_program_file_name() {
        let program = program_name(Some(&OsString::from("/opt/tools/gl-header-fetch")));
        assert_eq!(program, "gl-header-fetch");
        assert!(usage_message(&program).starts_with("Usage: gl-header-fetch <project-include-path>"));
    }

    #[test]
    fn test_program_name_fallback() {
        assert_eq!(program_name(None), DEFAULT_PROGRAM_NAME);
    }
}
