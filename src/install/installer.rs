// src/install/installer.rs
// =============================================================================
// This module runs the actual install: the whole life of the program
// between "arguments parsed" and "exit code chosen".
//
// What happens here:
// 1. Check that the include directory exists
// 2. Announce the download
// 3. Create GL/ and KHR/ inside the include directory
// 4. Download each header, in order, and write it to disk
// 5. Report success, or report the first failure and stop
//
// There is no rollback: if the second download fails, the first header
// stays on disk. Running twice against the same directory fails the second
// time because GL/ already exists.
//
// Rust concepts:
// - thiserror: One enum listing every way the install can fail
// - Trait objects: `&dyn HeaderSource` so tests can fake the network
// - impl Write: Status lines go to any writer (stdout in main, a Vec in tests)
// =============================================================================

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::headers::{KHRONOS_HEADERS, SUBDIRECTORIES};
use super::source::{FetchError, HeaderSource};

pub const START_MESSAGE: &str = "-- Downloading OpenGL dependencies...";
pub const SUCCESS_MESSAGE: &str = "-- Successfully downloaded OpenGL dependencies.";
const FAILURE_PREFIX: &str = "-- Failed to install OpenGL dependencies! Reason:";

// Every way the install can fail
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("no such directory: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Formats the single line printed for any failure
pub fn failure_message(reason: &dyn std::fmt::Display) -> String {
    format!("{} {}", FAILURE_PREFIX, reason)
}

// Runs the install and turns the outcome into an exit code
//
// Returns: 0 if all headers were installed, 1 otherwise
//
// Status lines are written to `out`. A failure to write a status line is
// ignored: it must not change the exit code the build system sees.
pub async fn run<W: Write>(root: &Path, source: &dyn HeaderSource, out: &mut W) -> i32 {
    let is_dir = tokio::fs::metadata(root)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        let err = InstallError::MissingDirectory(root.to_path_buf());
        tracing::warn!(error = %err, "Include directory check failed");
        let _ = writeln!(out, "{}", failure_message(&err));
        return 1;
    }

    let _ = writeln!(out, "{}", START_MESSAGE);
    // Make sure the notice is visible before a slow download starts
    let _ = out.flush();

    match install_headers(root, source).await {
        Ok(written) => {
            tracing::info!(
                root = %root.display(),
                files = written.len(),
                "Installed OpenGL headers"
            );
            let _ = writeln!(out, "{}", SUCCESS_MESSAGE);
            0
        }
        Err(err) => {
            tracing::warn!(error = %err, "Install aborted");
            let _ = writeln!(out, "{}", failure_message(&err));
            1
        }
    }
}

// Creates the subdirectories and downloads every header into them
//
// Stops at the first error. Returns the written paths in download order.
pub async fn install_headers(
    root: &Path,
    source: &dyn HeaderSource,
) -> Result<Vec<PathBuf>, InstallError> {
    // create_dir, not create_dir_all: an existing GL/ is an error
    for subdir in SUBDIRECTORIES {
        let path = root.join(subdir);
        tokio::fs::create_dir(&path)
            .await
            .map_err(|source| InstallError::CreateDir {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "Created directory");
    }

    let mut written = Vec::with_capacity(KHRONOS_HEADERS.len());
    for header in &KHRONOS_HEADERS {
        // Body is fully downloaded before the file is created, so a failed
        // download never leaves an empty or truncated header behind
        let body = source.fetch(header.url).await?;

        let path = header.destination(root);
        tokio::fs::write(&path, &body)
            .await
            .map_err(|source| InstallError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = body.len(), "Wrote header");

        written.push(path);
    }

    Ok(written)
}
