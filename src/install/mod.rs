// src/install/mod.rs
// =============================================================================
// This module contains everything needed to install the OpenGL headers.
//
// Submodules:
// - headers: The fixed list of headers and their destinations
// - source: Downloads the bytes behind a URL (HTTP, or a fake in tests)
// - installer: Creates the directories, writes the files, picks the exit code
// =============================================================================

mod headers;
mod installer;
mod source;

// Re-export what main.rs needs, so it can write `install::run()`
pub use installer::{failure_message, run};
pub use source::HttpSource;
