// src/install/source.rs
// =============================================================================
// This module turns a URL into the bytes of the file behind it.
//
// Key functionality:
// - HeaderSource: a small trait with one async `fetch` method
// - HttpSource: the real implementation, backed by a reqwest Client
// - FetchError: what can go wrong (transport failure or a bad HTTP status)
//
// Why a trait?
// - The installer only needs "give me the bytes for this URL"
// - Tests plug in an in-memory source and never touch the network
//
// Rust concepts:
// - Traits: Shared behavior that different types can implement
// - async-trait: Lets trait methods be async
// - thiserror: Derives std::error::Error and Display for our error enum
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

// Everything that can go wrong while downloading one URL
//
// The installer stops at the first one of these, so each variant carries
// the URL to make the failure message self-explanatory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a usable response (DNS, TLS, timeout,
    /// connection reset while reading the body, ...)
    #[error("failed to download {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered, but not with a 2xx status
    #[error("failed to download {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}

// Anything that can fetch the contents of a URL
#[async_trait]
pub trait HeaderSource: Send + Sync {
    /// Downloads the complete body of `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

// Downloads headers over HTTP(S)
//
// One Client is reused for every request (connection pooling).
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Builds the HTTP client with a whole-request timeout
    ///
    /// Redirects follow reqwest's default policy.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HeaderSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(%url, "Sending request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        // A 404 page is not a header: only 2xx counts as success
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Read the whole body before anyone touches the disk
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(url, &e))?;

        tracing::debug!(%url, bytes = body.len(), "Received response body");
        Ok(body.to_vec())
    }
}

// Converts a reqwest error into our error type
//
// reqwest's top-level message is often just "error sending request for url";
// the useful part (DNS failure, certificate problem, ...) sits in the
// source chain, so we append it.
fn transport_error(url: &str, error: &reqwest::Error) -> FetchError {
    let mut reason = if error.is_timeout() {
        "request timed out".to_string()
    } else {
        error.to_string()
    };

    let mut source = error.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }

    FetchError::Transport {
        url: url.to_string(),
        reason,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `Send + Sync` on the trait?
//    - The trait object is used across .await points on the tokio runtime
//    - async-trait boxes the returned futures, which must be Send
//
// 2. Why Vec<u8> and not String?
//    - Headers are text, but we write them to disk unchanged
//    - Bytes avoid a UTF-8 check we don't need
//
// 3. What does map_err do?
//    - Converts the error inside a Result into another error type
//    - Here: reqwest::Error -> FetchError, so `?` can propagate it
// -----------------------------------------------------------------------------
