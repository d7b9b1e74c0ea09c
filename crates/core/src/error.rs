//! Error types for Gleaner operations.
//!
//! This module defines the main error type [`GleanError`] which represents
//! every failure the fetch and extraction pipeline can surface, and
//! [`ErrorKind`], the coarse classification callers map to responses.
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::{GleanError, Result};
//!
//! fn require_url(url: &str) -> Result<&str> {
//!     if url.trim().is_empty() {
//!         return Err(GleanError::MissingInput);
//!     }
//!     Ok(url)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetching and extraction.
///
/// Every variant is terminal for the current request: no partial text is
/// ever returned alongside one of these.
///
/// # Example
///
/// ```rust
/// use gleaner_core::{GleanError, extract};
///
/// match extract("<html><head></head></html>", "https://example.com") {
///     Ok(result) => println!("{}", result.content),
///     Err(GleanError::NoContentRegion) => println!("nothing to read"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum GleanError {
    /// The URL (or raw text) was absent or blank.
    #[error("Input is required: provide a URL or text")]
    MissingInput,

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when the fetch exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or uses a scheme other than
    /// http or https.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The remote server answered with a non-2xx status.
    #[error("Failed to fetch URL: HTTP {status} {reason}")]
    UpstreamStatus { status: u16, reason: String },

    /// The response body exceeded the configured size limit.
    #[error("Response body exceeds the {limit} byte limit")]
    BodyTooLarge { limit: usize },

    /// HTML parsing errors.
    ///
    /// Only returned when no document tree at all could be produced.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No article, main, or body element exists to select.
    #[error("Could not find main content")]
    NoContentRegion,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// The result could not be rendered as JSON.
    #[error("Failed to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Coarse classification of a [`GleanError`].
///
/// Callers use this to pick a status code or exit path without matching on
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    TransportFailure,
    Timeout,
    UpstreamStatusFailure,
    ParseFailure,
    NoContentRegion,
    Io,
}

impl GleanError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GleanError::MissingInput => ErrorKind::MissingInput,
            #[cfg(feature = "fetch")]
            GleanError::HttpError(_) => ErrorKind::TransportFailure,
            GleanError::InvalidUrl(_) | GleanError::BodyTooLarge { .. } => ErrorKind::TransportFailure,
            GleanError::Timeout { .. } => ErrorKind::Timeout,
            GleanError::UpstreamStatus { .. } => ErrorKind::UpstreamStatusFailure,
            GleanError::HtmlParseError(_) => ErrorKind::ParseFailure,
            GleanError::NoContentRegion => ErrorKind::NoContentRegion,
            GleanError::FileNotFound(_) | GleanError::WriteError(_) | GleanError::SerializeError(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for GleanError.
///
/// This is a convenience alias for `std::result::Result<T, GleanError>`.
pub type Result<T> = std::result::Result<T, GleanError>;
