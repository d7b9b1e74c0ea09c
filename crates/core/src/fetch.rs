//! Content fetching from URLs, files, and stdin.
//!
//! The [`Fetcher`] issues exactly one GET per call with a fixed identifying
//! User-Agent, a timeout, and a cap on the body size. Local files and
//! standard input are read with [`fetch_file`] and [`fetch_stdin`].

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::{Client, header};
use url::Url;

use crate::{GleanError, Result};

/// Identification header sent to upstream servers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; ContentAuditBot/1.0)";

/// Default cap on the response body, 10 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout, user agent, and body size limits.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds, covering connect and body.
    pub timeout: u64,
    /// User-Agent string identifying the fetching agent.
    pub user_agent: String,
    /// Largest response body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: DEFAULT_USER_AGENT.to_string(), max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }
}

/// A single URL to fetch.
///
/// Construction rejects blank input, so a `FetchRequest` always carries a
/// non-empty URL. Syntax is checked when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: String,
}

impl FetchRequest {
    /// Creates a request, returning [`GleanError::MissingInput`] for blank URLs.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(GleanError::MissingInput);
        }
        Ok(Self { url: trimmed.to_string() })
    }

    /// The URL as supplied by the caller (surrounding whitespace removed).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parses the URL, accepting only `http` and `https`.
    pub fn parse_url(&self) -> Result<Url> {
        let parsed = Url::parse(&self.url).map_err(|e| GleanError::InvalidUrl(format!("{}: {}", self.url, e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(GleanError::InvalidUrl(format!(
                "unsupported scheme '{}' (expected http:// or https://)",
                other
            ))),
        }
    }
}

/// Raw markup returned by a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Response body decoded as UTF-8 (invalid sequences replaced).
    pub raw_markup: String,
    /// The URL the caller asked for.
    pub source_url: String,
    /// HTTP status of the response, always 2xx.
    pub status: u16,
}

/// Reusable HTTP fetcher.
///
/// Holds a pooled client configured once from [`FetchConfig`]. The client
/// keeps no per-request state, so one `Fetcher` can serve concurrent calls.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl Fetcher {
    /// Builds the underlying HTTP client.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(GleanError::HttpError)?;

        Ok(Self { client, config })
    }

    /// The configuration this fetcher was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches a page.
    ///
    /// Issues one GET and fails on transport errors, timeouts, non-2xx
    /// statuses, and bodies larger than `max_body_bytes`. There is no retry.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult> {
        let url = request.parse_url()?;
        let limit = self.config.max_body_bytes;

        tracing::debug!(url = %url, stage = "fetch", "sending request");

        let mut response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.config.user_agent)
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = request.url(), stage = "fetch", status = status.as_u16(), "upstream rejected request");
            return Err(GleanError::UpstreamStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        if let Some(declared) = response.content_length()
            && declared > limit as u64
        {
            return Err(GleanError::BodyTooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.classify(e))? {
            if body.len() + chunk.len() > limit {
                return Err(GleanError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url = request.url(), stage = "fetch", bytes = body.len(), "received body");

        Ok(FetchResult {
            raw_markup: String::from_utf8_lossy(&body).into_owned(),
            source_url: request.url().to_string(),
            status: status.as_u16(),
        })
    }

    fn classify(&self, err: reqwest::Error) -> GleanError {
        if err.is_timeout() {
            GleanError::Timeout { timeout: self.config.timeout }
        } else {
            GleanError::HttpError(err)
        }
    }
}

/// Fetches HTML content from a URL with a one-off [`Fetcher`].
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<FetchResult> {
    let request = FetchRequest::new(url)?;
    Fetcher::new(config.clone())?.fetch(&request).await
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(GleanError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(GleanError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(GleanError::from)?;

    Ok(buffer)
}
