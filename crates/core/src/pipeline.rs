//! Main fetch-and-extract API.
//!
//! The [`Gleaner`] struct composes the two stages: the fetcher returns raw
//! markup or an error, and the extractor consumes only the success value.
//! Free functions [`extract`] and [`fetch_and_extract`] use the defaults.
//!
//! # Example
//!
//! ```rust,no_run
//! use gleaner_core::{Gleaner, GleanerConfig};
//!
//! # async fn example() -> gleaner_core::Result<()> {
//! let gleaner = Gleaner::with_config(GleanerConfig::builder().timeout(10).build())?;
//! let result = gleaner.fetch_and_extract("https://example.com/article").await?;
//! println!("{}", result.content);
//! # Ok(())
//! # }
//! ```

use crate::article::ExtractionResult;
use crate::extract::{ExtractConfig, extract_content};
#[cfg(feature = "fetch")]
use crate::fetch::{FetchRequest, Fetcher};
use crate::fetch::FetchConfig;
use crate::normalize::normalize_text;
use crate::parse::Document;
use crate::{GleanError, Result};

/// Configuration for the whole pipeline.
///
/// # Example
///
/// ```rust
/// use gleaner_core::GleanerConfig;
///
/// let config = GleanerConfig::builder()
///     .timeout(15)
///     .max_body_bytes(2 * 1024 * 1024)
///     .noise_tags(["script", "style", "nav", "footer", "aside", "header"])
///     .build();
/// assert_eq!(config.fetch.timeout, 15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GleanerConfig {
    /// HTTP fetch settings.
    pub fetch: FetchConfig,
    /// Extraction settings.
    pub extract: ExtractConfig,
}

impl GleanerConfig {
    /// Creates a new builder for GleanerConfig.
    pub fn builder() -> GleanerConfigBuilder {
        GleanerConfigBuilder::new()
    }
}

/// Builder for GleanerConfig.
pub struct GleanerConfigBuilder {
    config: GleanerConfig,
}

impl GleanerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: GleanerConfig::default() }
    }

    /// Sets the fetch timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the identifying User-Agent.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the largest accepted response body.
    pub fn max_body_bytes(mut self, value: usize) -> Self {
        self.config.fetch.max_body_bytes = value;
        self
    }

    /// Replaces the list of pruned element names.
    pub fn noise_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extract.noise_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the config.
    pub fn build(self) -> GleanerConfig {
        self.config
    }
}

impl Default for GleanerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for fetching and extraction.
///
/// A `Gleaner` holds only fixed configuration and a pooled HTTP client, so
/// it can be shared across concurrent requests. Every call builds its own
/// document tree.
///
/// # Example
///
/// ```rust
/// use gleaner_core::Gleaner;
///
/// let gleaner = Gleaner::new().unwrap();
/// let html = "<html><body><nav>menu</nav><article><p>Content here</p></article></body></html>";
/// let result = gleaner.extract(html, "https://example.com").unwrap();
/// assert_eq!(result.content, "Content here");
/// ```
#[derive(Debug, Clone)]
pub struct Gleaner {
    config: GleanerConfig,
    #[cfg(feature = "fetch")]
    fetcher: Fetcher,
}

impl Gleaner {
    /// Creates a new Gleaner with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(GleanerConfig::default())
    }

    /// Creates a new Gleaner with a custom configuration.
    pub fn with_config(config: GleanerConfig) -> Result<Self> {
        #[cfg(feature = "fetch")]
        let fetcher = Fetcher::new(config.fetch.clone())?;

        Ok(Self {
            config,
            #[cfg(feature = "fetch")]
            fetcher,
        })
    }

    pub fn config(&self) -> &GleanerConfig {
        &self.config
    }

    /// Parses markup and extracts the normalized primary content.
    ///
    /// # Errors
    ///
    /// [`GleanError::HtmlParseError`] if no tree could be built,
    /// [`GleanError::NoContentRegion`] if there is no article, main, or body.
    pub fn extract(&self, html: &str, source_url: &str) -> Result<ExtractionResult> {
        extract_with_config(html, source_url, &self.config.extract).inspect_err(|e| {
            tracing::warn!(url = source_url, stage = "extract", error = %e, "extraction failed");
        })
    }

    /// Fetches a URL and extracts its primary content.
    ///
    /// The response body reaches the extractor only when the fetch
    /// succeeded; any fetch error is returned unchanged.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_extract(&self, url: &str) -> Result<ExtractionResult> {
        let request = FetchRequest::new(url)?;
        tracing::info!(url = request.url(), "fetching content");

        let fetched = self.fetcher.fetch(&request).await.inspect_err(|e| {
            tracing::warn!(url = request.url(), stage = "fetch", error = %e, "fetch failed");
        })?;

        let result = self.extract(&fetched.raw_markup, &fetched.source_url)?;
        tracing::info!(url = request.url(), chars = result.content.len(), "extracted content");
        Ok(result)
    }

    /// Validates and normalizes pasted text for the raw-text path.
    pub fn prepare_text(&self, text: &str) -> Result<String> {
        prepare_text(text)
    }
}

/// Convenience function for one-shot extraction with defaults.
pub fn extract(html: &str, source_url: &str) -> Result<ExtractionResult> {
    extract_with_config(html, source_url, &ExtractConfig::default())
}

fn extract_with_config(html: &str, source_url: &str, config: &ExtractConfig) -> Result<ExtractionResult> {
    let doc = Document::parse(html)?;
    let extracted = extract_content(&doc, config)?;

    let mut result = ExtractionResult::new(extracted.text, source_url);
    result.region = Some(extracted.region);
    Ok(result)
}

/// Fetch a URL and extract its content with the default configuration.
#[cfg(feature = "fetch")]
pub async fn fetch_and_extract(url: &str) -> Result<ExtractionResult> {
    Gleaner::new()?.fetch_and_extract(url).await
}

/// Normalizes caller-supplied text, rejecting blank input.
///
/// ```rust
/// use gleaner_core::{GleanError, prepare_text};
///
/// assert_eq!(prepare_text(" pasted\t\ttext ").unwrap(), "pasted text");
/// assert!(matches!(prepare_text("  \n "), Err(GleanError::MissingInput)));
/// ```
pub fn prepare_text(text: &str) -> Result<String> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return Err(GleanError::MissingInput);
    }
    Ok(normalized)
}
