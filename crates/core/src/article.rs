//! Extraction output type.
//!
//! This module defines [`ExtractionResult`], the normalized text of a page
//! together with the URL it came from. It serializes to the wire shape
//! `{ "content": ..., "url": ... }`.

use serde::{Deserialize, Serialize};

use crate::extract::RegionKind;
use crate::Result;

/// Output format options for an extraction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain normalized text.
    PlainText,
    /// JSON object with `content` and `url`.
    Json,
}

/// The final normalized text plus the originating URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Normalized plain text of the primary content region.
    pub content: String,

    /// Source URL, for traceability.
    #[serde(rename = "url")]
    pub source_url: String,

    /// Landmark the text was taken from.
    #[serde(skip)]
    pub region: Option<RegionKind>,
}

impl ExtractionResult {
    pub fn new(content: String, source_url: impl Into<String>) -> Self {
        Self { content, source_url: source_url.into(), region: None }
    }

    /// Converts content to the specified format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::PlainText => Ok(self.content.clone()),
            OutputFormat::Json => self.to_json().map(|v| v.to_string()),
        }
    }

    /// Gets the result as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Number of whitespace-separated words in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
