//! Fetch web pages and extract their primary readable content as
//! normalized plain text.
//!
//! ```rust
//! use gleaner_core::extract;
//!
//! let html = "<html><body><nav>menu</nav><article>  Hello   world.\n\n\nBye. </article></body></html>";
//! let result = extract(html, "https://example.com/post").unwrap();
//! assert_eq!(result.content, "Hello world.\nBye.");
//! ```

pub mod article;
pub mod dom_tree;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod parse;
pub mod pipeline;

pub use article::{ExtractionResult, OutputFormat};
#[doc(hidden)]
pub use dom_tree::{DomNode, DomTree, NodeId, NodeKind, build_dom_tree};
pub use error::{ErrorKind, GleanError, Result};
pub use extract::{ExtractConfig, ExtractedContent, NOISE_TAGS, RegionKind, extract_content};
#[doc(hidden)]
pub use extract::{PrunedSet, collect_text, prune_noise, select_primary};
pub use fetch::{DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT, FetchConfig, FetchRequest, FetchResult};
#[cfg(feature = "fetch")]
pub use fetch::{Fetcher, fetch_url};
pub use fetch::{fetch_file, fetch_stdin};
pub use normalize::normalize_text;
pub use parse::Document;
#[cfg(feature = "fetch")]
pub use pipeline::fetch_and_extract;
pub use pipeline::{Gleaner, GleanerConfig, GleanerConfigBuilder, extract, prepare_text};
