//! HTML parsing into an index arena.
//!
//! This module provides the [`Document`] type: the parsed tree of a page
//! (see [`DomTree`]) together with the facts about the raw markup that the
//! tree alone cannot answer.
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><title>Title</title></head>
//!         <body><p class="content">Paragraph</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! assert_eq!(doc.title(), Some("Title".to_string()));
//! assert!(doc.declares_body());
//! ```

use std::cell::Cell;

use scraper::Html;

use crate::dom_tree::{DomNode, DomTree, NodeId};
use crate::{GleanError, Result};

/// Represents a parsed HTML document.
///
/// Parsing follows the HTML5 tree-construction rules, so malformed or
/// incomplete markup still produces a tree.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    body_declared: bool,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Errors
    ///
    /// Returns [`GleanError::HtmlParseError`] only when no tree could be
    /// produced at all.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gleaner_core::parse::Document;
    ///
    /// let doc = Document::parse("<p>unclosed <b>markup").unwrap();
    /// assert!(doc.text_content().contains("unclosed markup"));
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let body_declared = scan_for_body(html);
        let tree = DomTree::from_html(&Html::parse_document(html));

        if tree.root().is_none() {
            return Err(GleanError::HtmlParseError("document has no root node".to_string()));
        }

        tracing::trace!(nodes = tree.len(), body_declared, stage = "parse", "built document tree");
        Ok(Self { tree, body_declared })
    }

    /// The arena holding the parsed nodes.
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Whether the source markup contains a `<body>` start tag.
    ///
    /// The HTML5 tree builder inserts a `body` element even when the source
    /// has none; this reports what the author actually wrote.
    pub fn declares_body(&self) -> bool {
        self.body_declared
    }

    /// The `body` element, if the source declared one.
    pub fn body(&self) -> Option<NodeId> {
        if self.body_declared { self.tree.find_first("body") } else { None }
    }

    /// Gets the title of the document.
    ///
    /// Returns the content of the first `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let title = self.tree.find_first("title")?;
        Some(self.collect_text(title).trim().to_string())
    }

    /// Gets all text content from the document.
    ///
    /// Returns the concatenation of all text nodes in document order,
    /// without any filtering.
    pub fn text_content(&self) -> String {
        self.tree.root().map(|root| self.collect_text(root)).unwrap_or_default()
    }

    fn collect_text(&self, node_id: NodeId) -> String {
        self.tree
            .descendants(node_id)
            .filter_map(|id| self.tree.get_node(id).and_then(DomNode::text))
            .collect()
    }
}

/// Streams the raw markup looking for a real `<body>` start tag.
///
/// Tags inside comments, scripts, or other raw-text content do not count.
/// The scanner runs in non-strict mode so raw-text tags in ambiguous
/// positions (`<style>` inside `<select>`) do not stop it. A scan that still
/// fails never fails the parse; it falls back to a plain tag search.
fn scan_for_body(html: &str) -> bool {
    let found = Cell::new(false);

    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("body", |_el| {
                found.set(true);
                Ok(())
            })],
            strict: false,
            ..Default::default()
        },
        |_: &[u8]| {},
    );

    let scanned = rewriter.write(html.as_bytes()).and_then(|()| rewriter.end());

    match scanned {
        Ok(()) => found.get(),
        Err(e) if found.get() => {
            tracing::debug!(error = %e, stage = "parse", "body scan stopped after finding body");
            true
        }
        Err(e) => {
            tracing::debug!(error = %e, stage = "parse", "body scan failed, searching for tag");
            contains_body_tag(html)
        }
    }
}

fn contains_body_tag(html: &str) -> bool {
    html.as_bytes().windows(5).enumerate().any(|(i, w)| {
        w.eq_ignore_ascii_case(b"<body")
            && html
                .as_bytes()
                .get(i + 5)
                .is_none_or(|b| b.is_ascii_whitespace() || matches!(b, b'>' | b'/'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph 1</p>
            <p class="content">Paragraph 2</p>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("Test Page".to_string()));
        assert!(doc.declares_body());
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_text_content() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let text = doc.text_content();

        assert!(text.contains("Heading"));
        assert!(text.contains("Paragraph 1"));
        assert!(text.contains("Paragraph 2"));
    }

    #[test]
    fn test_implied_body_is_not_declared() {
        let doc = Document::parse("<html><head><title>x</title></head><p>loose</p></html>").unwrap();
        assert!(!doc.declares_body());
        assert!(doc.body().is_none());
        assert!(doc.tree().find_first("body").is_some());
    }

    #[test]
    fn test_body_inside_comment_or_script_is_ignored() {
        let doc = Document::parse("<html><!-- <body> --><script>var s = '<body>';</script></html>").unwrap();
        assert!(!doc.declares_body());
    }

    #[test]
    fn test_uppercase_body_tag() {
        let doc = Document::parse("<HTML><BODY>Shouting</BODY></HTML>").unwrap();
        assert!(doc.declares_body());
    }

    #[test]
    fn test_malformed_markup_still_parses() {
        let doc = Document::parse("<div><p>open<span>nested</div></p>trailing").unwrap();
        let text = doc.text_content();
        assert!(text.contains("open"));
        assert!(text.contains("nested"));
        assert!(text.contains("trailing"));
    }

    #[rstest]
    #[case("style")]
    #[case("noscript")]
    #[case("xmp")]
    #[case("iframe")]
    fn test_raw_text_tag_inside_select(#[case] tag: &str) {
        let html = format!("<html><body><select><{tag}>x</{tag}></select><article>story</article></body></html>");
        let doc = Document::parse(&html).unwrap();
        assert!(doc.declares_body());
        assert!(doc.tree().find_first("article").is_some());
    }

    #[test]
    fn test_contains_body_tag() {
        assert!(contains_body_tag("<html><BODY class=x>"));
        assert!(contains_body_tag("<body>"));
        assert!(!contains_body_tag("<bodyguard>"));
        assert!(!contains_body_tag("<html><head></head></html>"));
    }

    #[test]
    fn test_empty_input() {
        let doc = Document::parse("").unwrap();
        assert!(!doc.declares_body());
        assert_eq!(doc.text_content(), "");
    }
}
