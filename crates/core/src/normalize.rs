//! Whitespace normalization for extracted text.

use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n?").expect("valid line break pattern"));
static INLINE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid inline space pattern"));
static LINE_GAPS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("valid line gap pattern"));

/// Collapses whitespace into the canonical text form.
///
/// - `\r\n` and lone `\r` become `\n`
/// - every run of non-newline whitespace (spaces, tabs, form feeds,
///   non-breaking spaces, ...) becomes a single space
/// - every whitespace run containing a newline becomes a single newline,
///   so indentation-only lines and trailing spaces disappear
/// - leading and trailing whitespace is trimmed
///
/// ```rust
/// use gleaner_core::normalize_text;
///
/// assert_eq!(normalize_text("  Hello   world.\n\n\nBye. "), "Hello world.\nBye.");
/// ```
pub fn normalize_text(text: &str) -> String {
    let unified = LINE_BREAKS.replace_all(text, "\n");
    let spaced = INLINE_SPACE.replace_all(&unified, " ");
    let collapsed = LINE_GAPS.replace_all(&spaced, "\n");
    collapsed.trim().to_string()
}
